//! A table-driven host.
//!
//! Answers `querySelectorAll` and `getAttribute` from static data, sends
//! `log` to `tracing`, and records every call it receives. It stands in for a
//! real DOM host in tests and in the `domshim` CLI.
//!
//! ```json
//! {
//!   "selectors": { "div": [101, 102] },
//!   "nodes": [ { "handle": 101, "attributes": { "class": "active" } } ],
//!   "failures": { "log": "sink closed" }
//! }
//! ```

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::bridge::{Bridge, BridgeError, Call, Reply};
use crate::operation::Operation;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct HostFixture {
    /// Selector text to handles, looked up verbatim.
    #[serde(default)]
    pub selectors: BTreeMap<String, Vec<Value>>,
    #[serde(default)]
    pub nodes: Vec<NodeFixture>,
    /// Operation wire name to the error message the host raises for it.
    #[serde(default)]
    pub failures: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeFixture {
    pub handle: Value,
    #[serde(default)]
    pub attributes: BTreeMap<String, Value>,
}

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("unknown operation in failures: {0}")]
    UnknownFailure(String),
}

impl HostFixture {
    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let contents = std::fs::read_to_string(path).map_err(|source| FixtureError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let fixture: HostFixture =
            serde_json::from_str(&contents).map_err(|source| FixtureError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        fixture.validate()?;
        tracing::debug!(
            "Loaded host fixture from {} ({} selector(s), {} node(s))",
            path.display(),
            fixture.selectors.len(),
            fixture.nodes.len()
        );
        Ok(fixture)
    }

    fn validate(&self) -> Result<(), FixtureError> {
        for name in self.failures.keys() {
            if name.parse::<Operation>().is_err() {
                return Err(FixtureError::UnknownFailure(name.clone()));
            }
        }
        Ok(())
    }

    pub fn with_selector(
        mut self,
        selector: &str,
        handles: impl IntoIterator<Item = Value>,
    ) -> Self {
        self.selectors
            .insert(selector.to_string(), handles.into_iter().collect());
        self
    }

    pub fn with_attribute(mut self, handle: Value, name: &str, value: impl Into<Value>) -> Self {
        let value = value.into();
        match self.nodes.iter_mut().find(|node| node.handle == handle) {
            Some(node) => {
                node.attributes.insert(name.to_string(), value);
            }
            None => {
                let mut attributes = BTreeMap::new();
                attributes.insert(name.to_string(), value);
                self.nodes.push(NodeFixture { handle, attributes });
            }
        }
        self
    }

    pub fn with_failure(mut self, operation: Operation, message: &str) -> Self {
        self.failures
            .insert(operation.name().to_string(), message.to_string());
        self
    }

    fn attribute(&self, handle: &Value, name: &str) -> Value {
        self.nodes
            .iter()
            .find(|node| &node.handle == handle)
            .and_then(|node| node.attributes.get(name).cloned())
            .unwrap_or(Value::Null)
    }
}

#[derive(Debug, Default)]
pub struct FixtureBridge {
    fixture: HostFixture,
    calls: RefCell<Vec<Call<Value>>>,
    logs: RefCell<Vec<Value>>,
}

impl FixtureBridge {
    pub fn new(fixture: HostFixture) -> Self {
        Self {
            fixture,
            calls: RefCell::new(Vec::new()),
            logs: RefCell::new(Vec::new()),
        }
    }

    /// Every call received so far, in arrival order.
    pub fn calls(&self) -> Vec<Call<Value>> {
        self.calls.borrow().clone()
    }

    pub fn logs(&self) -> Vec<Value> {
        self.logs.borrow().clone()
    }
}

impl Bridge for FixtureBridge {
    type Handle = Value;

    fn call(&self, call: Call<Value>) -> Result<Reply<Value>, BridgeError> {
        self.calls.borrow_mut().push(call.clone());
        if let Some(message) = self.fixture.failures.get(call.operation().name()) {
            return Err(BridgeError::host(message));
        }

        match call {
            Call::Log(value) => {
                tracing::info!(target: "dom_shim::console", "{}", display_value(&value));
                self.logs.borrow_mut().push(value);
                Ok(Reply::Unit)
            }
            Call::QuerySelectorAll(selector) => Ok(Reply::Handles(
                selector
                    .as_str()
                    .and_then(|selector| self.fixture.selectors.get(selector))
                    .cloned()
                    .unwrap_or_default(),
            )),
            Call::GetAttribute(handle, name) => Ok(Reply::Attribute(
                name.as_str()
                    .map(|name| self.fixture.attribute(&handle, name))
                    .unwrap_or(Value::Null),
            )),
        }
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
