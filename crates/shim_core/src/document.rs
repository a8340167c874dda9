use serde_json::Value;

use crate::bridge::{Bridge, BridgeError, Call};
use crate::node::Node;
use crate::operation::Operation;

/// `console` as seen by script code: a single `log` forwarded to the host.
pub struct Console<'b, B: Bridge> {
    bridge: &'b B,
}

impl<'b, B: Bridge> Console<'b, B> {
    pub(crate) fn new(bridge: &'b B) -> Self {
        Self { bridge }
    }

    pub fn log(&self, value: impl Into<Value>) -> Result<(), BridgeError> {
        tracing::debug!("[dom] log");
        self.bridge.call(Call::Log(value.into()))?;
        Ok(())
    }
}

/// `document` as seen by script code.
pub struct Document<'b, B: Bridge> {
    bridge: &'b B,
}

impl<'b, B: Bridge> Document<'b, B> {
    pub(crate) fn new(bridge: &'b B) -> Self {
        Self { bridge }
    }

    /// Wrap every handle the host returns for `selector`, one node per
    /// handle, in host order.
    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<Node<'b, B>>, BridgeError> {
        let handles = self
            .bridge
            .call(Call::QuerySelectorAll(Value::from(selector)))?
            .into_handles(Operation::QuerySelectorAll)?;
        tracing::debug!("[dom] querySelectorAll {} -> {} node(s)", selector, handles.len());

        Ok(handles
            .into_iter()
            .map(|handle| Node::wrap(self.bridge, handle))
            .collect())
    }
}
