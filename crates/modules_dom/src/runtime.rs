use std::rc::Rc;

use deno_core::{JsRuntime, RuntimeOptions};
use serde_json::Value;
use shim_core::Bridge;
use thiserror::Error;

use crate::Surface;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("failed to install the DOM surface: {0}")]
    Install(String),
    #[error("{name}: {message}")]
    Script { name: String, message: String },
}

/// A V8 isolate with the DOM globals installed over one host bridge.
pub struct ShimRuntime {
    runtime: JsRuntime,
    surface: Surface,
}

impl ShimRuntime {
    pub fn new(
        bridge: Rc<dyn Bridge<Handle = Value>>,
        surface: Surface,
    ) -> Result<Self, RuntimeError> {
        let mut runtime = JsRuntime::new(RuntimeOptions {
            extensions: vec![crate::init(bridge)],
            ..Default::default()
        });

        if let Some(script) = surface.strip_script() {
            runtime
                .execute_script("ext:dom_shim/surface.js", script)
                .map_err(|err| RuntimeError::Install(err.to_string()))?;
        }
        tracing::debug!("[dom] runtime ready ({:?} surface)", surface);

        Ok(Self { runtime, surface })
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    /// Run classic script code to completion. Uncaught exceptions, including
    /// host errors nobody caught, come back as `RuntimeError::Script`.
    pub fn execute(&mut self, name: &str, source: String) -> Result<(), RuntimeError> {
        self.runtime
            .execute_script(name.to_string(), source)
            .map_err(|err| RuntimeError::Script {
                name: name.to_string(),
                message: err.to_string(),
            })?;
        Ok(())
    }
}
