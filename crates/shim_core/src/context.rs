use crate::bridge::Bridge;
use crate::document::{Console, Document};

/// The shim's global bindings, built explicitly around one host bridge.
///
/// Consumers borrow `console()` and `document()` from here instead of
/// reaching for process-wide state.
#[derive(Debug, Clone)]
pub struct Shim<B> {
    bridge: B,
}

impl<B: Bridge> Shim<B> {
    pub fn new(bridge: B) -> Self {
        Self { bridge }
    }

    pub fn console(&self) -> Console<'_, B> {
        Console::new(&self.bridge)
    }

    pub fn document(&self) -> Document<'_, B> {
        Document::new(&self.bridge)
    }

    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    pub fn into_bridge(self) -> B {
        self.bridge
    }
}
