use std::fmt;

use serde_json::Value;

use crate::bridge::{Bridge, BridgeError, Call};
use crate::operation::Operation;

/// A wrapped host handle.
///
/// Nodes only come out of [`crate::Document::query_selector_all`], so every
/// handle a node holds was issued by the host.
pub struct Node<'b, B: Bridge> {
    handle: B::Handle,
    bridge: &'b B,
}

impl<'b, B: Bridge> Node<'b, B> {
    pub(crate) fn wrap(bridge: &'b B, handle: B::Handle) -> Self {
        Self { handle, bridge }
    }

    pub fn handle(&self) -> &B::Handle {
        &self.handle
    }

    pub fn into_handle(self) -> B::Handle {
        self.handle
    }

    /// Ask the host for `name` on this node. The reply is returned as the
    /// host produced it, `Value::Null` included.
    pub fn get_attribute(&self, name: &str) -> Result<Value, BridgeError>
    where
        B::Handle: Clone,
    {
        tracing::debug!("[dom] getAttribute {}", name);
        self.bridge
            .call(Call::GetAttribute(self.handle.clone(), Value::from(name)))?
            .into_attribute(Operation::GetAttribute)
    }
}

impl<B: Bridge> Clone for Node<'_, B>
where
    B::Handle: Clone,
{
    fn clone(&self) -> Self {
        Self {
            handle: self.handle.clone(),
            bridge: self.bridge,
        }
    }
}

impl<B: Bridge> PartialEq for Node<'_, B>
where
    B::Handle: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}

impl<B: Bridge> fmt::Debug for Node<'_, B>
where
    B::Handle: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node").field("handle", &self.handle).finish()
    }
}
