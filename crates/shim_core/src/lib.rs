//! Minimal DOM-like surface (`console.log`, `document.querySelectorAll`,
//! `Node.getAttribute`) where every operation is forwarded to a host
//! [`Bridge`].

pub mod bridge;
pub mod context;
pub mod document;
pub mod fixture;
pub mod node;
pub mod operation;

pub use bridge::{Bridge, BridgeError, Call, Reply};
pub use context::Shim;
pub use document::{Console, Document};
pub use fixture::{FixtureBridge, FixtureError, HostFixture, NodeFixture};
pub use node::Node;
pub use operation::{OPERATION_TABLE, Operation, OperationSpec};
