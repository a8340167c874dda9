//! The host bridge contract.
//!
//! Every shim capability turns into exactly one [`Call`] handed to a
//! [`Bridge`]. The bridge owns all real behaviour (node storage, selector
//! matching, the log sink); the shim only shapes arguments and replies.

use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::operation::Operation;

/// One forwarded request, typed per operation.
///
/// Selector and attribute name are carried as the caller gave them; only the
/// host decides what shapes it accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum Call<H> {
    Log(Value),
    QuerySelectorAll(Value),
    GetAttribute(H, Value),
}

/// Host reply. Which variant is valid depends on the call that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply<H> {
    Unit,
    Handles(Vec<H>),
    /// Host-defined attribute value; `Value::Null` marks absence.
    Attribute(Value),
}

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("unknown operation: {0}")]
    UnknownOperation(String),
    #[error("{operation} expects {expected} argument(s), got {got}")]
    Arity {
        operation: Operation,
        expected: usize,
        got: usize,
    },
    #[error("{operation}: invalid argument {index}: {message}")]
    Argument {
        operation: Operation,
        index: usize,
        message: String,
    },
    #[error("{operation}: host replied with {got}")]
    UnexpectedReply {
        operation: Operation,
        got: &'static str,
    },
    /// Failure raised by the host itself, passed through as-is.
    #[error("{0}")]
    Host(String),
}

impl BridgeError {
    pub fn host(message: impl std::fmt::Display) -> Self {
        BridgeError::Host(message.to_string())
    }
}

/// The external collaborator every shim operation forwards to.
///
/// Calls are synchronous: the bridge either returns a reply or an error, and
/// the shim hands either back to its caller untouched.
pub trait Bridge {
    /// Opaque node identifier chosen by the host.
    type Handle;

    fn call(&self, call: Call<Self::Handle>) -> Result<Reply<Self::Handle>, BridgeError>;
}

impl<B: Bridge + ?Sized> Bridge for &B {
    type Handle = B::Handle;

    fn call(&self, call: Call<Self::Handle>) -> Result<Reply<Self::Handle>, BridgeError> {
        (**self).call(call)
    }
}

impl<B: Bridge + ?Sized> Bridge for Rc<B> {
    type Handle = B::Handle;

    fn call(&self, call: Call<Self::Handle>) -> Result<Reply<Self::Handle>, BridgeError> {
        (**self).call(call)
    }
}

impl<B: Bridge + ?Sized> Bridge for Box<B> {
    type Handle = B::Handle;

    fn call(&self, call: Call<Self::Handle>) -> Result<Reply<Self::Handle>, BridgeError> {
        (**self).call(call)
    }
}

impl<H> Call<H> {
    pub fn operation(&self) -> Operation {
        match self {
            Call::Log(_) => Operation::Log,
            Call::QuerySelectorAll(_) => Operation::QuerySelectorAll,
            Call::GetAttribute(_, _) => Operation::GetAttribute,
        }
    }
}

impl<H: DeserializeOwned> Call<H> {
    /// Build a typed call from a wire name and positional arguments, as sent
    /// by script code. Only the name, the arity and the handle are checked;
    /// nothing reaches the host if this fails.
    pub fn from_wire(name: &str, args: Vec<Value>) -> Result<Self, BridgeError> {
        let operation: Operation = name.parse()?;
        if args.len() != operation.arity() {
            return Err(BridgeError::Arity {
                operation,
                expected: operation.arity(),
                got: args.len(),
            });
        }

        let mut args = args.into_iter();
        let mut next = || args.next().unwrap_or(Value::Null);
        match operation {
            Operation::Log => Ok(Call::Log(next())),
            Operation::QuerySelectorAll => Ok(Call::QuerySelectorAll(next())),
            Operation::GetAttribute => {
                let handle = serde_json::from_value::<H>(next()).map_err(|err| {
                    BridgeError::Argument {
                        operation,
                        index: 0,
                        message: err.to_string(),
                    }
                })?;
                Ok(Call::GetAttribute(handle, next()))
            }
        }
    }
}

impl<H> Reply<H> {
    fn kind(&self) -> &'static str {
        match self {
            Reply::Unit => "no value",
            Reply::Handles(_) => "a handle list",
            Reply::Attribute(_) => "an attribute value",
        }
    }

    pub fn into_handles(self, operation: Operation) -> Result<Vec<H>, BridgeError> {
        match self {
            Reply::Handles(handles) => Ok(handles),
            other => Err(BridgeError::UnexpectedReply {
                operation,
                got: other.kind(),
            }),
        }
    }

    pub fn into_attribute(self, operation: Operation) -> Result<Value, BridgeError> {
        match self {
            Reply::Attribute(value) => Ok(value),
            other => Err(BridgeError::UnexpectedReply {
                operation,
                got: other.kind(),
            }),
        }
    }
}

impl<H: Serialize> Reply<H> {
    /// Render the reply as the value script code receives.
    pub fn into_value(self) -> Result<Value, BridgeError> {
        match self {
            Reply::Unit => Ok(Value::Null),
            Reply::Handles(handles) => serde_json::to_value(handles).map_err(BridgeError::host),
            Reply::Attribute(value) => Ok(value),
        }
    }
}
