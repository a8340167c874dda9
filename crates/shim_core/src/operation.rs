use std::fmt;
use std::str::FromStr;

use crate::bridge::BridgeError;

/// Host-side operations the shim can forward. The set is closed: adding a
/// fourth means changing the shim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Log,
    QuerySelectorAll,
    GetAttribute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationSpec {
    pub operation: Operation,
    pub name: &'static str,
    pub arity: usize,
    pub notes: &'static str,
}

// Wire names must match what script code passes to the host.
pub const OPERATION_TABLE: &[OperationSpec] = &[
    OperationSpec {
        operation: Operation::Log,
        name: "log",
        arity: 1,
        notes: "Forward a value to the host log sink; reply ignored",
    },
    OperationSpec {
        operation: Operation::QuerySelectorAll,
        name: "querySelectorAll",
        arity: 1,
        notes: "Selector string in, ordered handle sequence out",
    },
    OperationSpec {
        operation: Operation::GetAttribute,
        name: "getAttribute",
        arity: 2,
        notes: "Handle and attribute name in, host-defined value out",
    },
];

impl Operation {
    pub const ALL: [Operation; 3] = [
        Operation::Log,
        Operation::QuerySelectorAll,
        Operation::GetAttribute,
    ];

    pub fn spec(self) -> &'static OperationSpec {
        match self {
            Operation::Log => &OPERATION_TABLE[0],
            Operation::QuerySelectorAll => &OPERATION_TABLE[1],
            Operation::GetAttribute => &OPERATION_TABLE[2],
        }
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// Number of positional arguments the host expects after the name.
    pub fn arity(self) -> usize {
        self.spec().arity
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = BridgeError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        OPERATION_TABLE
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.operation)
            .ok_or_else(|| BridgeError::UnknownOperation(name.to_string()))
    }
}
