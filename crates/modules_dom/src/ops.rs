//! The single op behind every DOM global.

use deno_core::{OpState, error::CoreError, op2};
use serde_json::Value;
use shim_core::{Bridge, BridgeError, Call, Reply};

use crate::HostBridge;

/// Forward one shim call to the host bridge stored in `OpState`.
#[op2]
#[serde]
pub fn op_dom_call(
    state: &OpState,
    #[string] operation: String,
    #[serde] args: Vec<Value>,
) -> Result<serde_json::Value, CoreError> {
    let host = state.borrow::<HostBridge>().clone();
    let call = Call::from_wire(&operation, args).map_err(bridge_error)?;
    tracing::debug!("[dom] op_dom_call {}", call.operation());

    host.call(call)
        .and_then(Reply::into_value)
        .map_err(bridge_error)
}

fn bridge_error(err: BridgeError) -> CoreError {
    CoreError::from(std::io::Error::other(err.to_string()))
}
