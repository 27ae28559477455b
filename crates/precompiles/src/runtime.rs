//! Precompile call runtime: selector dispatch and ABI plumbing shared by all
//! native contracts.

use alloy::{
    primitives::{Address, Bytes},
    sol_types::{SolCall, SolInterface},
};
use revm::precompile::PrecompileResult;
use tracing::trace;

use crate::error::{IntoPrecompileResult, LyraPrecompileError, Result};

/// Base charge for entering a precompile.
pub const PRECOMPILE_BASE_COST: u64 = 100;

/// Flat charge applied per calldata byte before dispatch.
pub const CALLDATA_BYTE_COST: u64 = 16;

/// Gas charged up front for a call with `input_len` bytes of calldata.
pub const fn input_cost(input_len: usize) -> u64 {
    PRECOMPILE_BASE_COST + input_len as u64 * CALLDATA_BYTE_COST
}

/// Core contract-call surface implemented by every precompile.
///
/// `msg_sender` is the authenticated caller as established by the execution
/// environment; implementations never derive authorization from calldata.
pub trait Precompile {
    fn call(&mut self, calldata: &[u8], msg_sender: Address) -> PrecompileResult;
}

/// Decodes `calldata` against an interface's calls enum and hands the decoded
/// call to `handler`.
///
/// Calldata without a known 4-byte selector reverts with the typed
/// `UnknownFunctionSelector` error; calldata with a known selector but
/// malformed arguments reverts with an `Error(string)` payload.
pub fn dispatch_call<C: SolInterface>(
    calldata: &[u8],
    decode: impl FnOnce(&[u8]) -> alloy::sol_types::Result<C>,
    handler: impl FnOnce(C) -> PrecompileResult,
) -> PrecompileResult {
    let Some(selector) = calldata.first_chunk::<4>() else {
        return unknown_selector([0u8; 4]);
    };
    if !C::valid_selector(*selector) {
        return unknown_selector(*selector);
    }

    match decode(calldata) {
        Ok(call) => handler(call),
        Err(err) => {
            LyraPrecompileError::InvalidInput(err.to_string()).into_precompile_result()
        }
    }
}

/// Runs a read-only handler and ABI-encodes its return value.
pub fn view<C: SolCall>(call: C, f: impl FnOnce(C) -> Result<C::Return>) -> PrecompileResult {
    f(call)
        .map(|ret| Bytes::from(C::abi_encode_returns(&ret)))
        .into_precompile_result()
}

/// Runs a state-mutating handler and ABI-encodes its return value.
pub fn mutate<C: SolCall>(
    call: C,
    msg_sender: Address,
    f: impl FnOnce(Address, C) -> Result<C::Return>,
) -> PrecompileResult {
    f(msg_sender, call)
        .map(|ret| Bytes::from(C::abi_encode_returns(&ret)))
        .into_precompile_result()
}

/// Runs a state-mutating handler with no return value.
pub fn mutate_void<C: SolCall>(
    call: C,
    msg_sender: Address,
    f: impl FnOnce(Address, C) -> Result<()>,
) -> PrecompileResult {
    f(msg_sender, call)
        .map(|()| Bytes::new())
        .into_precompile_result()
}

/// Reverts with the typed `UnknownFunctionSelector` error.
pub fn unknown_selector(selector: [u8; 4]) -> PrecompileResult {
    trace!(selector = %alloy::primitives::hex::encode(selector), "unknown precompile selector");
    LyraPrecompileError::UnknownSelector(selector.into()).into_precompile_result()
}
