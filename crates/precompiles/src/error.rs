//! Error types shared by the precompile implementations, and their mapping
//! onto the execution environment's precompile result.

use alloy::{
    primitives::{Bytes, FixedBytes},
    sol_types::{Revert, SolError},
};
use lyra_contracts::precompiles::UnknownFunctionSelector;
use revm::precompile::{PrecompileError, PrecompileOutput, PrecompileResult};
use thiserror::Error;

use crate::storage::{PrecompileStorageProvider, StorageCtx};

pub type Result<T, E = LyraPrecompileError> = core::result::Result<T, E>;

/// Domain failures of the access controller.
///
/// The `Display` strings double as the on-chain revert reason and are
/// observed verbatim by callers, so they must never change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessControlError {
    /// The caller does not hold the role required for a privileged mutation.
    #[error("AccessControl: account is missing role")]
    MissingRole,
    /// A renounce targeted an account other than the caller.
    #[error("AccessControl: can only renounce roles for self")]
    RenounceNotSelf,
    /// `initialize` was called on an already initialized contract.
    #[error("AccessControl: contract is already initialized")]
    AlreadyInitialized,
}

/// Top-level error produced by precompile execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LyraPrecompileError {
    #[error(transparent)]
    AccessControl(#[from] AccessControlError),
    /// Calldata targeted a selector the contract does not implement.
    #[error("unknown function selector {0}")]
    UnknownSelector(FixedBytes<4>),
    /// Calldata carried a known selector but failed ABI decoding.
    #[error("invalid calldata: {0}")]
    InvalidInput(String),
    #[error("out of precompile gas")]
    OutOfGas,
    /// Unrecoverable runtime failure; aborts the call instead of reverting.
    #[error("{0}")]
    Fatal(String),
}

impl LyraPrecompileError {
    /// ABI-encoded revert payload for this error.
    ///
    /// Unknown selectors revert with the typed [`UnknownFunctionSelector`]
    /// error; everything else reverts with a Solidity `Error(string)` payload
    /// carrying the `Display` string.
    pub fn revert_bytes(&self) -> Bytes {
        match self {
            Self::UnknownSelector(selector) => UnknownFunctionSelector {
                selector: *selector,
            }
            .abi_encode()
            .into(),
            err => Revert {
                reason: err.to_string(),
            }
            .abi_encode()
            .into(),
        }
    }
}

/// Conversion of precompile outcomes into the execution environment's
/// [`PrecompileResult`].
pub trait IntoPrecompileResult {
    fn into_precompile_result(self) -> PrecompileResult;
}

impl IntoPrecompileResult for LyraPrecompileError {
    fn into_precompile_result(self) -> PrecompileResult {
        match self {
            Self::OutOfGas => Err(PrecompileError::OutOfGas),
            Self::Fatal(msg) => Err(PrecompileError::Other(msg.into())),
            err => Ok(PrecompileOutput::new_reverted(
                StorageCtx.gas_used(),
                err.revert_bytes(),
            )),
        }
    }
}

impl IntoPrecompileResult for Result<Bytes> {
    fn into_precompile_result(self) -> PrecompileResult {
        match self {
            Ok(bytes) => Ok(PrecompileOutput::new(StorageCtx.gas_used(), bytes)),
            Err(err) => err.into_precompile_result(),
        }
    }
}
