//! Lyra precompile implementations.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod error;
pub use error::{IntoPrecompileResult, Result};

pub mod runtime;
pub use runtime::*;

pub mod storage;

pub mod access_controller;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_util;

pub use lyra_contracts::precompiles::{ACCESS_CONTROLLER_ADDRESS, DEFAULT_ADMIN_ROLE};
