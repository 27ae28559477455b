//! Interfaces and constants for the predeployed system contracts.

pub mod access_controller;
pub use access_controller::*;

use alloy_primitives::{Address, B256, address};

/// Predeploy address of the access controller.
pub const ACCESS_CONTROLLER_ADDRESS: Address =
    address!("0xacce550000000000000000000000000000000000");

/// The root role. It administers every role whose admin entry was never
/// reassigned, including itself.
pub const DEFAULT_ADMIN_ROLE: B256 = B256::ZERO;

crate::sol! {
    /// Raised by precompile dispatch when calldata targets a selector the
    /// contract does not implement.
    #[derive(Debug, PartialEq, Eq)]
    error UnknownFunctionSelector(bytes4 selector);
}
