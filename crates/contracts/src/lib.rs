//! Solidity interface definitions for the Lyra predeployed contracts.
//!
//! Interfaces here are the single source of truth for the ABI surface of the
//! native contracts: selectors, call/return encodings, and event layouts are
//! all generated from them with [`sol!`].
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use alloy::sol;

pub mod precompiles;
