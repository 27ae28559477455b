pub mod hashmap;
pub mod slots;
pub mod thread_local;
pub use thread_local::{StorageCtx, StorageGuard};

pub mod types;
pub use types::*;

use alloy::primitives::{Address, LogData, U256};

use crate::error::Result;

/// Low-level storage provider backing precompile execution.
///
/// One provider instance represents the state surface of a single call; the
/// dispatcher installs it in the thread-local context (see [`StorageCtx`])
/// before handing control to a contract.
pub trait PrecompileStorageProvider {
    fn chain_id(&self) -> u64;
    fn sstore(&mut self, address: Address, key: U256, value: U256) -> Result<()>;
    fn sload(&mut self, address: Address, key: U256) -> Result<U256>;
    fn emit_event(&mut self, address: Address, event: LogData) -> Result<()>;
    fn deduct_gas(&mut self, gas: u64) -> Result<()>;
    fn gas_used(&self) -> u64;

    /// Events recorded for `address`, in emission order.
    #[cfg(any(test, feature = "test-utils"))]
    fn recorded_events(&self, address: Address) -> Vec<LogData>;
}

/// Storage operations for a given (contract) address.
pub trait StorageOps {
    fn sstore(&mut self, slot: U256, value: U256) -> Result<()>;
    fn sload(&mut self, slot: U256) -> Result<U256>;
}

/// Trait providing access to a contract's address and storage provider.
///
/// Abstracts the common pattern of contracts needing both an address and a
/// mutable reference to a storage provider.
pub trait ContractStorage {
    type Storage: PrecompileStorageProvider;
    fn address(&self) -> Address;
    fn storage(&mut self) -> &mut Self::Storage;
}

/// Blanket implementation of `StorageOps` for all types that implement
/// `ContractStorage`. Allows contracts to use `StorageOps` while delegating
/// to `PrecompileStorageProvider`.
impl<T> StorageOps for T
where
    T: ContractStorage,
{
    fn sstore(&mut self, slot: U256, value: U256) -> Result<()> {
        let address = self.address();
        self.storage().sstore(address, slot, value)
    }

    fn sload(&mut self, slot: U256) -> Result<U256> {
        let address = self.address();
        self.storage().sload(address, slot)
    }
}
