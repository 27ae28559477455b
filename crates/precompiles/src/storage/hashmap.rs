//! In-memory storage provider used by unit tests and local tooling.

use std::collections::HashMap;

use alloy::primitives::{Address, LogData, U256};

use crate::{
    error::{LyraPrecompileError, Result},
    storage::PrecompileStorageProvider,
};

/// `HashMap`-backed [`PrecompileStorageProvider`].
///
/// Mirrors the semantics the precompiles rely on from the real execution
/// environment: zero-default slots, per-address isolation, recorded events,
/// and gas that is deducted monotonically until an optional limit is hit.
#[derive(Debug)]
pub struct HashMapStorageProvider {
    chain_id: u64,
    slots: HashMap<Address, HashMap<U256, U256>>,
    events: HashMap<Address, Vec<LogData>>,
    gas_limit: u64,
    gas_used: u64,
}

impl HashMapStorageProvider {
    pub fn new(chain_id: u64) -> Self {
        Self::with_gas_limit(chain_id, u64::MAX)
    }

    /// Provider that rejects execution past `gas_limit`.
    pub fn with_gas_limit(chain_id: u64, gas_limit: u64) -> Self {
        Self {
            chain_id,
            slots: HashMap::new(),
            events: HashMap::new(),
            gas_limit,
            gas_used: 0,
        }
    }
}

impl PrecompileStorageProvider for HashMapStorageProvider {
    fn chain_id(&self) -> u64 {
        self.chain_id
    }

    fn sstore(&mut self, address: Address, key: U256, value: U256) -> Result<()> {
        self.slots.entry(address).or_default().insert(key, value);
        Ok(())
    }

    fn sload(&mut self, address: Address, key: U256) -> Result<U256> {
        Ok(self
            .slots
            .get(&address)
            .and_then(|slots| slots.get(&key))
            .copied()
            .unwrap_or(U256::ZERO))
    }

    fn emit_event(&mut self, address: Address, event: LogData) -> Result<()> {
        self.events.entry(address).or_default().push(event);
        Ok(())
    }

    fn deduct_gas(&mut self, gas: u64) -> Result<()> {
        let used = self.gas_used.saturating_add(gas);
        if used > self.gas_limit {
            return Err(LyraPrecompileError::OutOfGas);
        }
        self.gas_used = used;
        Ok(())
    }

    fn gas_used(&self) -> u64 {
        self.gas_used
    }

    #[cfg(any(test, feature = "test-utils"))]
    fn recorded_events(&self, address: Address) -> Vec<LogData> {
        self.events.get(&address).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uninitialized_slots_read_zero() -> eyre::Result<()> {
        let mut provider = HashMapStorageProvider::new(1);
        let address = Address::repeat_byte(0x01);
        assert_eq!(provider.sload(address, U256::from(7))?, U256::ZERO);
        Ok(())
    }

    #[test]
    fn slots_are_isolated_per_address() -> eyre::Result<()> {
        let mut provider = HashMapStorageProvider::new(1);
        let a = Address::repeat_byte(0x01);
        let b = Address::repeat_byte(0x02);
        let key = U256::from(42);

        provider.sstore(a, key, U256::from(100))?;
        provider.sstore(b, key, U256::from(200))?;

        assert_eq!(provider.sload(a, key)?, U256::from(100));
        assert_eq!(provider.sload(b, key)?, U256::from(200));
        Ok(())
    }

    #[test]
    fn gas_limit_is_enforced() {
        let mut provider = HashMapStorageProvider::with_gas_limit(1, 100);
        provider.deduct_gas(60).unwrap();
        provider.deduct_gas(40).unwrap();
        assert_eq!(provider.gas_used(), 100);
        assert_eq!(
            provider.deduct_gas(1).unwrap_err(),
            LyraPrecompileError::OutOfGas
        );
    }
}
