use std::marker::PhantomData;

use alloy::primitives::U256;

use crate::{
    error::Result,
    storage::{
        Slot, Storable, StorageKey, StorageOps,
        slots::{double_mapping_slot, mapping_slot},
    },
};

/// A typed handle to a storage mapping.
///
/// `Mapping<K, V>` represents Solidity's `mapping(K => V)` rooted at a fixed
/// base slot; entry locations follow Solidity's hash-based slot encoding
/// (see [`mapping_slot`]). Nesting the value type, as in
/// `Mapping<B256, Mapping<Address, bool>>`, mirrors a double mapping: only
/// the outermost base slot matters, inner mappings derive theirs per key.
///
/// ```ignore
/// const BALANCES: Mapping<Address, U256> = Mapping::new(U256::ZERO);
/// let balance = BALANCES.read(&mut contract, user)?;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Mapping<K, V> {
    base_slot: U256,
    _phantom: PhantomData<(K, V)>,
}

impl<K, V> Mapping<K, V> {
    #[inline]
    pub const fn new(base_slot: U256) -> Self {
        Self {
            base_slot,
            _phantom: PhantomData,
        }
    }

    /// Returns the base storage slot of this mapping.
    #[inline]
    pub const fn slot(&self) -> U256 {
        self.base_slot
    }
}

impl<K: StorageKey, V: Storable> Mapping<K, V> {
    /// Returns the slot handle for `key`'s entry.
    #[inline]
    pub fn entry(&self, key: K) -> Slot<V> {
        Slot::new(mapping_slot(key.as_storage_bytes(), self.base_slot))
    }

    /// Reads the value stored under `key`; absent entries read as the
    /// zero-word decoding of `V`.
    #[inline]
    pub fn read<S: StorageOps>(&self, storage: &mut S, key: K) -> Result<V> {
        self.entry(key).read(storage)
    }

    /// Writes `value` under `key`.
    #[inline]
    pub fn write<S: StorageOps>(&self, storage: &mut S, key: K, value: V) -> Result<()> {
        self.entry(key).write(storage, value)
    }
}

impl<K1: StorageKey, K2: StorageKey, V: Storable> Mapping<K1, Mapping<K2, V>> {
    /// Reads the value of a nested mapping entry at `(key1, key2)`.
    #[inline]
    pub fn read_nested<S: StorageOps>(&self, storage: &mut S, key1: K1, key2: K2) -> Result<V> {
        let slot = double_mapping_slot(
            key1.as_storage_bytes(),
            key2.as_storage_bytes(),
            self.base_slot,
        );
        V::load(storage, slot)
    }

    /// Writes the value of a nested mapping entry at `(key1, key2)`.
    #[inline]
    pub fn write_nested<S: StorageOps>(
        &self,
        storage: &mut S,
        key1: K1,
        key2: K2,
        value: V,
    ) -> Result<()> {
        let slot = double_mapping_slot(
            key1.as_storage_bytes(),
            key2.as_storage_bytes(),
            self.base_slot,
        );
        value.store(storage, slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{Address, B256};
    use crate::storage::{PrecompileStorageProvider, hashmap::HashMapStorageProvider};

    // Test helper that implements StorageOps
    struct TestContract<'a> {
        address: Address,
        storage: &'a mut HashMapStorageProvider,
    }

    impl StorageOps for TestContract<'_> {
        fn sstore(&mut self, slot: U256, value: U256) -> Result<()> {
            self.storage.sstore(self.address, slot, value)
        }

        fn sload(&mut self, slot: U256) -> Result<U256> {
            self.storage.sload(self.address, slot)
        }
    }

    fn setup<'a>(storage: &'a mut HashMapStorageProvider) -> TestContract<'a> {
        TestContract {
            address: Address::repeat_byte(0xC0),
            storage,
        }
    }

    const BALANCES: Mapping<Address, U256> = Mapping::new(U256::from_limbs([10, 0, 0, 0]));
    const ALLOWANCES: Mapping<Address, Mapping<Address, U256>> =
        Mapping::new(U256::from_limbs([11, 0, 0, 0]));

    #[test]
    fn test_mapping_read_write_balances() {
        let mut storage = HashMapStorageProvider::new(1);
        let mut contract = setup(&mut storage);
        let user1 = Address::repeat_byte(0x01);
        let user2 = Address::repeat_byte(0x02);

        BALANCES.write(&mut contract, user1, U256::from(1000)).unwrap();
        BALANCES.write(&mut contract, user2, U256::from(2000)).unwrap();

        assert_eq!(BALANCES.read(&mut contract, user1).unwrap(), U256::from(1000));
        assert_eq!(BALANCES.read(&mut contract, user2).unwrap(), U256::from(2000));
    }

    #[test]
    fn test_mapping_read_default_is_zero() {
        let mut storage = HashMapStorageProvider::new(1);
        let mut contract = setup(&mut storage);

        let balance = BALANCES.read(&mut contract, Address::repeat_byte(0x09)).unwrap();
        assert_eq!(balance, U256::ZERO);
    }

    #[test]
    fn test_mapping_overwrite() {
        let mut storage = HashMapStorageProvider::new(1);
        let mut contract = setup(&mut storage);
        let user = Address::repeat_byte(0x01);

        BALANCES.write(&mut contract, user, U256::from(100)).unwrap();
        assert_eq!(BALANCES.read(&mut contract, user), Ok(U256::from(100)));

        BALANCES.write(&mut contract, user, U256::from(200)).unwrap();
        assert_eq!(BALANCES.read(&mut contract, user), Ok(U256::from(200)));
    }

    #[test]
    fn test_nested_mapping_read_write_allowances() {
        let mut storage = HashMapStorageProvider::new(1);
        let mut contract = setup(&mut storage);
        let owner = Address::repeat_byte(0x01);
        let spender1 = Address::repeat_byte(0x02);
        let spender2 = Address::repeat_byte(0x03);

        ALLOWANCES
            .write_nested(&mut contract, owner, spender1, U256::from(500))
            .unwrap();
        ALLOWANCES
            .write_nested(&mut contract, owner, spender2, U256::from(1500))
            .unwrap();

        assert_eq!(
            ALLOWANCES.read_nested(&mut contract, owner, spender1).unwrap(),
            U256::from(500)
        );
        assert_eq!(
            ALLOWANCES.read_nested(&mut contract, owner, spender2).unwrap(),
            U256::from(1500)
        );
    }

    #[test]
    fn test_nested_mapping_independence() {
        let mut storage = HashMapStorageProvider::new(1);
        let mut contract = setup(&mut storage);
        let owner1 = Address::repeat_byte(0x01);
        let owner2 = Address::repeat_byte(0x02);
        let spender = Address::repeat_byte(0x03);

        ALLOWANCES
            .write_nested(&mut contract, owner1, spender, U256::from(100))
            .unwrap();

        // owner2 -> spender lives in an independent slot
        assert_eq!(
            ALLOWANCES.read_nested(&mut contract, owner2, spender).unwrap(),
            U256::ZERO
        );
        assert_eq!(
            ALLOWANCES.read_nested(&mut contract, owner1, spender).unwrap(),
            U256::from(100)
        );
    }

    #[test]
    fn test_mapping_with_different_key_types() {
        let mut storage = HashMapStorageProvider::new(1);
        let mut contract = setup(&mut storage);

        const FLAGS: Mapping<B256, bool> = Mapping::new(U256::from_limbs([13, 0, 0, 0]));
        let key = B256::repeat_byte(0x44);

        FLAGS.write(&mut contract, key, true).unwrap();
        assert!(FLAGS.read(&mut contract, key).unwrap());
        assert!(!FLAGS.read(&mut contract, B256::repeat_byte(0x45)).unwrap());

        const OWNERS: Mapping<U256, Address> = Mapping::new(U256::from_limbs([14, 0, 0, 0]));
        let owner = Address::repeat_byte(0x66);

        OWNERS.write(&mut contract, U256::from(7), owner).unwrap();
        assert_eq!(OWNERS.read(&mut contract, U256::from(7)).unwrap(), owner);
        assert_eq!(
            OWNERS.read(&mut contract, U256::from(8)).unwrap(),
            Address::ZERO
        );
    }
}
