use std::marker::PhantomData;

use alloy::primitives::U256;

use crate::{
    error::Result,
    storage::{Storable, StorageOps},
};

/// A typed handle to a single 32-byte storage slot.
///
/// `Slot<T>` marks a field as occupying one EVM storage slot at a fixed
/// location. Contracts declare their layout as `const` slot handles next to a
/// `slots` module of base slot numbers, mirroring the order of the equivalent
/// Solidity contract's fields.
///
/// ```ignore
/// mod slots {
///     pub const TOTAL_SUPPLY: U256 = U256::ZERO;
/// }
/// const TOTAL_SUPPLY: Slot<U256> = Slot::new(slots::TOTAL_SUPPLY);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Slot<T> {
    slot: U256,
    _phantom: PhantomData<T>,
}

impl<T> Slot<T> {
    #[inline]
    pub const fn new(slot: U256) -> Self {
        Self {
            slot,
            _phantom: PhantomData,
        }
    }

    /// Returns the storage slot number this handle points at.
    #[inline]
    pub const fn slot(&self) -> U256 {
        self.slot
    }
}

impl<T: Storable> Slot<T> {
    /// Reads the value stored at this slot.
    #[inline]
    pub fn read<S: StorageOps>(&self, storage: &mut S) -> Result<T> {
        T::load(storage, self.slot)
    }

    /// Writes a value to this slot.
    #[inline]
    pub fn write<S: StorageOps>(&self, storage: &mut S, value: T) -> Result<()> {
        value.store(storage, self.slot)
    }
}
