use alloy::primitives::{Address, B256, U256};
use revm::interpreter::instructions::utility::{IntoAddress, IntoU256};

use crate::{
    error::{LyraPrecompileError, Result},
    storage::StorageOps,
};

/// Trait for types that can be used as storage mapping keys.
///
/// Keys are hashed using keccak256 along with the mapping's base slot
/// to determine the final storage location. This trait provides the
/// byte representation used in that hash.
pub trait StorageKey {
    fn as_storage_bytes(&self) -> impl AsRef<[u8]>;
}

/// Trait for single-word values that can be stored/loaded from EVM storage.
///
/// Every implementor occupies exactly one 32-byte slot; values smaller than a
/// word are right-aligned in it, the way solc packs lone value types.
///
/// Implementations must ensure round-trips preserve data:
/// `from_evm_word(to_evm_word(x)) == Ok(x)`.
pub trait Storable: Sized {
    /// Encode this value into a storage word.
    fn to_evm_word(&self) -> U256;

    /// Decode this value from a storage word.
    ///
    /// # Errors
    ///
    /// Returns an error if the word cannot represent a value of this type.
    fn from_evm_word(word: U256) -> Result<Self>;

    /// Load this value from storage at the given slot.
    fn load<S: StorageOps>(storage: &mut S, slot: U256) -> Result<Self> {
        Self::from_evm_word(storage.sload(slot)?)
    }

    /// Store this value to storage at the given slot.
    fn store<S: StorageOps>(&self, storage: &mut S, slot: U256) -> Result<()> {
        storage.sstore(slot, self.to_evm_word())
    }
}

// -- STORAGE KEY IMPLEMENTATIONS ---------------------------------------------

impl StorageKey for Address {
    #[inline]
    fn as_storage_bytes(&self) -> impl AsRef<[u8]> {
        self.as_slice()
    }
}

impl StorageKey for B256 {
    #[inline]
    fn as_storage_bytes(&self) -> impl AsRef<[u8]> {
        self.as_slice()
    }
}

impl StorageKey for U256 {
    #[inline]
    fn as_storage_bytes(&self) -> impl AsRef<[u8]> {
        self.to_be_bytes::<32>()
    }
}

// -- STORABLE IMPLEMENTATIONS -------------------------------------------------

impl Storable for bool {
    #[inline]
    fn to_evm_word(&self) -> U256 {
        if *self { U256::ONE } else { U256::ZERO }
    }

    #[inline]
    fn from_evm_word(word: U256) -> Result<Self> {
        Ok(word != U256::ZERO)
    }
}

impl Storable for Address {
    #[inline]
    fn to_evm_word(&self) -> U256 {
        self.into_u256()
    }

    #[inline]
    fn from_evm_word(word: U256) -> Result<Self> {
        Ok(word.into_address())
    }
}

impl Storable for B256 {
    #[inline]
    fn to_evm_word(&self) -> U256 {
        U256::from_be_bytes(self.0)
    }

    #[inline]
    fn from_evm_word(word: U256) -> Result<Self> {
        Ok(Self::new(word.to_be_bytes::<32>()))
    }
}

impl Storable for U256 {
    #[inline]
    fn to_evm_word(&self) -> U256 {
        *self
    }

    #[inline]
    fn from_evm_word(word: U256) -> Result<Self> {
        Ok(word)
    }
}

impl Storable for u64 {
    #[inline]
    fn to_evm_word(&self) -> U256 {
        U256::from(*self)
    }

    #[inline]
    fn from_evm_word(word: U256) -> Result<Self> {
        Self::try_from(word).map_err(|_| {
            LyraPrecompileError::Fatal("storage word out of range for u64".to_string())
        })
    }
}
