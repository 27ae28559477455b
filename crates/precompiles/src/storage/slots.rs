//! Solidity-compatible storage slot derivation.
//!
//! Mapping entries live where solc would place them, so the layout of a
//! precompile stays inspectable with standard tooling: the entry for key `k`
//! of a mapping at base slot `p` is `keccak256(pad32(k) ++ pad32(p))`.

use alloy::primitives::{U256, keccak256};

/// Storage slot of a mapping entry.
///
/// `key` must be at most 32 bytes; it is left-padded to a full word, matching
/// `abi.encode` of value-type keys.
pub fn mapping_slot(key: impl AsRef<[u8]>, base_slot: U256) -> U256 {
    let key = key.as_ref();
    debug_assert!(key.len() <= 32, "mapping keys are at most one EVM word");

    let mut buf = [0u8; 64];
    buf[32 - key.len()..32].copy_from_slice(key);
    buf[32..].copy_from_slice(&base_slot.to_be_bytes::<32>());
    U256::from_be_bytes(keccak256(buf).0)
}

/// Storage slot of a nested (double) mapping entry:
/// `keccak256(pad32(k2) ++ keccak256(pad32(k1) ++ pad32(p)))`.
pub fn double_mapping_slot(
    key1: impl AsRef<[u8]>,
    key2: impl AsRef<[u8]>,
    base_slot: U256,
) -> U256 {
    mapping_slot(key2, mapping_slot(key1, base_slot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{Address, B256};
    use proptest::prelude::*;

    fn arb_word() -> impl Strategy<Value = U256> {
        any::<[u64; 4]>().prop_map(U256::from_limbs)
    }

    proptest! {
        #[test]
        fn slot_derivation_is_deterministic(key in any::<[u8; 32]>(), base in arb_word()) {
            prop_assert_eq!(mapping_slot(key, base), mapping_slot(key, base));
        }

        #[test]
        fn distinct_keys_get_distinct_slots(
            key1 in any::<[u8; 32]>(),
            key2 in any::<[u8; 32]>(),
            base in arb_word(),
        ) {
            prop_assume!(key1 != key2);
            prop_assert_ne!(mapping_slot(key1, base), mapping_slot(key2, base));
        }

        #[test]
        fn distinct_base_slots_do_not_collide(key in any::<[u8; 32]>(), base in arb_word()) {
            prop_assume!(base != U256::MAX);
            prop_assert_ne!(mapping_slot(key, base), mapping_slot(key, base + U256::ONE));
        }

        #[test]
        fn nested_slot_is_composition_of_single_slots(
            role in any::<[u8; 32]>(),
            account in any::<[u8; 20]>(),
            base in arb_word(),
        ) {
            let role = B256::from(role);
            let account = Address::from(account);
            prop_assert_eq!(
                double_mapping_slot(role, account, base),
                mapping_slot(account, mapping_slot(role, base)),
            );
        }
    }

    // Short keys are padded like abi.encode of the corresponding value type,
    // so a 20-byte address key and its 32-byte left-padded form agree.
    #[test]
    fn address_keys_are_left_padded() {
        let address = Address::repeat_byte(0x11);
        let padded: B256 = address.into_word();
        assert_eq!(
            mapping_slot(address, U256::from(7)),
            mapping_slot(padded, U256::from(7)),
        );
    }
}
