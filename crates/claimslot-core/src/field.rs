//! # Field Arithmetic Primitives
//!
//! Everything that crosses into a claim slot is an unsigned integer strictly
//! below the BN254 scalar-field modulus
//! `q = 21888242871839275222246405745257275088548364400416034343698204186575808495617`.
//! Slot contents are little-endian byte strings, so "fits in the field" means
//! the little-endian reading of the bytes is `< q`.
//!
//! ## Security Invariant
//!
//! [`fits_in_field`] is the sole overflow gate for sequential packing and
//! [`is_within_field`] the gate for explicit assignment. No byte sequence is
//! committed to a slot without passing one of them. Both also reject
//! sequences longer than [`SLOT_WIDTH`], since the physical claim has exactly
//! 32 bytes per slot.

use std::sync::OnceLock;

use num_bigint::BigUint;
use num_traits::Zero;

use crate::value::FieldValue;

/// Width of one physical claim slot in bytes.
pub const SLOT_WIDTH: usize = 32;

/// Decimal rendering of the scalar-field modulus.
pub const FIELD_MODULUS_DECIMAL: &str =
    "21888242871839275222246405745257275088548364400416034343698204186575808495617";

/// The modulus `q` as 32 little-endian bytes.
const FIELD_MODULUS_LE: [u8; SLOT_WIDTH] = [
    0x01, 0x00, 0x00, 0xf0, 0x93, 0xf5, 0xe1, 0x43, 0x91, 0x70, 0xb9, 0x79, 0x48, 0xe8, 0x33, 0x28,
    0x5d, 0x58, 0x81, 0x81, 0xb6, 0x45, 0x50, 0xb8, 0x29, 0xa0, 0x31, 0xe1, 0x72, 0x4e, 0x64, 0x30,
];

/// The scalar-field modulus `q`.
pub fn field_modulus() -> &'static BigUint {
    static MODULUS: OnceLock<BigUint> = OnceLock::new();
    MODULUS.get_or_init(|| BigUint::from_bytes_le(&FIELD_MODULUS_LE))
}

/// Little-endian byte encoding of a field value.
///
/// Decimal strings and JSON numbers use the minimal encoding, so zero is the
/// empty sequence. Legacy 32-bit values always occupy four bytes.
pub fn to_field_bytes(value: &FieldValue) -> Vec<u8> {
    match value {
        FieldValue::DecimalString(n) | FieldValue::JsonNumber(n) => minimal_le_bytes(n),
        FieldValue::LegacyUint32(v) => v.to_le_bytes().to_vec(),
    }
}

/// Shortest little-endian encoding of `n`; empty for zero.
pub fn minimal_le_bytes(n: &BigUint) -> Vec<u8> {
    if n.is_zero() {
        Vec::new()
    } else {
        n.to_bytes_le()
    }
}

/// Returns `true` if `existing ++ candidate`, read little-endian, is below `q`
/// and still fits in one slot.
pub fn fits_in_field(existing: &[u8], candidate: &[u8]) -> bool {
    if existing.len() + candidate.len() > SLOT_WIDTH {
        return false;
    }
    let mut joined = Vec::with_capacity(existing.len() + candidate.len());
    joined.extend_from_slice(existing);
    joined.extend_from_slice(candidate);
    is_within_field(&joined)
}

/// Returns `true` if `data`, read little-endian, is below `q` and fits in one
/// slot.
pub fn is_within_field(data: &[u8]) -> bool {
    data.len() <= SLOT_WIDTH && BigUint::from_bytes_le(data) < *field_modulus()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn modulus_matches_decimal_constant() {
        let parsed: BigUint = FIELD_MODULUS_DECIMAL.parse().unwrap();
        assert_eq!(field_modulus(), &parsed);
    }

    #[test]
    fn modulus_itself_is_out_of_field() {
        assert!(!is_within_field(&FIELD_MODULUS_LE));
    }

    #[test]
    fn modulus_minus_one_is_in_field() {
        let mut bytes = FIELD_MODULUS_LE;
        bytes[0] = 0x00;
        assert!(is_within_field(&bytes));
    }

    #[test]
    fn empty_is_in_field() {
        assert!(is_within_field(&[]));
        assert!(fits_in_field(&[], &[]));
    }

    #[test]
    fn all_ones_32_bytes_overflows() {
        assert!(!is_within_field(&[0xff; 32]));
    }

    #[test]
    fn longer_than_slot_is_rejected_even_when_small() {
        // 33 bytes whose value is 1.
        let mut bytes = vec![0u8; 33];
        bytes[0] = 1;
        assert!(!is_within_field(&bytes));
        assert!(!fits_in_field(&[0u8; 30], &[0u8; 3]));
    }

    #[test]
    fn fits_concatenates_in_order() {
        // 31 zero bytes followed by 0x30 is 0x30 << 248, which is below q.
        assert!(fits_in_field(&[0u8; 31], &[0x30]));
        // 0x31 << 248 is above q.
        assert!(!fits_in_field(&[0u8; 31], &[0x31]));
    }

    #[test]
    fn to_field_bytes_minimal_encoding() {
        let v = FieldValue::JsonNumber(BigUint::from(1996u32));
        assert_eq!(to_field_bytes(&v), vec![0xcc, 0x07]);
    }

    #[test]
    fn zero_encodes_as_empty() {
        let z = FieldValue::DecimalString(BigUint::from(0u32));
        assert!(to_field_bytes(&z).is_empty());
        let z = FieldValue::JsonNumber(BigUint::zero());
        assert!(to_field_bytes(&z).is_empty());
        assert_eq!(to_field_bytes(&FieldValue::LegacyUint32(0)), vec![0, 0, 0, 0]);
    }

    #[test]
    fn to_field_bytes_legacy_is_four_bytes() {
        assert_eq!(
            to_field_bytes(&FieldValue::LegacyUint32(24)),
            vec![24, 0, 0, 0]
        );
    }

    proptest! {
        /// The gate agrees with big-integer comparison for every 32-byte input.
        #[test]
        fn within_field_matches_bigint(bytes in prop::collection::vec(any::<u8>(), 0..=32)) {
            let expected = BigUint::from_bytes_le(&bytes) < *field_modulus();
            prop_assert_eq!(is_within_field(&bytes), expected);
        }

        /// Splitting a sequence anywhere does not change the fit verdict.
        #[test]
        fn fits_is_split_invariant(
            bytes in prop::collection::vec(any::<u8>(), 0..=32),
            split in 0usize..=32,
        ) {
            let at = split.min(bytes.len());
            let (a, b) = bytes.split_at(at);
            prop_assert_eq!(fits_in_field(a, b), is_within_field(&bytes));
        }
    }
}
