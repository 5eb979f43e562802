//! # Payload Field Values
//!
//! Payload JSON is untyped; the codec narrows each value to the closed
//! [`FieldValue`] union at the boundary and rejects every other shape. Nothing
//! past this module handles a raw `serde_json::Value` as a slot input.

use num_bigint::BigUint;
use num_traits::FromPrimitive;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::error::CodecError;

/// A payload value that is losslessly a non-negative integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// A JSON string of ASCII decimal digits.
    DecimalString(BigUint),
    /// A JSON number with an integral, non-negative value.
    JsonNumber(BigUint),
    /// A JSON number read under the legacy dialect: fixed-width 32 bits.
    LegacyUint32(u32),
}

/// How JSON numbers are narrowed.
///
/// Decimal strings are unaffected; they are always arbitrary-width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberEncoding {
    /// Arbitrary-width integer, minimal little-endian bytes.
    #[default]
    Minimal,
    /// Unsigned 32-bit integer, always four little-endian bytes.
    LegacyUint32,
}

impl FieldValue {
    /// Narrow a JSON value taken from payload field `field`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnsupportedFieldType`] for booleans, null, arrays,
    /// objects, negative or fractional numbers, strings that are not plain
    /// decimal digits, and (under [`NumberEncoding::LegacyUint32`]) numbers
    /// that do not fit in 32 bits.
    pub fn from_json(
        field: &str,
        value: &Value,
        encoding: NumberEncoding,
    ) -> Result<Self, CodecError> {
        match value {
            Value::String(s) => parse_decimal(field, s).map(FieldValue::DecimalString),
            Value::Number(n) => {
                let big = number_to_biguint(field, n)?;
                match encoding {
                    NumberEncoding::Minimal => Ok(FieldValue::JsonNumber(big)),
                    NumberEncoding::LegacyUint32 => u32::try_from(&big)
                        .map(FieldValue::LegacyUint32)
                        .map_err(|_| {
                            CodecError::unsupported(field, format!("{n} does not fit in 32 bits"))
                        }),
                }
            }
            Value::Bool(_) => Err(CodecError::unsupported(field, "boolean")),
            Value::Null => Err(CodecError::unsupported(field, "null")),
            Value::Array(_) => Err(CodecError::unsupported(field, "array")),
            Value::Object(_) => Err(CodecError::unsupported(field, "object")),
        }
    }
}

fn parse_decimal(field: &str, s: &str) -> Result<BigUint, CodecError> {
    // BigUint's parser also accepts '+' and '_', which are not valid here.
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CodecError::unsupported(
            field,
            format!("string '{s}' is not a non-negative decimal integer"),
        ));
    }
    s.parse::<BigUint>()
        .map_err(|e| CodecError::unsupported(field, format!("string '{s}': {e}")))
}

fn number_to_biguint(field: &str, n: &Number) -> Result<BigUint, CodecError> {
    if let Some(u) = n.as_u64() {
        return Ok(BigUint::from(u));
    }
    if n.is_i64() {
        return Err(CodecError::unsupported(field, format!("negative number {n}")));
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f >= 0.0 && f.fract() == 0.0 => BigUint::from_f64(f)
            .ok_or_else(|| CodecError::unsupported(field, format!("number {n} is not representable"))),
        Some(f) if f < 0.0 => Err(CodecError::unsupported(field, format!("negative number {n}"))),
        _ => Err(CodecError::unsupported(field, format!("non-integral number {n}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal(v: Value) -> Result<FieldValue, CodecError> {
        FieldValue::from_json("f", &v, NumberEncoding::Minimal)
    }

    #[test]
    fn decimal_string_accepted() {
        let v = minimal(json!("123456789012345678901234567890")).unwrap();
        match v {
            FieldValue::DecimalString(n) => {
                assert_eq!(n.to_string(), "123456789012345678901234567890")
            }
            other => panic!("expected DecimalString, got {other:?}"),
        }
    }

    #[test]
    fn decimal_string_with_sign_or_separator_rejected() {
        for s in ["+5", "-5", "1_000", "", " 7", "0x10", "1.5"] {
            assert!(
                matches!(minimal(json!(s)), Err(CodecError::UnsupportedFieldType { .. })),
                "accepted {s:?}"
            );
        }
    }

    #[test]
    fn integral_float_accepted() {
        let v = minimal(json!(1996.0)).unwrap();
        assert_eq!(v, FieldValue::JsonNumber(BigUint::from(1996u32)));
    }

    #[test]
    fn large_float_keeps_exact_value() {
        let v = minimal(json!(1e20)).unwrap();
        let expected: BigUint = "100000000000000000000".parse().unwrap();
        assert_eq!(v, FieldValue::JsonNumber(expected));
    }

    #[test]
    fn fractional_and_negative_numbers_rejected() {
        assert!(minimal(json!(1.5)).is_err());
        assert!(minimal(json!(-1)).is_err());
        assert!(minimal(json!(-2.0)).is_err());
    }

    #[test]
    fn non_scalar_shapes_rejected_with_field_name() {
        for v in [json!(true), json!(null), json!([1]), json!({"a": 1})] {
            let err = FieldValue::from_json("isAdult", &v, NumberEncoding::Minimal).unwrap_err();
            match err {
                CodecError::UnsupportedFieldType { field, .. } => assert_eq!(field, "isAdult"),
                other => panic!("unexpected error {other:?}"),
            }
        }
    }

    #[test]
    fn legacy_encoding_narrows_to_u32() {
        let v = FieldValue::from_json("f", &json!(24), NumberEncoding::LegacyUint32).unwrap();
        assert_eq!(v, FieldValue::LegacyUint32(24));
    }

    #[test]
    fn legacy_encoding_rejects_wide_numbers() {
        let err = FieldValue::from_json("f", &json!(4_294_967_296u64), NumberEncoding::LegacyUint32)
            .unwrap_err();
        assert!(format!("{err}").contains("32 bits"));
    }

    #[test]
    fn legacy_encoding_leaves_strings_arbitrary_width() {
        let v = FieldValue::from_json("f", &json!("4294967296"), NumberEncoding::LegacyUint32)
            .unwrap();
        assert!(matches!(v, FieldValue::DecimalString(_)));
    }
}
