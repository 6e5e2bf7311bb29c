//! Field conversion capabilities — one raw string segment to one typed value.
//!
//! Three dispatch kinds cover every column: [`EnumField`] for named-variant
//! enums, [`CustomField`] for types with their own parse routine, and
//! [`FieldConvert`] for primitives and anything else with a registered
//! string conversion. None of them panic on bad input; every failure is a
//! [`ConvertError`] the mapper turns into a field error on the record.

use crate::error::ConvertError;

/// String-to-value conversion for the Generic column kind.
///
/// Implemented for the primitive types below; implement it for your own
/// types to make them usable with [`ColumnSpec::generic`].
///
/// [`ColumnSpec::generic`]: crate::schema::ColumnSpec::generic
pub trait FieldConvert: Sized {
    fn convert(raw: &str) -> Result<Self, ConvertError>;
}

macro_rules! convert_via_from_str {
    ($($ty:ty => $name:literal),* $(,)?) => {$(
        impl FieldConvert for $ty {
            fn convert(raw: &str) -> Result<Self, ConvertError> {
                raw.parse::<$ty>().map_err(|e| ConvertError::InvalidValue {
                    target: $name,
                    raw: raw.to_string(),
                    reason: e.to_string(),
                })
            }
        }
    )*};
}

convert_via_from_str! {
    i8 => "i8", i16 => "i16", i32 => "i32", i64 => "i64", i128 => "i128",
    u8 => "u8", u16 => "u16", u32 => "u32", u64 => "u64", u128 => "u128",
    isize => "isize", usize => "usize",
    f32 => "f32", f64 => "f64",
    char => "char",
}

impl FieldConvert for String {
    fn convert(raw: &str) -> Result<Self, ConvertError> {
        Ok(raw.to_string())
    }
}

/// Case-insensitive, so that "True"/"FALSE" style file content parses.
impl FieldConvert for bool {
    fn convert(raw: &str) -> Result<Self, ConvertError> {
        if raw.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if raw.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(ConvertError::InvalidValue {
                target: "bool",
                raw: raw.to_string(),
                reason: "expected true or false".to_string(),
            })
        }
    }
}

/// Named-variant enum conversion for the Enum column kind.
///
/// Input is accepted either as a numeric ordinal or as a case-insensitive
/// variant name. Ordinals with no matching variant are rejected.
pub trait EnumField: Sized {
    /// Variant (name, ordinal) pairs in declaration order.
    fn variants() -> &'static [(&'static str, i64)];

    /// Construct from a numeric ordinal; `None` when no variant matches.
    fn from_ordinal(ordinal: i64) -> Option<Self>;

    /// Parse one raw segment. Blank input (after default substitution) is an
    /// invalid enum value.
    fn parse_field(raw: &str) -> Result<Self, ConvertError> {
        if is_blank(raw) {
            return Err(ConvertError::InvalidEnumValue);
        }
        if let Ok(ordinal) = raw.parse::<i64>() {
            return Self::from_ordinal(ordinal).ok_or(ConvertError::UnknownOrdinal { ordinal });
        }
        match Self::variants()
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(raw))
        {
            Some((_, ordinal)) => {
                Self::from_ordinal(*ordinal).ok_or(ConvertError::UnknownOrdinal { ordinal: *ordinal })
            }
            None => Err(ConvertError::UnknownVariant {
                name: raw.to_string(),
            }),
        }
    }
}

/// Type-specific parse capability for the Custom column kind.
pub trait CustomField: Sized {
    /// Parse one raw segment into an instance. The error message is carried
    /// onto the record verbatim.
    fn parse(raw: &str) -> Result<Self, ConvertError>;
}

/// Empty or whitespace-only.
pub(crate) fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Tier {
        None,
        Paid,
        Free,
    }

    impl EnumField for Tier {
        fn variants() -> &'static [(&'static str, i64)] {
            &[("None", 0), ("Paid", 1), ("Free", 2)]
        }

        fn from_ordinal(ordinal: i64) -> Option<Self> {
            match ordinal {
                0 => Some(Tier::None),
                1 => Some(Tier::Paid),
                2 => Some(Tier::Free),
                _ => None,
            }
        }
    }

    #[test]
    fn enum_parses_name_case_insensitively() {
        assert_eq!(Tier::parse_field("Free").unwrap(), Tier::Free);
        assert_eq!(Tier::parse_field("paid").unwrap(), Tier::Paid);
        assert_eq!(Tier::parse_field("NONE").unwrap(), Tier::None);
    }

    #[test]
    fn enum_parses_numeric_ordinal() {
        assert_eq!(Tier::parse_field("2").unwrap(), Tier::Free);
        assert_eq!(Tier::parse_field("0").unwrap(), Tier::None);
    }

    #[test]
    fn enum_rejects_unknown_ordinal() {
        let err = Tier::parse_field("7").unwrap_err();
        assert_eq!(err, ConvertError::UnknownOrdinal { ordinal: 7 });
    }

    #[test]
    fn enum_rejects_unknown_name() {
        let err = Tier::parse_field("Gold").unwrap_err();
        assert!(matches!(err, ConvertError::UnknownVariant { .. }));
    }

    #[test]
    fn enum_blank_is_invalid_enum_value() {
        assert_eq!(Tier::parse_field("").unwrap_err(), ConvertError::InvalidEnumValue);
        assert_eq!(Tier::parse_field("   ").unwrap_err(), ConvertError::InvalidEnumValue);
    }

    #[test]
    fn bool_accepts_mixed_case() {
        assert!(bool::convert("True").unwrap());
        assert!(!bool::convert("FALSE").unwrap());
        assert!(bool::convert("yes").is_err());
    }

    #[test]
    fn numeric_error_carries_raw_value() {
        let err = i32::convert("abc").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("i32"));
        assert!(msg.contains("abc"));
    }

    #[test]
    fn string_accepts_anything_including_empty() {
        assert_eq!(String::convert("").unwrap(), "");
        assert_eq!(String::convert("x y").unwrap(), "x y");
    }
}
