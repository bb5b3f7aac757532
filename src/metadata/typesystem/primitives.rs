use strum::Display;

use crate::metadata::token::Token;

/// Represents all primitive types the runtime knows (without data)
///
/// Every kind maps to a fixed artificial token in the `0xF000_xxxx` range so
/// primitives can be compared by identity like any other type, without having
/// a metadata row of their own.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// System.Void - represents no value
    #[strum(serialize = "void")]
    Void,
    /// System.Boolean - true/false value
    #[strum(serialize = "bool")]
    Boolean,
    /// System.Char - Unicode 16-bit character
    #[strum(serialize = "char")]
    Char,
    /// System.SByte - signed 8-bit integer
    #[strum(serialize = "int8")]
    I1,
    /// System.Byte - unsigned 8-bit integer
    #[strum(serialize = "uint8")]
    U1,
    /// System.Int16 - signed 16-bit integer
    #[strum(serialize = "int16")]
    I2,
    /// System.UInt16 - unsigned 16-bit integer
    #[strum(serialize = "uint16")]
    U2,
    /// System.Int32 - signed 32-bit integer
    #[strum(serialize = "int32")]
    I4,
    /// System.UInt32 - unsigned 32-bit integer
    #[strum(serialize = "uint32")]
    U4,
    /// System.Int64 - signed 64-bit integer
    #[strum(serialize = "int64")]
    I8,
    /// System.UInt64 - unsigned 64-bit integer
    #[strum(serialize = "uint64")]
    U8,
    /// System.Single - 32-bit floating point
    #[strum(serialize = "float32")]
    R4,
    /// System.Double - 64-bit floating point
    #[strum(serialize = "float64")]
    R8,
    /// System.IntPtr - native sized signed integer
    #[strum(serialize = "native int")]
    I,
    /// System.UIntPtr - native sized unsigned integer
    #[strum(serialize = "native uint")]
    U,
    /// System.String - immutable string of Unicode characters
    #[strum(serialize = "string")]
    String,
    /// System.Object - base class for all reference types
    #[strum(serialize = "object")]
    Object,
}

impl PrimitiveKind {
    /// Get the artificial identity token for this primitive
    #[must_use]
    pub fn token(&self) -> Token {
        Token::new(match self {
            PrimitiveKind::Void => 0xF000_0001,
            PrimitiveKind::Boolean => 0xF000_0002,
            PrimitiveKind::Char => 0xF000_0003,
            PrimitiveKind::I1 => 0xF000_0004,
            PrimitiveKind::U1 => 0xF000_0005,
            PrimitiveKind::I2 => 0xF000_0006,
            PrimitiveKind::U2 => 0xF000_0007,
            PrimitiveKind::I4 => 0xF000_0008,
            PrimitiveKind::U4 => 0xF000_0009,
            PrimitiveKind::I8 => 0xF000_000A,
            PrimitiveKind::U8 => 0xF000_000B,
            PrimitiveKind::R4 => 0xF000_000C,
            PrimitiveKind::R8 => 0xF000_000D,
            PrimitiveKind::I => 0xF000_000E,
            PrimitiveKind::U => 0xF000_000F,
            PrimitiveKind::String => 0xF000_0010,
            PrimitiveKind::Object => 0xF000_0011,
        })
    }

    /// All kinds, in registration order.
    pub(crate) const ALL: [PrimitiveKind; 17] = [
        PrimitiveKind::Void,
        PrimitiveKind::Boolean,
        PrimitiveKind::Char,
        PrimitiveKind::I1,
        PrimitiveKind::U1,
        PrimitiveKind::I2,
        PrimitiveKind::U2,
        PrimitiveKind::I4,
        PrimitiveKind::U4,
        PrimitiveKind::I8,
        PrimitiveKind::U8,
        PrimitiveKind::R4,
        PrimitiveKind::R8,
        PrimitiveKind::I,
        PrimitiveKind::U,
        PrimitiveKind::String,
        PrimitiveKind::Object,
    ];

    /// Namespace-qualified runtime name (e.g. `System.Int32`)
    #[must_use]
    pub const fn runtime_name(&self) -> &'static str {
        match self {
            PrimitiveKind::Void => "Void",
            PrimitiveKind::Boolean => "Boolean",
            PrimitiveKind::Char => "Char",
            PrimitiveKind::I1 => "SByte",
            PrimitiveKind::U1 => "Byte",
            PrimitiveKind::I2 => "Int16",
            PrimitiveKind::U2 => "UInt16",
            PrimitiveKind::I4 => "Int32",
            PrimitiveKind::U4 => "UInt32",
            PrimitiveKind::I8 => "Int64",
            PrimitiveKind::U8 => "UInt64",
            PrimitiveKind::R4 => "Single",
            PrimitiveKind::R8 => "Double",
            PrimitiveKind::I => "IntPtr",
            PrimitiveKind::U => "UIntPtr",
            PrimitiveKind::String => "String",
            PrimitiveKind::Object => "Object",
        }
    }

    /// Whether this kind belongs to the convertible family.
    ///
    /// The convertible family is the fixed-width integer/float/bool/char set
    /// plus `String` - mirroring the runtime's `IConvertible`. Native-sized
    /// integers and `Object` are not convertible. Note that `String` being
    /// convertible does NOT make it reinterpretable; reconciliation excludes
    /// it explicitly.
    #[must_use]
    pub const fn is_convertible(&self) -> bool {
        matches!(
            self,
            PrimitiveKind::Boolean
                | PrimitiveKind::Char
                | PrimitiveKind::I1
                | PrimitiveKind::U1
                | PrimitiveKind::I2
                | PrimitiveKind::U2
                | PrimitiveKind::I4
                | PrimitiveKind::U4
                | PrimitiveKind::I8
                | PrimitiveKind::U8
                | PrimitiveKind::R4
                | PrimitiveKind::R8
                | PrimitiveKind::String
        )
    }

    /// Size in bytes of this kind's value representation.
    ///
    /// Returns `None` for kinds without a fixed width (`Void`, `String`,
    /// `Object`, native-sized integers).
    #[must_use]
    pub const fn byte_width(&self) -> Option<usize> {
        match self {
            PrimitiveKind::Boolean | PrimitiveKind::I1 | PrimitiveKind::U1 => Some(1),
            PrimitiveKind::Char | PrimitiveKind::I2 | PrimitiveKind::U2 => Some(2),
            PrimitiveKind::I4 | PrimitiveKind::U4 | PrimitiveKind::R4 => Some(4),
            PrimitiveKind::I8 | PrimitiveKind::U8 | PrimitiveKind::R8 => Some(8),
            PrimitiveKind::Void
            | PrimitiveKind::I
            | PrimitiveKind::U
            | PrimitiveKind::String
            | PrimitiveKind::Object => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_unique() {
        for (i, a) in PrimitiveKind::ALL.iter().enumerate() {
            for b in &PrimitiveKind::ALL[i + 1..] {
                assert_ne!(a.token(), b.token());
            }
        }
    }

    #[test]
    fn test_convertible_family() {
        assert!(PrimitiveKind::I4.is_convertible());
        assert!(PrimitiveKind::R8.is_convertible());
        assert!(PrimitiveKind::Boolean.is_convertible());
        // String is IConvertible but never reinterpretable
        assert!(PrimitiveKind::String.is_convertible());
        assert!(!PrimitiveKind::Object.is_convertible());
        assert!(!PrimitiveKind::I.is_convertible());
        assert!(!PrimitiveKind::Void.is_convertible());
    }

    #[test]
    fn test_display_uses_cil_names() {
        assert_eq!(PrimitiveKind::I4.to_string(), "int32");
        assert_eq!(PrimitiveKind::R4.to_string(), "float32");
        assert_eq!(PrimitiveKind::String.to_string(), "string");
    }
}
