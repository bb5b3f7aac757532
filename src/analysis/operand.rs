use std::fmt;

use crate::{
    analysis::MethodContext,
    assembly::{emit, IlProcessor, Instruction},
    metadata::{token::Token, typesystem::PrimitiveKind},
    Result,
};

/// Literal payload of a constant operand.
///
/// Payloads carry the raw value in its natural width. Reinterpretation treats
/// the value as a fixed-size binary blob: converting from one kind to another
/// reproduces the same bit pattern reread under the target's numeric format,
/// matching hardware register reinterpretation.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ConstData {
    /// No payload (a constant whose value analysis could not recover)
    #[default]
    None,
    /// Boolean value
    Boolean(bool),
    /// Character value
    Char(char),
    /// 8-bit signed integer
    I1(i8),
    /// 8-bit unsigned integer
    U1(u8),
    /// 16-bit signed integer
    I2(i16),
    /// 16-bit unsigned integer
    U2(u16),
    /// 32-bit signed integer
    I4(i32),
    /// 32-bit unsigned integer
    U4(u32),
    /// 64-bit signed integer
    I8(i64),
    /// 64-bit unsigned integer
    U8(u64),
    /// 32-bit floating point
    R4(f32),
    /// 64-bit floating point
    R8(f64),
    /// String value
    String(String),
}

impl ConstData {
    /// Fill an 8-byte little-endian buffer with this payload's bit pattern.
    ///
    /// Returns `None` for payloads without a fixed-width representation.
    fn to_raw(&self) -> Option<[u8; 8]> {
        let mut raw = [0u8; 8];
        match self {
            ConstData::Boolean(v) => raw[0] = u8::from(*v),
            ConstData::Char(v) => raw[..4].copy_from_slice(&(*v as u32).to_le_bytes()),
            ConstData::I1(v) => raw[..1].copy_from_slice(&v.to_le_bytes()),
            ConstData::U1(v) => raw[..1].copy_from_slice(&v.to_le_bytes()),
            ConstData::I2(v) => raw[..2].copy_from_slice(&v.to_le_bytes()),
            ConstData::U2(v) => raw[..2].copy_from_slice(&v.to_le_bytes()),
            ConstData::I4(v) => raw[..4].copy_from_slice(&v.to_le_bytes()),
            ConstData::U4(v) => raw[..4].copy_from_slice(&v.to_le_bytes()),
            ConstData::I8(v) => raw.copy_from_slice(&v.to_le_bytes()),
            ConstData::U8(v) => raw.copy_from_slice(&v.to_le_bytes()),
            ConstData::R4(v) => raw[..4].copy_from_slice(&v.to_le_bytes()),
            ConstData::R8(v) => raw.copy_from_slice(&v.to_le_bytes()),
            ConstData::None | ConstData::String(_) => return None,
        }
        Some(raw)
    }

    /// Reread this payload's bit pattern under another primitive kind.
    ///
    /// This is a raw bit-pattern reinterpretation over a little-endian
    /// buffer, NOT a numeric cast: `I4(1)` rereads as the denormal `R4`
    /// whose bits are `1`, not as `1.0`. Narrowing keeps the low-order
    /// bytes; widening zero-extends.
    ///
    /// Returns `None` when either side has no fixed-width representation
    /// (strings, missing payloads, native-sized or void kinds) or when the
    /// bit pattern is not a valid scalar of the target (e.g. a surrogate
    /// `char`).
    #[must_use]
    pub fn reinterpret(&self, target: PrimitiveKind) -> Option<ConstData> {
        let raw = self.to_raw()?;

        match target {
            PrimitiveKind::Boolean => Some(ConstData::Boolean(raw[0] != 0)),
            PrimitiveKind::Char => {
                let bits = u16::from_le_bytes([raw[0], raw[1]]);
                char::from_u32(u32::from(bits)).map(ConstData::Char)
            }
            PrimitiveKind::I1 => Some(ConstData::I1(i8::from_le_bytes([raw[0]]))),
            PrimitiveKind::U1 => Some(ConstData::U1(raw[0])),
            PrimitiveKind::I2 => Some(ConstData::I2(i16::from_le_bytes([raw[0], raw[1]]))),
            PrimitiveKind::U2 => Some(ConstData::U2(u16::from_le_bytes([raw[0], raw[1]]))),
            PrimitiveKind::I4 => Some(ConstData::I4(i32::from_le_bytes(
                raw[..4].try_into().ok()?,
            ))),
            PrimitiveKind::U4 => Some(ConstData::U4(u32::from_le_bytes(
                raw[..4].try_into().ok()?,
            ))),
            PrimitiveKind::I8 => Some(ConstData::I8(i64::from_le_bytes(raw))),
            PrimitiveKind::U8 => Some(ConstData::U8(u64::from_le_bytes(raw))),
            PrimitiveKind::R4 => Some(ConstData::R4(f32::from_le_bytes(
                raw[..4].try_into().ok()?,
            ))),
            PrimitiveKind::R8 => Some(ConstData::R8(f64::from_le_bytes(raw))),
            PrimitiveKind::Void
            | PrimitiveKind::I
            | PrimitiveKind::U
            | PrimitiveKind::String
            | PrimitiveKind::Object => None,
        }
    }
}

impl fmt::Display for ConstData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstData::None => write!(f, "<unknown>"),
            ConstData::Boolean(v) => write!(f, "{v}"),
            ConstData::Char(v) => write!(f, "'{v}'"),
            ConstData::I1(v) => write!(f, "{v}"),
            ConstData::U1(v) => write!(f, "{v}"),
            ConstData::I2(v) => write!(f, "{v}"),
            ConstData::U2(v) => write!(f, "{v}"),
            ConstData::I4(v) => write!(f, "{v}"),
            ConstData::U4(v) => write!(f, "{v}"),
            ConstData::I8(v) => write!(f, "{v}L"),
            ConstData::U8(v) => write!(f, "{v}UL"),
            ConstData::R4(v) => write!(f, "{v}f"),
            ConstData::R8(v) => write!(f, "{v}"),
            ConstData::String(v) => write!(f, "\"{v}\""),
        }
    }
}

/// A constant tracked through method analysis.
///
/// The type tag and payload are mutable as a pair: return-type reconciliation
/// may retag the constant to the declared return type, reinterpreting the
/// payload's bit pattern in place. This is the only analysis entity the
/// reconstruction stage is permitted to mutate.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantOperand {
    /// Current type tag
    pub kind: PrimitiveKind,
    /// Literal payload
    pub data: ConstData,
}

impl ConstantOperand {
    /// Create a new constant operand
    #[must_use]
    pub fn new(kind: PrimitiveKind, data: ConstData) -> Self {
        ConstantOperand { kind, data }
    }
}

impl fmt::Display for ConstantOperand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "constant {} of type {}", self.data, self.kind)
    }
}

/// A resolved local variable tracked through method analysis.
///
/// Ownership of the definition stays with the analysis engine; this is a
/// value-level back-reference (name, slot, declared type identity) and is
/// read-only from the reconstruction stage's perspective.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableOperand {
    /// Variable name assigned during analysis (e.g. `local_2`)
    pub name: String,
    /// Local variable slot index
    pub index: u16,
    /// Identity of the variable's declared type
    pub ty: Token,
}

impl VariableOperand {
    /// Create a new variable operand
    #[must_use]
    pub fn new(name: &str, index: u16, ty: Token) -> Self {
        VariableOperand {
            name: name.to_string(),
            index,
            ty,
        }
    }
}

impl fmt::Display for VariableOperand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "local {} (slot {})", self.name, self.index)
    }
}

/// A symbolic value flowing through method analysis.
///
/// The kind set is closed by design: every use site (reconciliation, load
/// sequence generation, pseudocode rendering) matches exhaustively over the
/// two variants.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysedOperand {
    /// A resolved local variable with a known type identity
    Variable(VariableOperand),
    /// A constant with a literal payload and reinterpretable type tag
    Constant(ConstantOperand),
}

impl AnalysedOperand {
    /// Shorthand for a constant operand
    #[must_use]
    pub fn constant(kind: PrimitiveKind, data: ConstData) -> Self {
        AnalysedOperand::Constant(ConstantOperand::new(kind, data))
    }

    /// Shorthand for a variable operand
    #[must_use]
    pub fn variable(name: &str, index: u16, ty: Token) -> Self {
        AnalysedOperand::Variable(VariableOperand::new(name, index, ty))
    }

    /// The instruction sequence that loads this operand's value onto the
    /// evaluation stack.
    ///
    /// Variables load from their slot with the most compact `ldloc` form;
    /// constants load through the matching `ldc.*`/`ldstr` instruction with
    /// their bit pattern preserved (small integers widen to `int32` on the
    /// stack per ECMA-335).
    ///
    /// # Errors
    /// Returns [`crate::Error::Tainted`] for a constant whose payload was
    /// never recovered - such a value cannot be represented in bytecode.
    #[allow(clippy::cast_possible_wrap)] // Stack widening preserves bit patterns
    pub fn load_instructions(
        &self,
        _ctx: &MethodContext,
        processor: &IlProcessor,
    ) -> Result<Vec<Instruction>> {
        let instruction = match self {
            AnalysedOperand::Variable(local) => emit::emit_ldloc(processor, local.index)?,
            AnalysedOperand::Constant(constant) => match &constant.data {
                ConstData::Boolean(v) => emit::emit_ldc_i4(processor, i32::from(*v))?,
                ConstData::Char(v) => emit::emit_ldc_i4(processor, *v as i32)?,
                ConstData::I1(v) => emit::emit_ldc_i4(processor, i32::from(*v))?,
                ConstData::U1(v) => emit::emit_ldc_i4(processor, i32::from(*v))?,
                ConstData::I2(v) => emit::emit_ldc_i4(processor, i32::from(*v))?,
                ConstData::U2(v) => emit::emit_ldc_i4(processor, i32::from(*v))?,
                ConstData::I4(v) => emit::emit_ldc_i4(processor, *v)?,
                ConstData::U4(v) => emit::emit_ldc_i4(processor, *v as i32)?,
                ConstData::I8(v) => emit::emit_ldc_i8(processor, *v)?,
                ConstData::U8(v) => emit::emit_ldc_i8(processor, *v as i64)?,
                ConstData::R4(v) => emit::emit_ldc_r4(processor, *v)?,
                ConstData::R8(v) => emit::emit_ldc_r8(processor, *v)?,
                ConstData::String(v) => emit::emit_ldstr(processor, v)?,
                ConstData::None => {
                    return Err(tainted_error!(
                        "constant of type {} has no recovered value",
                        constant.kind
                    ))
                }
            },
        };

        Ok(vec![instruction])
    }

    /// Pseudocode rendering of this operand. Never fails; a constant whose
    /// payload was not recovered renders as a placeholder.
    #[must_use]
    pub fn pseudocode(&self) -> String {
        match self {
            AnalysedOperand::Variable(local) => local.name.clone(),
            AnalysedOperand::Constant(constant) => constant.data.to_string(),
        }
    }
}

impl fmt::Display for AnalysedOperand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysedOperand::Variable(local) => local.fmt(f),
            AnalysedOperand::Constant(constant) => constant.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reinterpret_int_bits_as_float() {
        // 0x3F800000 is the IEEE-754 bit pattern of 1.0f
        let data = ConstData::I4(0x3F80_0000);
        assert_eq!(
            data.reinterpret(PrimitiveKind::R4),
            Some(ConstData::R4(1.0))
        );

        // NOT a numeric cast: 1 rereads as a denormal, not 1.0
        let one = ConstData::I4(1);
        assert_eq!(
            one.reinterpret(PrimitiveKind::R4),
            Some(ConstData::R4(f32::from_bits(1)))
        );
    }

    #[test]
    fn test_reinterpret_roundtrips_bit_pattern() {
        let data = ConstData::R8(std::f64::consts::PI);
        let as_bits = data.reinterpret(PrimitiveKind::I8).unwrap();
        assert_eq!(
            as_bits,
            ConstData::I8(std::f64::consts::PI.to_bits() as i64)
        );
        assert_eq!(as_bits.reinterpret(PrimitiveKind::R8), Some(data));
    }

    #[test]
    fn test_reinterpret_widening_zero_extends() {
        let data = ConstData::U1(0xFF);
        assert_eq!(data.reinterpret(PrimitiveKind::I4), Some(ConstData::I4(255)));
    }

    #[test]
    fn test_reinterpret_narrowing_keeps_low_bytes() {
        let data = ConstData::I4(0x1234_5678);
        assert_eq!(
            data.reinterpret(PrimitiveKind::U2),
            Some(ConstData::U2(0x5678))
        );
    }

    #[test]
    fn test_strings_never_reinterpret() {
        let data = ConstData::String("two".to_string());
        assert_eq!(data.reinterpret(PrimitiveKind::I4), None);
        assert_eq!(ConstData::I4(2).reinterpret(PrimitiveKind::String), None);
    }

    #[test]
    fn test_pseudocode_rendering() {
        let local = AnalysedOperand::variable("local_2", 2, PrimitiveKind::I4.token());
        assert_eq!(local.pseudocode(), "local_2");

        let constant = AnalysedOperand::constant(PrimitiveKind::I4, ConstData::I4(42));
        assert_eq!(constant.pseudocode(), "42");

        let text = AnalysedOperand::constant(
            PrimitiveKind::String,
            ConstData::String("ok".to_string()),
        );
        assert_eq!(text.pseudocode(), "\"ok\"");

        let unknown = AnalysedOperand::constant(PrimitiveKind::I4, ConstData::None);
        assert_eq!(unknown.pseudocode(), "<unknown>");
    }
}
