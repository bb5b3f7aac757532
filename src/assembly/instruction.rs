use std::fmt;

use crate::metadata::token::Token;

/// Represents an immediate value embedded in an emitted CIL instruction.
///
/// Immediate values are constants encoded directly in the instruction stream.
/// This enum provides a type-safe representation of the immediate widths the
/// reconstruction stage emits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Immediate {
    /// Signed 8-bit value (e.g. `ldc.i4.s`)
    Int8(i8),
    /// Unsigned 8-bit value (e.g. `ldloc.s`)
    UInt8(u8),
    /// Signed 16-bit value (e.g. long-form `ldloc`)
    Int16(i16),
    /// Unsigned 16-bit value
    UInt16(u16),
    /// Signed 32-bit value (e.g. `ldc.i4`)
    Int32(i32),
    /// Signed 64-bit value (`ldc.i8`)
    Int64(i64),
    /// 32-bit float (`ldc.r4`)
    Float32(f32),
    /// 64-bit float (`ldc.r8`)
    Float64(f64),
}

impl fmt::Display for Immediate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Immediate::Int8(v) => write!(f, "{v}"),
            Immediate::UInt8(v) => write!(f, "{v}"),
            Immediate::Int16(v) => write!(f, "{v}"),
            Immediate::UInt16(v) => write!(f, "{v}"),
            Immediate::Int32(v) => write!(f, "{v}"),
            Immediate::Int64(v) => write!(f, "{v}"),
            Immediate::Float32(v) => write!(f, "{v}"),
            Immediate::Float64(v) => write!(f, "{v}"),
        }
    }
}

/// Operand of an emitted CIL instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// No operand present
    None,
    /// Immediate value (constant embedded in instruction)
    Immediate(Immediate),
    /// Metadata token reference (e.g. `ldstr` user-string token)
    Token(Token),
    /// Local variable index
    Local(u16),
    /// Method argument index
    Argument(u16),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::None => Ok(()),
            Operand::Immediate(imm) => write!(f, " {imm}"),
            Operand::Token(token) => write!(f, " {token}"),
            Operand::Local(index) => write!(f, " V_{index}"),
            Operand::Argument(index) => write!(f, " A_{index}"),
        }
    }
}

/// A freshly emitted CIL instruction.
///
/// Unlike a decoded instruction, an emitted one has no address or size yet -
/// layout happens downstream when the method body is assembled. What it does
/// carry is everything a verifier-facing writer needs: the opcode bytes, the
/// mnemonic for listings, and the typed operand.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    /// Primary opcode byte
    pub opcode: u8,
    /// Prefix byte (0 if no prefix)
    pub prefix: u8,
    /// Human-readable instruction mnemonic (e.g. "ldc.i4.s", "ret")
    pub mnemonic: &'static str,
    /// The operand data for this instruction
    pub operand: Operand,
}

impl Instruction {
    /// Create a new single-byte instruction
    #[must_use]
    pub fn new(opcode: u8, mnemonic: &'static str, operand: Operand) -> Self {
        Instruction {
            opcode,
            prefix: 0,
            mnemonic,
            operand,
        }
    }

    /// Create a new two-byte (`0xFE`-prefixed) instruction
    #[must_use]
    pub fn new_prefixed(prefix: u8, opcode: u8, mnemonic: &'static str, operand: Operand) -> Self {
        Instruction {
            opcode,
            prefix,
            mnemonic,
            operand,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.mnemonic, self.operand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::opcodes;

    #[test]
    fn test_display() {
        let ret = Instruction::new(opcodes::RET, "ret", Operand::None);
        assert_eq!(ret.to_string(), "ret");

        let ldc = Instruction::new(
            opcodes::LDC_I4_S,
            "ldc.i4.s",
            Operand::Immediate(Immediate::Int8(42)),
        );
        assert_eq!(ldc.to_string(), "ldc.i4.s 42");

        let ldloc = Instruction::new(opcodes::LDLOC_S, "ldloc.s", Operand::Local(7));
        assert_eq!(ldloc.to_string(), "ldloc.s V_7");
    }

    #[test]
    fn test_equality_for_idempotence_checks() {
        let a = Instruction::new(opcodes::RET, "ret", Operand::None);
        let b = Instruction::new(opcodes::RET, "ret", Operand::None);
        assert_eq!(a, b);
    }
}
