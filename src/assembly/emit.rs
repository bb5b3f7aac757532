//! Compact-encoding emission helpers.
//!
//! These helpers pick the shortest instruction encoding for parameterized
//! loads:
//!
//! ```text
//! ldloc.0, ldloc.1, ldloc.2, ldloc.3  (1 byte)
//! ldloc.s <uint8>                      (2 bytes)
//! ldloc <uint16>                       (4 bytes)
//! ```

use crate::{
    assembly::{IlProcessor, Immediate, Instruction, Operand},
    Result,
};

/// Emits an optimized ldc.i4 instruction for a 32-bit integer value.
///
/// Uses the most compact encoding possible:
/// - `ldc.i4.m1` through `ldc.i4.8` for values -1 to 8
/// - `ldc.i4.s` for values in -128..=127
/// - `ldc.i4` for all other values
///
/// # Errors
/// Returns an error if the processor cannot allocate the instruction.
#[allow(clippy::cast_possible_truncation)] // Intentional truncation for ldc.i4.s encoding
pub fn emit_ldc_i4(processor: &IlProcessor, v: i32) -> Result<Instruction> {
    match v {
        -1 => processor.create("ldc.i4.m1", Operand::None),
        0 => processor.create("ldc.i4.0", Operand::None),
        1 => processor.create("ldc.i4.1", Operand::None),
        2 => processor.create("ldc.i4.2", Operand::None),
        3 => processor.create("ldc.i4.3", Operand::None),
        4 => processor.create("ldc.i4.4", Operand::None),
        5 => processor.create("ldc.i4.5", Operand::None),
        6 => processor.create("ldc.i4.6", Operand::None),
        7 => processor.create("ldc.i4.7", Operand::None),
        8 => processor.create("ldc.i4.8", Operand::None),
        x if (-128..=127).contains(&x) => {
            processor.create("ldc.i4.s", Operand::Immediate(Immediate::Int8(x as i8)))
        }
        x => processor.create("ldc.i4", Operand::Immediate(Immediate::Int32(x))),
    }
}

/// Emits a ldc.i8 instruction for a 64-bit integer value.
///
/// # Errors
/// Returns an error if the processor cannot allocate the instruction.
pub fn emit_ldc_i8(processor: &IlProcessor, v: i64) -> Result<Instruction> {
    processor.create("ldc.i8", Operand::Immediate(Immediate::Int64(v)))
}

/// Emits a ldc.r4 instruction for a 32-bit float value.
///
/// # Errors
/// Returns an error if the processor cannot allocate the instruction.
pub fn emit_ldc_r4(processor: &IlProcessor, v: f32) -> Result<Instruction> {
    processor.create("ldc.r4", Operand::Immediate(Immediate::Float32(v)))
}

/// Emits a ldc.r8 instruction for a 64-bit float value.
///
/// # Errors
/// Returns an error if the processor cannot allocate the instruction.
pub fn emit_ldc_r8(processor: &IlProcessor, v: f64) -> Result<Instruction> {
    processor.create("ldc.r8", Operand::Immediate(Immediate::Float64(v)))
}

/// Emits a ldloc instruction with optimal encoding.
///
/// - `ldloc.0` through `ldloc.3` for indices 0-3 (1 byte)
/// - `ldloc.s` for indices 4-255 (2 bytes)
/// - `ldloc` for indices 256+ (4 bytes)
///
/// # Errors
/// Returns an error if the processor cannot allocate the instruction.
pub fn emit_ldloc(processor: &IlProcessor, index: u16) -> Result<Instruction> {
    match index {
        0 => processor.create("ldloc.0", Operand::None),
        1 => processor.create("ldloc.1", Operand::None),
        2 => processor.create("ldloc.2", Operand::None),
        3 => processor.create("ldloc.3", Operand::None),
        x if x <= 255 => processor.create("ldloc.s", Operand::Local(x)),
        x => processor.create("ldloc", Operand::Local(x)),
    }
}

/// Emits a ldstr instruction, interning the literal in the processor's
/// user-string table.
///
/// # Errors
/// Returns an error if the processor cannot allocate the instruction.
pub fn emit_ldstr(processor: &IlProcessor, literal: &str) -> Result<Instruction> {
    let token = processor.intern_string(literal);
    processor.create("ldstr", Operand::Token(token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::opcodes;

    #[test]
    fn test_emit_ldc_i4_special_values() {
        let processor = IlProcessor::new();

        assert_eq!(
            emit_ldc_i4(&processor, -1).unwrap().mnemonic,
            "ldc.i4.m1"
        );
        assert_eq!(emit_ldc_i4(&processor, 0).unwrap().mnemonic, "ldc.i4.0");
        assert_eq!(emit_ldc_i4(&processor, 8).unwrap().mnemonic, "ldc.i4.8");

        // Short form
        let short = emit_ldc_i4(&processor, 42).unwrap();
        assert_eq!(short.mnemonic, "ldc.i4.s");
        assert_eq!(short.operand, Operand::Immediate(Immediate::Int8(42)));

        // Full form
        let full = emit_ldc_i4(&processor, 1_000_000).unwrap();
        assert_eq!(full.mnemonic, "ldc.i4");
        assert_eq!(full.operand, Operand::Immediate(Immediate::Int32(1_000_000)));
    }

    #[test]
    fn test_emit_ldloc_encoding() {
        let processor = IlProcessor::new();

        assert_eq!(emit_ldloc(&processor, 0).unwrap().opcode, opcodes::LDLOC_0);
        assert_eq!(emit_ldloc(&processor, 3).unwrap().opcode, opcodes::LDLOC_3);
        assert_eq!(emit_ldloc(&processor, 10).unwrap().mnemonic, "ldloc.s");

        let long = emit_ldloc(&processor, 300).unwrap();
        assert_eq!(long.mnemonic, "ldloc");
        assert_eq!(long.prefix, opcodes::FE_PREFIX);
    }

    #[test]
    fn test_emit_ldstr_interns() {
        let processor = IlProcessor::new();

        let a = emit_ldstr(&processor, "status").unwrap();
        let b = emit_ldstr(&processor, "status").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.opcode, opcodes::LDSTR);
    }
}
