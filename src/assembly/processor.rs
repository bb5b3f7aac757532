use std::sync::atomic::{AtomicU32, Ordering};

use dashmap::DashMap;

use crate::{
    assembly::{opcodes, Instruction, Operand},
    metadata::token::Token,
    Error::UnknownInstruction,
    Result,
};

/// Allocates CIL instruction objects for the reconstruction stage.
///
/// Actions never build [`Instruction`] values directly; they request them
/// from the processor by mnemonic, which keeps opcode encoding knowledge in
/// one place. The processor also interns string literals, handing out
/// user-string tokens (`0x70` table) for `ldstr` operands.
///
/// # Thread Safety
///
/// The processor is shared by parallel per-method emission workers; interning
/// uses a concurrent map and an atomic row counter, and instruction creation
/// is read-only.
pub struct IlProcessor {
    /// Interned string literals -> user-string row index
    user_strings: DashMap<String, u32>,
    /// Next free user-string row
    next_string: AtomicU32,
}

impl IlProcessor {
    /// Create a new processor with an empty user-string table
    #[must_use]
    pub fn new() -> Self {
        IlProcessor {
            user_strings: DashMap::new(),
            next_string: AtomicU32::new(1),
        }
    }

    /// Create an instruction from a mnemonic and operand
    ///
    /// ## Arguments
    /// * `mnemonic` - Instruction mnemonic (e.g. `"ldc.i4.s"`, `"ret"`)
    /// * `operand`  - The operand to embed
    ///
    /// # Errors
    /// Returns [`UnknownInstruction`] if the mnemonic has no encoding here.
    pub fn create(&self, mnemonic: &'static str, operand: Operand) -> Result<Instruction> {
        let instruction = match mnemonic {
            "nop" => Instruction::new(opcodes::NOP, mnemonic, operand),
            "ldloc.0" => Instruction::new(opcodes::LDLOC_0, mnemonic, operand),
            "ldloc.1" => Instruction::new(opcodes::LDLOC_1, mnemonic, operand),
            "ldloc.2" => Instruction::new(opcodes::LDLOC_2, mnemonic, operand),
            "ldloc.3" => Instruction::new(opcodes::LDLOC_3, mnemonic, operand),
            "ldloc.s" => Instruction::new(opcodes::LDLOC_S, mnemonic, operand),
            "ldloc" => {
                Instruction::new_prefixed(opcodes::FE_PREFIX, opcodes::FE_LDLOC, mnemonic, operand)
            }
            "ldnull" => Instruction::new(opcodes::LDNULL, mnemonic, operand),
            "ldc.i4.m1" => Instruction::new(opcodes::LDC_I4_M1, mnemonic, operand),
            "ldc.i4.0" => Instruction::new(opcodes::LDC_I4_0, mnemonic, operand),
            "ldc.i4.1" => Instruction::new(opcodes::LDC_I4_1, mnemonic, operand),
            "ldc.i4.2" => Instruction::new(opcodes::LDC_I4_2, mnemonic, operand),
            "ldc.i4.3" => Instruction::new(opcodes::LDC_I4_3, mnemonic, operand),
            "ldc.i4.4" => Instruction::new(opcodes::LDC_I4_4, mnemonic, operand),
            "ldc.i4.5" => Instruction::new(opcodes::LDC_I4_5, mnemonic, operand),
            "ldc.i4.6" => Instruction::new(opcodes::LDC_I4_6, mnemonic, operand),
            "ldc.i4.7" => Instruction::new(opcodes::LDC_I4_7, mnemonic, operand),
            "ldc.i4.8" => Instruction::new(opcodes::LDC_I4_8, mnemonic, operand),
            "ldc.i4.s" => Instruction::new(opcodes::LDC_I4_S, mnemonic, operand),
            "ldc.i4" => Instruction::new(opcodes::LDC_I4, mnemonic, operand),
            "ldc.i8" => Instruction::new(opcodes::LDC_I8, mnemonic, operand),
            "ldc.r4" => Instruction::new(opcodes::LDC_R4, mnemonic, operand),
            "ldc.r8" => Instruction::new(opcodes::LDC_R8, mnemonic, operand),
            "ldstr" => Instruction::new(opcodes::LDSTR, mnemonic, operand),
            "ret" => Instruction::new(opcodes::RET, mnemonic, operand),
            _ => return Err(UnknownInstruction(mnemonic)),
        };

        Ok(instruction)
    }

    /// Intern a string literal and return its user-string token
    ///
    /// Repeated interning of the same literal yields the same token.
    pub fn intern_string(&self, literal: &str) -> Token {
        let row = *self
            .user_strings
            .entry(literal.to_string())
            .or_insert_with(|| self.next_string.fetch_add(1, Ordering::Relaxed));

        Token::new((u32::from(Token::TABLE_USER_STRING) << 24) | (row & 0x00FF_FFFF))
    }

    /// Number of distinct interned string literals
    #[must_use]
    pub fn string_count(&self) -> usize {
        self.user_strings.len()
    }
}

impl Default for IlProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_known_mnemonics() {
        let processor = IlProcessor::new();

        let ret = processor.create("ret", Operand::None).unwrap();
        assert_eq!(ret.opcode, opcodes::RET);
        assert_eq!(ret.prefix, 0);

        let ldloc = processor.create("ldloc", Operand::Local(300)).unwrap();
        assert_eq!(ldloc.prefix, opcodes::FE_PREFIX);
        assert_eq!(ldloc.opcode, opcodes::FE_LDLOC);
    }

    #[test]
    fn test_create_unknown_mnemonic() {
        let processor = IlProcessor::new();
        assert!(processor.create("tail.call", Operand::None).is_err());
    }

    #[test]
    fn test_string_interning_is_stable() {
        let processor = IlProcessor::new();

        let a = processor.intern_string("hello");
        let b = processor.intern_string("world");
        let c = processor.intern_string("hello");

        assert_eq!(a, c);
        assert_ne!(a, b);
        assert_eq!(a.table(), Token::TABLE_USER_STRING);
        assert_eq!(processor.string_count(), 2);
    }
}
