//! CIL opcode byte constants (ECMA-335).
//!
//! Raw byte values for the opcodes the reconstruction stage emits. Single-byte
//! opcodes are named after their mnemonic (e.g. [`RET`] = `0x2A`).
#![allow(missing_docs)]

// Misc
pub const NOP: u8 = 0x00;

// Load local shorthand
pub const LDLOC_0: u8 = 0x06;
pub const LDLOC_1: u8 = 0x07;
pub const LDLOC_2: u8 = 0x08;
pub const LDLOC_3: u8 = 0x09;

// Load local (short form; the long form is FE-prefixed, see FE_LDLOC)
pub const LDLOC_S: u8 = 0x11;

// Null / constant loaders
pub const LDNULL: u8 = 0x14;
pub const LDC_I4_M1: u8 = 0x15;
pub const LDC_I4_0: u8 = 0x16;
pub const LDC_I4_1: u8 = 0x17;
pub const LDC_I4_2: u8 = 0x18;
pub const LDC_I4_3: u8 = 0x19;
pub const LDC_I4_4: u8 = 0x1A;
pub const LDC_I4_5: u8 = 0x1B;
pub const LDC_I4_6: u8 = 0x1C;
pub const LDC_I4_7: u8 = 0x1D;
pub const LDC_I4_8: u8 = 0x1E;
pub const LDC_I4_S: u8 = 0x1F;
pub const LDC_I4: u8 = 0x20;
pub const LDC_I8: u8 = 0x21;
pub const LDC_R4: u8 = 0x22;
pub const LDC_R8: u8 = 0x23;

// Return
pub const RET: u8 = 0x2A;

// String literal loader
pub const LDSTR: u8 = 0x72;

// ── Two-byte opcodes (0xFE prefix) ──────────────────────────────────────────

/// Shared first byte of all two-byte opcodes.
pub const FE_PREFIX: u8 = 0xFE;
pub const FE_LDLOC: u8 = 0x0C;
