//! CIL instruction representation and emission.
//!
//! This module is the bytecode-processor side of reconstruction: actions ask
//! the [`IlProcessor`] for instruction objects and string-literal tokens, and
//! the `emit` helpers pick the most compact encoding for parameterized loads
//! (e.g. `ldloc.0` instead of `ldloc 0`).
//!
//! # Key Types
//! - [`Instruction`] - A freshly emitted CIL instruction
//! - [`Operand`] / [`Immediate`] - Type-safe operand representation
//! - [`IlProcessor`] - Allocates instructions from mnemonics and operands
//!
//! # Example
//! ```rust
//! use reconcil::assembly::{IlProcessor, Operand};
//!
//! let processor = IlProcessor::new();
//! let ret = processor.create("ret", Operand::None)?;
//! assert_eq!(ret.opcode, 0x2A);
//! # Ok::<(), reconcil::Error>(())
//! ```

pub mod emit;
mod instruction;
pub mod opcodes;
mod processor;

pub use instruction::{Immediate, Instruction, Operand};
pub use processor::IlProcessor;
