//! Symbolic analysis state consumed by the reconstruction stage.
//!
//! Method analysis tracks values symbolically: a value is either a resolved
//! local variable with a known type identity, or a constant with a literal
//! payload and a reinterpretable type tag. This module defines that operand
//! model and the per-method context that exposes the declared return type.
//!
//! # Key Types
//!
//! - [`AnalysedOperand`] - Closed sum over variable and constant operands
//! - [`ConstData`] - Constant payloads with bit-pattern reinterpretation
//! - [`MethodContext`] - Per-method state (declared return type, void flag)
//!
//! Constant payload reinterpretation is byte-preserving, never a numeric
//! cast: an `int32` whose bits are `0x3F80_0000` rereads as the `float32`
//! value `1.0`, not `1065353216.0`.

mod context;
mod operand;

pub use context::MethodContext;
pub use operand::{AnalysedOperand, ConstData, ConstantOperand, VariableOperand};
