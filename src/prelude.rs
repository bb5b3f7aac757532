//! # reconcil Prelude
//!
//! This module provides a convenient prelude for the most commonly used types
//! and traits from the reconcil library. Import this module to get quick
//! access to the essential types for method reconstruction and emission.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all reconcil operations
pub use crate::Error;

/// The result type used throughout reconcil
pub use crate::Result;

// ================================================================================================
// Metadata and Type System
// ================================================================================================

/// Type identity token
pub use crate::metadata::token::Token;

/// Core type system components
pub use crate::metadata::typesystem::{IlType, IlTypeRc, PrimitiveKind, TypeFlavor, TypeRegistry};

// ================================================================================================
// Analysis
// ================================================================================================

/// Per-method analysis context handed to actions at emission time
pub use crate::analysis::MethodContext;

/// Symbolic operand model
pub use crate::analysis::{AnalysedOperand, ConstData, ConstantOperand, VariableOperand};

// ================================================================================================
// Assembly
// ================================================================================================

/// Emitted instruction representation
pub use crate::assembly::{Immediate, Instruction, Operand};

/// Bytecode processor that allocates instructions and interns strings
pub use crate::assembly::IlProcessor;

// ================================================================================================
// Reconstruction
// ================================================================================================

/// The action abstraction every reconstructed operation implements
pub use crate::reconstruction::Action;

/// Return-point action with constant reconciliation
pub use crate::reconstruction::ReturnAction;

/// Per-method action set and the parallel emission driver
pub use crate::reconstruction::{emit_bodies, MethodReconstruction};
