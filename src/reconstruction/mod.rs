//! Semantic actions and the dual-emission pipeline.
//!
//! During analysis, every recognizable high-level operation of a method is
//! reconstructed as one ACTION. Actions are built during or after symbolic
//! analysis and emitted later, in a separate pass, once analysis of the whole
//! method is complete - so an action must be able to defer every decision to
//! emission time using only the state it captured at construction plus the
//! [`crate::analysis::MethodContext`] it is handed again at emission.
//!
//! # Pipeline
//!
//! Within one method the pipeline is strictly sequential:
//!
//! 1. **Construction** - one action per detected operation
//! 2. **Reconciliation** - at most one mutation per action, before emission
//! 3. **Emission** - bytecode and pseudocode, re-invocable, side-effect free
//!
//! Distinct methods may be emitted in parallel (see
//! [`emit_bodies`]); nothing is shared within one method's
//! action set, so no synchronization is needed there.

mod driver;
mod ret;

pub use driver::{emit_bodies, MethodReconstruction};
pub use ret::ReturnAction;

use crate::{
    analysis::MethodContext,
    assembly::{IlProcessor, Instruction},
    Result,
};

/// A reconstructed semantic operation.
///
/// Every action kind provides the same four capabilities. Emission methods
/// are pure functions of the action's current state: later passes may invoke
/// them repeatedly and must observe identical output.
pub trait Action: Send + Sync {
    /// Emit the bytecode implementing this action.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Tainted`] when the captured analysis state
    /// cannot be expressed as valid bytecode. A tainted action aborts
    /// bytecode emission for the containing method; pseudocode and summary
    /// emission stay available for diagnostics.
    fn to_instructions(
        &self,
        ctx: &MethodContext,
        processor: &IlProcessor,
    ) -> Result<Vec<Instruction>>;

    /// Emit the pseudocode line equivalent to this action. Never fails;
    /// operands that cannot render themselves produce a placeholder.
    fn to_pseudocode(&self) -> String;

    /// Emit a one-line diagnostic summary of this action.
    ///
    /// Used for analysis logs and tracing, not for correctness; must never
    /// fail.
    fn to_text_summary(&self) -> String;

    /// Whether this action is semantically significant.
    ///
    /// Significant actions must not be elided by later simplification or
    /// optimization passes.
    fn is_important(&self) -> bool;
}
