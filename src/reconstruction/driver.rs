use rayon::prelude::*;

use crate::{
    analysis::MethodContext,
    assembly::{IlProcessor, Instruction},
    reconstruction::Action,
    Result,
};

/// The ordered action set reconstructed for one method.
///
/// Analysis appends actions in program order; once analysis completes, the
/// emission driver walks the set to assemble the final bytecode body and the
/// pseudocode listing. Emission never mutates the set, so it can run as often
/// as later passes need it to.
pub struct MethodReconstruction {
    /// Actions in program order
    actions: Vec<Box<dyn Action>>,
}

impl MethodReconstruction {
    /// Create an empty action set
    #[must_use]
    pub fn new() -> Self {
        MethodReconstruction {
            actions: Vec::new(),
        }
    }

    /// Append an action in program order
    pub fn push<A: Action + 'static>(&mut self, action: A) {
        self.actions.push(Box::new(action));
    }

    /// The actions in program order
    #[must_use]
    pub fn actions(&self) -> &[Box<dyn Action>] {
        &self.actions
    }

    /// Number of actions in the set
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether the set holds no actions
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Assemble the full bytecode body for this method.
    ///
    /// # Errors
    /// Returns the first [`crate::Error::Tainted`] an action raises; a single
    /// tainted action aborts bytecode emission for the whole method.
    pub fn emit_body(
        &self,
        ctx: &MethodContext,
        processor: &IlProcessor,
    ) -> Result<Vec<Instruction>> {
        let mut body = Vec::new();
        for action in &self.actions {
            body.extend(action.to_instructions(ctx, processor)?);
        }

        Ok(body)
    }

    /// Render the pseudocode listing for this method. Never fails, even for
    /// methods whose bytecode emission is tainted.
    #[must_use]
    pub fn emit_pseudocode(&self) -> String {
        self.actions
            .iter()
            .map(|action| action.to_pseudocode())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render the diagnostic trace for this method. Never fails.
    #[must_use]
    pub fn emit_summary(&self) -> String {
        self.actions
            .iter()
            .map(|action| action.to_text_summary())
            .collect()
    }
}

impl Default for MethodReconstruction {
    fn default() -> Self {
        Self::new()
    }
}

/// Emit the bytecode bodies of many methods in parallel.
///
/// Each worker owns exactly one method's context and action set; the
/// processor is shared, which is safe because instruction creation is
/// read-only and string interning is concurrent. Results come back in input
/// order, one per method, so tainted methods are reported individually
/// without aborting their neighbours.
pub fn emit_bodies(
    methods: &[(MethodContext<'_>, MethodReconstruction)],
    processor: &IlProcessor,
) -> Vec<Result<Vec<Instruction>>> {
    methods
        .par_iter()
        .map(|(ctx, reconstruction)| reconstruction.emit_body(ctx, processor))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        analysis::{AnalysedOperand, ConstData},
        metadata::typesystem::{PrimitiveKind, TypeRegistry},
        reconstruction::ReturnAction,
    };

    fn int_method<'a>(
        types: &'a TypeRegistry,
        name: &str,
        value: i32,
    ) -> (MethodContext<'a>, MethodReconstruction) {
        let ctx = MethodContext::new(types, name, Some(PrimitiveKind::I4.token()));
        let mut action = ReturnAction::new(&ctx, 0x1000);
        action.bind_return_value(AnalysedOperand::constant(
            PrimitiveKind::I4,
            ConstData::I4(value),
        ));
        action.reconcile_constant_return_type(&ctx);

        let mut reconstruction = MethodReconstruction::new();
        reconstruction.push(action);
        (ctx, reconstruction)
    }

    #[test]
    fn test_emit_body_is_idempotent() {
        let types = TypeRegistry::new();
        let processor = IlProcessor::new();
        let (ctx, reconstruction) = int_method(&types, "GetCount", 3);

        let first = reconstruction.emit_body(&ctx, &processor).unwrap();
        let second = reconstruction.emit_body(&ctx, &processor).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.last().unwrap().mnemonic, "ret");
    }

    #[test]
    fn test_emit_bodies_in_parallel() {
        let types = TypeRegistry::new();
        let processor = IlProcessor::new();

        let methods: Vec<_> = (0..32)
            .map(|i| int_method(&types, &format!("GetValue{i}"), i))
            .collect();

        let bodies = emit_bodies(&methods, &processor);
        assert_eq!(bodies.len(), 32);
        for body in bodies {
            let body = body.unwrap();
            assert_eq!(body.last().unwrap().mnemonic, "ret");
        }
    }

    #[test]
    fn test_tainted_method_does_not_poison_neighbours() {
        let types = TypeRegistry::new();
        let processor = IlProcessor::new();

        let good = int_method(&types, "GetCount", 1);

        let bad_ctx = MethodContext::new(&types, "Broken", Some(PrimitiveKind::I4.token()));
        let mut bad = MethodReconstruction::new();
        bad.push(ReturnAction::new(&bad_ctx, 0x2000)); // value never bound

        let methods = vec![good, (bad_ctx, bad)];
        let bodies = emit_bodies(&methods, &processor);

        assert!(bodies[0].is_ok());
        assert!(matches!(bodies[1], Err(crate::Error::Tainted { .. })));

        // Diagnostics remain available for the tainted method
        let summary = methods[1].1.emit_summary();
        assert!(summary.contains("from the function"));
    }

    #[test]
    fn test_pseudocode_listing() {
        let types = TypeRegistry::new();
        let (_ctx, reconstruction) = int_method(&types, "GetCount", 3);
        assert_eq!(reconstruction.emit_pseudocode(), "return 3");
    }
}
