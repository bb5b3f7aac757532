use crate::{
    analysis::{AnalysedOperand, MethodContext},
    assembly::{IlProcessor, Instruction, Operand},
    metadata::typesystem::PrimitiveKind,
    reconstruction::Action,
    Result,
};

/// The return point of a method.
///
/// One return action is constructed per detected return point. Construction
/// captures the void flag from the context; the candidate return-value
/// operand is bound by the analysis pass afterwards, and
/// [`ReturnAction::reconcile_constant_return_type`] runs once before
/// emission to align a constant operand's type tag with the declared return
/// type where that is byte-preserving.
///
/// The two pieces of type information reconciled here are derived
/// independently: the operand's type was inferred from the native
/// instruction stream, the return type comes from metadata. Constants get
/// lenient, byte-preserving coercion; variables get a strict identity check
/// at emission time instead. That asymmetry is deliberate - a constant's tag
/// is an inference artifact, a local's declared type is not.
pub struct ReturnAction {
    /// RVA of the originating native return instruction, for diagnostics
    origin_rva: u64,
    /// Captured from the context at construction, never recomputed
    is_void: bool,
    /// The operand believed to hold the return value; `None` until bound
    /// (and permanently `None` for void methods)
    return_value: Option<AnalysedOperand>,
}

impl ReturnAction {
    /// Create a return action for a detected return point
    ///
    /// ## Arguments
    /// * `ctx`        - The method's analysis context
    /// * `origin_rva` - RVA of the originating native instruction
    #[must_use]
    pub fn new(ctx: &MethodContext, origin_rva: u64) -> Self {
        ReturnAction {
            origin_rva,
            is_void: ctx.is_void(),
            return_value: None,
        }
    }

    /// RVA of the native instruction this action was reconstructed from
    #[must_use]
    pub fn origin_rva(&self) -> u64 {
        self.origin_rva
    }

    /// Bind the operand believed to hold the return value.
    ///
    /// Called by the analysis pass once operand tracking has identified the
    /// value live at the return point. Must happen before emission for
    /// non-void methods.
    pub fn bind_return_value(&mut self, operand: AnalysedOperand) {
        self.return_value = Some(operand);
    }

    /// The currently bound return-value operand
    #[must_use]
    pub fn return_value(&self) -> Option<&AnalysedOperand> {
        self.return_value.as_ref()
    }

    /// Align a constant return value's type tag with the declared return type.
    ///
    /// A constant's inferred type may legitimately differ from the declared
    /// return type in two byte-preserving ways, both normalized here so that
    /// bytecode emission and verification succeed:
    ///
    /// 1. The method returns an enum: the constant is retagged to the enum's
    ///    underlying integral type.
    /// 2. The method returns a different convertible primitive: the
    ///    constant's bit pattern is reread under that primitive's format.
    ///
    /// No-op when the method is void, the bound value is not a constant, the
    /// constant is outside the convertible family, or it is a string. An
    /// unresolvable, array or otherwise unconvertible return type also
    /// leaves the constant untouched - this method never fails, and
    /// mismatches it does not repair are left for emission-time validation.
    pub fn reconcile_constant_return_type(&mut self, ctx: &MethodContext) {
        if self.is_void {
            return;
        }

        let Some(AnalysedOperand::Constant(constant)) = &mut self.return_value else {
            return;
        };

        if !constant.kind.is_convertible() || constant.kind == PrimitiveKind::String {
            return;
        }

        let Some(return_type) = ctx.return_type().and_then(|token| ctx.types().get(&token))
        else {
            return;
        };

        if let Some(underlying) = return_type.underlying_kind() {
            if let Some(data) = constant.data.reinterpret(underlying) {
                constant.data = data;
                constant.kind = underlying;
            }
            return;
        }

        if return_type.is_array() {
            return;
        }
        let Some(target) = return_type.primitive_kind() else {
            return;
        };
        if !target.is_convertible() || target == PrimitiveKind::String {
            return;
        }
        if target == constant.kind {
            return;
        }

        if let Some(data) = constant.data.reinterpret(target) {
            constant.data = data;
            constant.kind = target;
        }
    }
}

impl Action for ReturnAction {
    fn to_instructions(
        &self,
        ctx: &MethodContext,
        processor: &IlProcessor,
    ) -> Result<Vec<Instruction>> {
        let mut instructions = Vec::new();

        if !self.is_void {
            let Some(return_value) = &self.return_value else {
                return Err(tainted_error!(
                    "return value is missing at rva 0x{:x}",
                    self.origin_rva
                ));
            };

            // Constants were given their chance at reconciliation; locals
            // must match the declared return type exactly.
            if let AnalysedOperand::Variable(local) = return_value {
                let local_type = ctx.types().get(&local.ty).map(|ty| ty.token);
                let return_type = ctx
                    .return_type()
                    .and_then(|token| ctx.types().get(&token))
                    .map(|ty| ty.token);

                if local_type != return_type {
                    return Err(tainted_error!(
                        "return value has a type of {}, expecting an object of type {}",
                        ctx.types()
                            .get(&local.ty)
                            .map_or_else(|| "<unresolved>".to_string(), |ty| ty.fullname()),
                        ctx.return_type_name()
                    ));
                }
            }

            instructions.extend(return_value.load_instructions(ctx, processor)?);
        }

        instructions.push(processor.create("ret", Operand::None)?);

        Ok(instructions)
    }

    fn to_pseudocode(&self) -> String {
        if self.is_void {
            return "return".to_string();
        }

        match &self.return_value {
            Some(return_value) => format!("return {}", return_value.pseudocode()),
            None => "return".to_string(),
        }
    }

    fn to_text_summary(&self) -> String {
        if self.is_void {
            return "[!] Returns from the function\n".to_string();
        }

        match &self.return_value {
            Some(return_value) => format!("[!] Returns {return_value} from the function\n"),
            None => "[!] Returns an unknown value from the function\n".to_string(),
        }
    }

    fn is_important(&self) -> bool {
        // Returns are control-flow terminators; never eligible for elision.
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        analysis::ConstData,
        metadata::{
            token::Token,
            typesystem::{IlType, TypeFlavor, TypeRegistry},
        },
    };

    fn enum_registry() -> (TypeRegistry, Token) {
        let types = TypeRegistry::new();
        let token = Token::new(0x0200_0020);
        types
            .insert(IlType::new(
                token,
                TypeFlavor::Enum {
                    underlying: PrimitiveKind::I4,
                },
                "Game",
                "WeaponKind",
            ))
            .unwrap();
        (types, token)
    }

    #[test]
    fn test_reconcile_enum_return() {
        let (types, weapon_kind) = enum_registry();
        let ctx = MethodContext::new(&types, "GetWeaponKind", Some(weapon_kind));

        let mut action = ReturnAction::new(&ctx, 0x4000);
        action.bind_return_value(AnalysedOperand::constant(
            PrimitiveKind::I4,
            ConstData::I4(2),
        ));
        action.reconcile_constant_return_type(&ctx);

        let Some(AnalysedOperand::Constant(constant)) = action.return_value() else {
            panic!("expected a constant operand");
        };
        assert_eq!(constant.kind, PrimitiveKind::I4);
        assert_eq!(constant.data, ConstData::I4(2));
    }

    #[test]
    fn test_reconcile_primitive_reinterprets_bits() {
        let types = TypeRegistry::new();
        let ctx = MethodContext::new(&types, "GetScale", Some(PrimitiveKind::R4.token()));

        let mut action = ReturnAction::new(&ctx, 0x4000);
        action.bind_return_value(AnalysedOperand::constant(
            PrimitiveKind::I4,
            ConstData::I4(0x3F80_0000),
        ));
        action.reconcile_constant_return_type(&ctx);

        let Some(AnalysedOperand::Constant(constant)) = action.return_value() else {
            panic!("expected a constant operand");
        };
        assert_eq!(constant.kind, PrimitiveKind::R4);
        assert_eq!(constant.data, ConstData::R4(1.0));
    }

    #[test]
    fn test_reconcile_skips_strings() {
        let types = TypeRegistry::new();
        let ctx = MethodContext::new(&types, "GetCount", Some(PrimitiveKind::I4.token()));

        let mut action = ReturnAction::new(&ctx, 0x4000);
        action.bind_return_value(AnalysedOperand::constant(
            PrimitiveKind::String,
            ConstData::String("two".to_string()),
        ));
        action.reconcile_constant_return_type(&ctx);

        let Some(AnalysedOperand::Constant(constant)) = action.return_value() else {
            panic!("expected a constant operand");
        };
        assert_eq!(constant.kind, PrimitiveKind::String);
        assert_eq!(constant.data, ConstData::String("two".to_string()));
    }

    #[test]
    fn test_reconcile_skips_variables_and_unresolvable_types() {
        let types = TypeRegistry::new();

        // Variable operands are never coerced
        let ctx = MethodContext::new(&types, "GetCount", Some(PrimitiveKind::I4.token()));
        let mut action = ReturnAction::new(&ctx, 0x4000);
        let local = AnalysedOperand::variable("local_0", 0, PrimitiveKind::I8.token());
        action.bind_return_value(local.clone());
        action.reconcile_constant_return_type(&ctx);
        assert_eq!(action.return_value(), Some(&local));

        // Unresolvable return types leave constants untouched
        let unknown = MethodContext::new(&types, "Mystery", Some(Token::new(0x0200_FFFF)));
        let mut action = ReturnAction::new(&unknown, 0x4000);
        action.bind_return_value(AnalysedOperand::constant(
            PrimitiveKind::I4,
            ConstData::I4(7),
        ));
        action.reconcile_constant_return_type(&unknown);
        let Some(AnalysedOperand::Constant(constant)) = action.return_value() else {
            panic!("expected a constant operand");
        };
        assert_eq!(constant.kind, PrimitiveKind::I4);
    }

    #[test]
    fn test_void_emission() {
        let types = TypeRegistry::new();
        let ctx = MethodContext::new(&types, "Run", Some(PrimitiveKind::Void.token()));
        let processor = IlProcessor::new();

        let action = ReturnAction::new(&ctx, 0x4000);
        let body = action.to_instructions(&ctx, &processor).unwrap();
        assert_eq!(body.len(), 1);
        assert_eq!(body[0].mnemonic, "ret");
        assert_eq!(action.to_pseudocode(), "return");
    }

    #[test]
    fn test_variable_type_mismatch_is_tainted() {
        let types = TypeRegistry::new();
        let ctx = MethodContext::new(&types, "GetTicks", Some(PrimitiveKind::I8.token()));
        let processor = IlProcessor::new();

        let mut action = ReturnAction::new(&ctx, 0x4000);
        action.bind_return_value(AnalysedOperand::variable(
            "local_0",
            0,
            PrimitiveKind::I4.token(),
        ));

        let result = action.to_instructions(&ctx, &processor);
        assert!(matches!(result, Err(crate::Error::Tainted { .. })));
    }

    #[test]
    fn test_missing_return_value_is_tainted() {
        let types = TypeRegistry::new();
        let ctx = MethodContext::new(&types, "GetCount", Some(PrimitiveKind::I4.token()));
        let processor = IlProcessor::new();

        let action = ReturnAction::new(&ctx, 0x4000);
        assert!(matches!(
            action.to_instructions(&ctx, &processor),
            Err(crate::Error::Tainted { .. })
        ));

        // Diagnostics stay available
        assert_eq!(action.to_pseudocode(), "return");
        assert!(action.to_text_summary().contains("from the function"));
    }

    #[test]
    fn test_always_important() {
        let types = TypeRegistry::new();
        let ctx = MethodContext::new(&types, "Run", Some(PrimitiveKind::Void.token()));
        assert!(ReturnAction::new(&ctx, 0).is_important());
    }
}
