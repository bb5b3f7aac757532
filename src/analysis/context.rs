use crate::metadata::{
    token::Token,
    typesystem::{PrimitiveKind, TypeRegistry},
};

/// Per-method analysis state exposed to reconstruction.
///
/// The context lives for one method's reconstruction and borrows the type
/// registry - it owns neither the registry nor the operands flowing through
/// analysis. Actions capture what they need from it at construction time and
/// receive it again at emission time; the declared return type and void flag
/// never change in between.
pub struct MethodContext<'a> {
    /// Borrowed type registry for identity resolution
    types: &'a TypeRegistry,
    /// Name of the method under reconstruction, for diagnostics
    method_name: String,
    /// Identity of the declared return type; `None` if analysis could not
    /// resolve one
    return_type: Option<Token>,
    /// Fixed at construction from the declared return type
    is_void: bool,
}

impl<'a> MethodContext<'a> {
    /// Create a context for one method's reconstruction
    ///
    /// ## Arguments
    /// * `types`       - The type registry to resolve identities against
    /// * `method_name` - Method name, used in diagnostics only
    /// * `return_type` - Declared return type identity, if resolved
    #[must_use]
    pub fn new(types: &'a TypeRegistry, method_name: &str, return_type: Option<Token>) -> Self {
        let is_void = return_type == Some(PrimitiveKind::Void.token());

        MethodContext {
            types,
            method_name: method_name.to_string(),
            return_type,
            is_void,
        }
    }

    /// Whether the method returns no value
    #[must_use]
    pub fn is_void(&self) -> bool {
        self.is_void
    }

    /// Identity of the declared return type
    #[must_use]
    pub fn return_type(&self) -> Option<Token> {
        self.return_type
    }

    /// The type registry this context resolves against
    #[must_use]
    pub fn types(&self) -> &'a TypeRegistry {
        self.types
    }

    /// Name of the method under reconstruction
    #[must_use]
    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    /// Full name of the declared return type, for diagnostics
    #[must_use]
    pub fn return_type_name(&self) -> String {
        self.return_type
            .and_then(|token| self.types.get(&token))
            .map_or_else(|| "<unresolved>".to_string(), |ty| ty.fullname())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_void_flag_from_return_type() {
        let types = TypeRegistry::new();

        let void_ctx = MethodContext::new(&types, "Run", Some(PrimitiveKind::Void.token()));
        assert!(void_ctx.is_void());

        let i4_ctx = MethodContext::new(&types, "GetCount", Some(PrimitiveKind::I4.token()));
        assert!(!i4_ctx.is_void());

        let unresolved_ctx = MethodContext::new(&types, "Mystery", None);
        assert!(!unresolved_ctx.is_void());
    }

    #[test]
    fn test_return_type_name() {
        let types = TypeRegistry::new();

        let ctx = MethodContext::new(&types, "GetCount", Some(PrimitiveKind::I4.token()));
        assert_eq!(ctx.return_type_name(), "System.Int32");

        let unknown = MethodContext::new(&types, "Mystery", Some(Token::new(0x0200_FFFF)));
        assert_eq!(unknown.return_type_name(), "<unresolved>");
    }
}
