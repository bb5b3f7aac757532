use std::sync::Arc;

use dashmap::DashMap;

use crate::{
    metadata::{
        token::Token,
        typesystem::{IlType, IlTypeRc, PrimitiveKind, TypeFlavor},
    },
    Error::TypeInsert,
    Result,
};

/// Central registry for all types visible to a reconstruction run.
///
/// The registry is the resolver side of the type-identity contract: analysis
/// hands around [`Token`] values, and anything that needs flavor information
/// asks the registry. All runtime primitives are pre-registered under their
/// artificial `0xF000_xxxx` tokens; enum, array and class entries are
/// registered by the metadata loader before reconstruction starts.
///
/// # Thread Safety
///
/// Insertion goes into an append-only store (`boxcar::Vec`) and lookups go
/// through `DashMap` indices, so the registry can be shared across parallel
/// per-method emission workers without locking.
pub struct TypeRegistry {
    /// All registered types, in insertion order
    types: boxcar::Vec<IlTypeRc>,
    /// Token -> slot index
    token_index: DashMap<Token, usize>,
    /// FullName -> token, for diagnostics and loader lookups
    fullname_index: DashMap<String, Token>,
}

impl TypeRegistry {
    /// Create a new registry with all runtime primitives pre-registered
    #[must_use]
    pub fn new() -> Self {
        let registry = TypeRegistry {
            types: boxcar::Vec::new(),
            token_index: DashMap::new(),
            fullname_index: DashMap::new(),
        };

        for kind in PrimitiveKind::ALL {
            let entry = IlType::new(
                kind.token(),
                TypeFlavor::Primitive(kind),
                "System",
                kind.runtime_name(),
            );
            // Primitive tokens are unique by construction
            let _ = registry.insert(entry);
        }

        registry
    }

    /// Register a new type
    ///
    /// ## Arguments
    /// * `entry` - The type to register
    ///
    /// # Errors
    /// Returns [`TypeInsert`] if a type with the same token is already registered.
    pub fn insert(&self, entry: IlType) -> Result<IlTypeRc> {
        if self.token_index.contains_key(&entry.token) {
            return Err(TypeInsert(entry.token));
        }

        let entry = Arc::new(entry);
        let slot = self.types.push(entry.clone());
        self.token_index.insert(entry.token, slot);
        self.fullname_index.insert(entry.fullname(), entry.token);

        Ok(entry)
    }

    /// Resolve a type identity to its registered entry
    ///
    /// Returns `None` for unknown or null tokens - an unresolvable identity is
    /// a legal analysis state, not an error; callers decide what it means.
    #[must_use]
    pub fn get(&self, token: &Token) -> Option<IlTypeRc> {
        self.token_index
            .get(token)
            .and_then(|slot| self.types.get(*slot).cloned())
    }

    /// Look up a type by its full name (Namespace.Name)
    #[must_use]
    pub fn get_by_fullname(&self, fullname: &str) -> Option<IlTypeRc> {
        self.fullname_index
            .get(fullname)
            .and_then(|entry| self.get(entry.value()))
    }

    /// The pre-registered entry for a runtime primitive
    #[must_use]
    pub fn primitive(&self, kind: PrimitiveKind) -> IlTypeRc {
        // All primitives are registered at construction; the fallback only
        // exists to keep this lookup infallible.
        self.get(&kind.token()).unwrap_or_else(|| {
            Arc::new(IlType::new(
                kind.token(),
                TypeFlavor::Primitive(kind),
                "System",
                kind.runtime_name(),
            ))
        })
    }

    /// Number of registered types
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.count()
    }

    /// Whether the registry holds no types
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitives_preregistered() {
        let registry = TypeRegistry::new();
        assert_eq!(registry.len(), PrimitiveKind::ALL.len());

        let int32 = registry.primitive(PrimitiveKind::I4);
        assert_eq!(int32.fullname(), "System.Int32");
        assert_eq!(int32.primitive_kind(), Some(PrimitiveKind::I4));

        assert!(registry.get_by_fullname("System.Single").is_some());
    }

    #[test]
    fn test_insert_and_resolve() {
        let registry = TypeRegistry::new();
        let token = Token::new(0x0200_0010);
        registry
            .insert(IlType::new(
                token,
                TypeFlavor::Enum {
                    underlying: PrimitiveKind::I4,
                },
                "Game",
                "WeaponKind",
            ))
            .unwrap();

        let resolved = registry.get(&token).unwrap();
        assert!(resolved.is_enum());
        assert_eq!(resolved.underlying_kind(), Some(PrimitiveKind::I4));
        assert_eq!(
            registry.get_by_fullname("Game.WeaponKind").unwrap().token,
            token
        );
    }

    #[test]
    fn test_duplicate_token_rejected() {
        let registry = TypeRegistry::new();
        let token = Token::new(0x0200_0010);
        registry
            .insert(IlType::new(token, TypeFlavor::Class, "A", "First"))
            .unwrap();
        assert!(registry
            .insert(IlType::new(token, TypeFlavor::Class, "A", "Second"))
            .is_err());
    }

    #[test]
    fn test_unknown_token_resolves_to_none() {
        let registry = TypeRegistry::new();
        assert!(registry.get(&Token::new(0x0200_FFFF)).is_none());
    }
}
