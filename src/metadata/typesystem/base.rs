use std::sync::Arc;

use crate::metadata::{token::Token, typesystem::PrimitiveKind};

/// Reference to an `IlType`
pub type IlTypeRc = Arc<IlType>;

/// What kind of type a registry entry is.
///
/// The flavor carries everything reconciliation needs to know about a resolved
/// return type: whether it is an enum (and over which underlying primitive),
/// an array, or a plain primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeFlavor {
    /// A runtime primitive
    Primitive(PrimitiveKind),
    /// An enum type with its language-level underlying representation
    Enum {
        /// Underlying integral primitive of the enum (usually `I4`)
        underlying: PrimitiveKind,
    },
    /// An array type
    Array {
        /// Identity of the element type
        element: Token,
        /// Number of dimensions
        rank: u8,
    },
    /// A reference type (class or interface)
    Class,
    /// A user-defined value type (struct)
    ValueType,
}

/// A resolved type: canonical identity plus name and flavor.
///
/// This is the view the reconstruction stage gets back when it resolves a
/// [`Token`] through the [`crate::metadata::typesystem::TypeRegistry`].
/// Entries are immutable once registered.
pub struct IlType {
    /// Canonical identity
    pub token: Token,
    /// Namespace (can be empty for nested or compiler-generated types)
    pub namespace: String,
    /// Type name
    pub name: String,
    /// Flavor of this type
    pub flavor: TypeFlavor,
}

impl IlType {
    /// Create a new type entry
    ///
    /// ## Arguments
    /// * `token`     - Canonical identity of the type
    /// * `flavor`    - The [`TypeFlavor`]
    /// * `namespace` - Namespace, may be empty
    /// * `name`      - Type name
    #[must_use]
    pub fn new(token: Token, flavor: TypeFlavor, namespace: &str, name: &str) -> Self {
        IlType {
            token,
            namespace: namespace.to_string(),
            name: name.to_string(),
            flavor,
        }
    }

    /// Returns the full name (Namespace.Name) of the type
    #[must_use]
    pub fn fullname(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{0}.{1}", self.namespace, self.name)
        }
    }

    /// Whether this type is an enum
    #[must_use]
    pub fn is_enum(&self) -> bool {
        matches!(self.flavor, TypeFlavor::Enum { .. })
    }

    /// Whether this type is an array
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self.flavor, TypeFlavor::Array { .. })
    }

    /// Whether this type is the string primitive
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self.flavor, TypeFlavor::Primitive(PrimitiveKind::String))
    }

    /// The primitive kind of this type, if it is a primitive
    #[must_use]
    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        match self.flavor {
            TypeFlavor::Primitive(kind) => Some(kind),
            _ => None,
        }
    }

    /// The underlying integral primitive, if this type is an enum
    #[must_use]
    pub fn underlying_kind(&self) -> Option<PrimitiveKind> {
        match self.flavor {
            TypeFlavor::Enum { underlying } => Some(underlying),
            _ => None,
        }
    }
}
