//! Type system for the reconstruction stage.
//!
//! This module provides the slice of the .NET type system that return-point
//! reconstruction needs: primitive kinds with their byte widths, type flavors
//! (primitive, enum with underlying type, array, class), and a thread-safe
//! registry that resolves [`crate::metadata::token::Token`] identities to
//! [`IlType`] entries.
//!
//! # Key Components
//!
//! - [`PrimitiveKind`]: Built-in runtime primitives (int32, string, object, ...)
//! - [`TypeFlavor`]: What kind of type an entry is
//! - [`IlType`]: A resolved type with identity, name and flavor
//! - [`TypeRegistry`]: Central registry, primitives pre-registered
//!
//! # Examples
//!
//! ```rust
//! use reconcil::metadata::typesystem::{PrimitiveKind, TypeRegistry};
//!
//! let types = TypeRegistry::new();
//! let int32 = types.primitive(PrimitiveKind::I4);
//! assert_eq!(int32.fullname(), "System.Int32");
//! assert!(types.get(&int32.token).is_some());
//! ```

mod base;
mod primitives;
mod registry;

pub use base::{IlType, IlTypeRc, TypeFlavor};
pub use primitives::PrimitiveKind;
pub use registry::TypeRegistry;
