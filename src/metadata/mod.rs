//! Type identities and the type system registry.
//!
//! This module owns the canonical representation of type identity used across
//! the reconstruction stage. Analysis and emission never compare types by
//! textual name; they compare [`token::Token`] values and resolve them through
//! the [`typesystem::TypeRegistry`] when flavor information (enum, array,
//! primitive) is needed.

pub mod token;
pub mod typesystem;
