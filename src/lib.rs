// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(dead_code)]

//! # reconcil
//!
//! The reconstruction stage of a native-binary decompiler for .NET. Once the
//! native instruction stream of a method has been decoded and symbolically
//! analyzed, `reconcil` re-expresses the method body as a sequence of semantic
//! ACTIONS - one per recognizable high-level operation - and emits, for every
//! action, both a verifiable CIL instruction sequence and an equivalent line
//! of pseudocode.
//!
//! ## Features
//!
//! - **🔁 Dual emission** - Every action produces bytecode for regeneration and pseudocode for inspection
//! - **🧮 Byte-preserving reconciliation** - Constant return values are retagged via bit-pattern reinterpretation, never numeric casts
//! - **🛡️ Tainted-reconstruction detection** - Bodies that cannot be emitted as valid CIL fail specifically instead of producing unverifiable bytecode
//! - **⚡ Parallel emission** - Distinct methods emit concurrently; each method's action set stays strictly sequential
//! - **📊 Thread-safe type registry** - Lock-free lookups for type identities, primitives, enums and arrays
//!
//! ## Quick Start
//!
//! ```rust
//! use reconcil::prelude::*;
//!
//! let types = TypeRegistry::new();
//! let i4 = types.primitive(PrimitiveKind::I4).token;
//!
//! let ctx = MethodContext::new(&types, "GetCount", Some(i4));
//! let mut action = ReturnAction::new(&ctx, 0x1800);
//! action.bind_return_value(AnalysedOperand::constant(PrimitiveKind::I4, ConstData::I4(42)));
//! action.reconcile_constant_return_type(&ctx);
//!
//! let processor = IlProcessor::new();
//! let body = action.to_instructions(&ctx, &processor)?;
//! assert_eq!(body.last().unwrap().mnemonic, "ret");
//! assert_eq!(action.to_pseudocode(), "return 42");
//! # Ok::<(), reconcil::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`metadata`] - Type identities and the registry used to resolve them
//! - [`analysis`] - The symbolic operand model and per-method analysis context
//! - [`assembly`] - Emitted instruction representation and the bytecode
//!   processor that allocates instructions
//! - [`reconstruction`] - The action abstraction, the return action, and the
//!   emission driver
//!
//! ## Scope
//!
//! Native instruction decoding, control-flow recovery and symbolic operand
//! tracking happen upstream; metadata writing happens downstream. This crate
//! owns the contract between an analyzed method and its emitted body.

#[macro_use]
pub(crate) mod error;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use reconcil::prelude::*;
///
/// let types = TypeRegistry::new();
/// let string = types.primitive(PrimitiveKind::String);
/// assert_eq!(string.fullname(), "System.String");
/// ```
pub mod prelude;

/// Type identities and the thread-safe type registry.
///
/// A [`metadata::token::Token`] is the canonical identity of a type; the
/// [`metadata::typesystem::TypeRegistry`] resolves identities to
/// [`metadata::typesystem::IlType`] entries carrying flavor information
/// (primitive, enum with underlying type, array, class).
pub mod metadata;

/// Symbolic analysis results consumed by reconstruction.
///
/// The operand model ([`analysis::AnalysedOperand`]) and the per-method
/// analysis context ([`analysis::MethodContext`]) that actions capture at
/// construction and read again at emission time.
pub mod analysis;

/// Emitted CIL instruction representation and the bytecode processor.
///
/// [`assembly::IlProcessor`] allocates [`assembly::Instruction`] values from
/// mnemonics and operands; the [`assembly::emit`] helpers select the most
/// compact encoding for parameterized loads.
pub mod assembly;

/// Semantic actions and dual emission.
///
/// The [`reconstruction::Action`] trait defines the four capabilities every
/// reconstructed operation must provide; [`reconstruction::ReturnAction`] is
/// the return-point action with its reconciliation algorithm, and
/// [`reconstruction::MethodReconstruction`] drives emission of a whole body.
pub mod reconstruction;

/// `reconcil` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is
/// always [`Error`]. Used consistently throughout the crate for all fallible
/// operations.
pub type Result<T> = std::result::Result<T, Error>;

/// `reconcil` Error type
///
/// The main error type for all operations in this crate. The
/// [`Error::Tainted`] variant signals that an analyzed method body cannot be
/// faithfully reconstructed into valid bytecode.
pub use error::Error;
