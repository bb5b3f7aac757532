use thiserror::Error;

use crate::metadata::token::Token;

macro_rules! tainted_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Tainted {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Tainted {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// This enum covers all failure modes of the reconstruction stage: tainted method
/// bodies that cannot be emitted as valid bytecode, type system registration and
/// lookup failures, and requests for instructions the processor does not know.
///
/// # Error Categories
///
/// ## Reconstruction Errors
/// - [`Error::Tainted`] - The analyzed method body cannot be emitted as valid bytecode
///
/// ## Type System Errors
/// - [`Error::TypeInsert`] - Failed to register new type in the registry
/// - [`Error::TypeNotFound`] - Requested type not found in the registry
///
/// ## Emission Errors
/// - [`Error::UnknownInstruction`] - The bytecode processor has no encoding for a mnemonic
#[derive(Error, Debug)]
pub enum Error {
    /// The recovered method body cannot be faithfully reconstructed.
    ///
    /// Raised during bytecode emission when the symbolic state captured by an
    /// action is inconsistent with the method's declared signature - for
    /// example a non-void return with no bound value, or a local whose type
    /// does not match the declared return type. A tainted body aborts bytecode
    /// emission for the containing method; pseudocode and summary emission
    /// remain available so partial diagnostics can still be produced.
    ///
    /// # Fields
    ///
    /// * `message` - Description of the inconsistency
    /// * `file` - Source file where the taint was detected
    /// * `line` - Source line where the taint was detected
    #[error("Tainted reconstruction - {file}:{line}: {message}")]
    Tainted {
        /// The message to be printed for the Tainted error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// Failed to insert new type into the `TypeRegistry`.
    ///
    /// The associated [`Token`] identifies the type whose registration
    /// conflicted with an existing entry.
    #[error("Failed to insert new type into TypeRegistry - {0}")]
    TypeInsert(Token),

    /// Failed to find type in the `TypeRegistry`.
    ///
    /// The associated [`Token`] identifies which type was not found.
    #[error("Failed to find type in TypeRegistry - {0}")]
    TypeNotFound(Token),

    /// The bytecode processor has no encoding for the requested mnemonic.
    #[error("Unknown instruction mnemonic - {0}")]
    UnknownInstruction(&'static str),

    /// Generic error for miscellaneous failures.
    #[error("{0}")]
    Error(String),
}
