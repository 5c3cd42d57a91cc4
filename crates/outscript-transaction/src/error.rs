/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// The transaction structure is invalid (e.g. key count does not match inputs).
    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),
    /// An error occurred while producing a signature.
    #[error("signing error: {0}")]
    SigningError(String),
    /// An error occurred during binary serialization or deserialization.
    #[error("serialization error: {0}")]
    SerializationError(String),
    /// The requested sign scheme is not one this crate can sign or prefill.
    #[error("unsupported sign scheme: {0}")]
    UnsupportedScheme(String),
    /// A textual or JSON amount could not be parsed.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    /// An underlying script error (forwarded from `outscript-script`).
    #[error("script error: {0}")]
    Script(#[from] outscript_script::ScriptError),
    /// An underlying primitives error (forwarded from `outscript-primitives`).
    #[error("primitives error: {0}")]
    Primitives(#[from] outscript_primitives::PrimitivesError),
}
