//! Builder error types.
//!
//! Every failure the builder can produce is fatal and carries a distinct
//! kind, so callers can present actionable diagnostics. Nothing is retried
//! internally; callers may retry a fresh build.

use thiserror::Error;

/// Errors produced while building or (de)serializing a transaction.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A field required at build time (sender, gas budget, gas payment) is absent.
    #[error("Missing required field: {0}")]
    MissingRequiredField(&'static str),

    /// A Move call supplied a different number of arguments than its
    /// signature declares (after dropping the implicit context parameter).
    #[error("{target} expects {expected} arguments, got {actual}")]
    ArgumentCountMismatch {
        target: String,
        expected: usize,
        actual: usize,
    },

    /// A Move call parameter is neither pure-encodable nor an object.
    #[error("Unknown argument type for parameter {index} of {target}")]
    UnknownArgumentType { target: String, index: usize },

    /// A raw input value does not fit the kind its consumer declares.
    #[error("Cannot encode input {input} as {expected}: {source}")]
    Encoding {
        input: u16,
        expected: String,
        #[source]
        source: anyhow::Error,
    },

    /// An object-kinded parameter received a raw value that is not a
    /// textual object identifier.
    #[error("Input {input} expected an object id, got {value}")]
    ExpectedObjectId { input: u16, value: String },

    /// The batched object lookup failed; the whole build aborts.
    #[error("Object lookup failed: {0}")]
    ObjectLookup(#[source] anyhow::Error),

    /// An input survived resolution unresolved: no resolvable command field
    /// ever referenced it.
    #[error("Input {0} is not referenced by any resolvable command field")]
    DanglingInput(u16),

    /// The snapshot carries a version this build does not understand.
    #[error("Unsupported snapshot version {0}")]
    SnapshotVersionMismatch(u64),

    /// Snapshots only carry resolved inputs; raw values are not safely
    /// round-trippable.
    #[error("Input {0} must be resolved before serializing")]
    SnapshotUnresolvedInput(u16),

    /// The snapshot is not well-formed JSON for the declared version.
    #[error("Malformed snapshot: {0}")]
    SnapshotFormat(#[from] serde_json::Error),

    /// Result references are structural placeholders; writes are rejected.
    #[error("Result references are immutable once created")]
    ResultReferenceImmutable,

    /// A call target was not of the form `package::module::function`.
    #[error("Invalid call target '{0}': expected package::module::function")]
    InvalidTarget(String),

    /// A chain-state query failed. No internal retry; the caller owns
    /// retry policy.
    #[error("Chain state query failed: {0}")]
    Rpc(#[source] anyhow::Error),
}
