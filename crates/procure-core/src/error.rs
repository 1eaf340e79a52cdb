//! Unified error type for the procurement pipeline.
//!
//! Mirrors the role of a single ecosystem-wide error enum that every stage
//! converts into at its public boundary, while internal plumbing is free to
//! use `anyhow` for convenience (see §7 of the specification for the error
//! kinds this type represents).

use thiserror::Error;

/// Unified error type for all procurement pipeline operations.
#[derive(Error, Debug)]
pub enum ProcureError {
    /// A run, job, or entity could not be resolved by ID.
    #[error("not found: {0}")]
    NotFound(String),

    /// A malformed request (empty SKU list, negative horizon, ...).
    #[error("validation error: {0}")]
    Validation(String),

    /// The MILP solve produced no incumbent; this is a terminal run status,
    /// not a thrown error, but the type exists so callers can match it when
    /// a stage chooses to surface it that way.
    #[error("solve is infeasible: {0}")]
    Infeasible(String),

    /// An unexpected failure part-way through a stage; the stage's run
    /// record has already been (or will be) flipped to `failed`.
    #[error("stage failed: {0}")]
    Stage(String),

    /// A solver backend error distinct from infeasibility (build failure,
    /// backend crash, timeout with no incumbent handled elsewhere).
    #[error("solver error: {0}")]
    Solver(String),

    /// I/O errors, kept for parity with the teacher's error enum even
    /// though the reference store is in-memory.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic catch-all for wrapping external errors.
    #[error("{0}")]
    Other(String),
}

pub type ProcureResult<T> = Result<T, ProcureError>;

impl From<anyhow::Error> for ProcureError {
    fn from(err: anyhow::Error) -> Self {
        ProcureError::Other(err.to_string())
    }
}

impl From<String> for ProcureError {
    fn from(s: String) -> Self {
        ProcureError::Other(s)
    }
}

impl From<&str> for ProcureError {
    fn from(s: &str) -> Self {
        ProcureError::Other(s.to_string())
    }
}

impl From<serde_json::Error> for ProcureError {
    fn from(err: serde_json::Error) -> Self {
        ProcureError::Other(err.to_string())
    }
}
