//! # Error Taxonomy
//!
//! Typed errors for every failure class the tool can hit, from an unopenable
//! database file down to a single rejected input field.
//!
//! The variants mirror the stages of an operation:
//!
//! | Variant      | Stage                  | Outcome                       |
//! |--------------|------------------------|-------------------------------|
//! | `Connection` | opening the store      | fatal, process exits          |
//! | `Prepare`    | compiling a template   | operation aborted             |
//! | `Bind`       | binding arguments      | operation aborted             |
//! | `Step`       | executing a statement  | operation aborted, diagnostic |
//! | `Validation` | checking user input    | aborted before any statement  |
//! | `NotFound`   | referential pre-check  | aborted before any statement  |
//!
//! Everything below `Connection` is caught at the menu boundary, printed,
//! and the menu resumes. Nothing is retried automatically.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AimsError {
    /// The database file could not be opened as a valid SQLite store.
    #[error("cannot open database '{}': {source}", path.display())]
    Connection {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// A SQL template failed to compile.
    #[error("statement failed to compile: {detail}")]
    Prepare { detail: String },

    /// The argument list does not match the template's placeholder count.
    #[error("statement takes {expected} bound value(s), got {got}")]
    Bind { expected: usize, got: usize },

    /// Execution-time failure, e.g. a constraint violation.
    #[error("statement failed: {detail}")]
    Step { detail: String },

    /// A user-supplied scalar was rejected before any statement was issued.
    #[error("invalid {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: String,
    },

    /// A referenced primary key does not exist in its table.
    #[error("no {table} row with key {key}")]
    NotFound { table: &'static str, key: i64 },
}

impl AimsError {
    pub(crate) fn prepare(source: rusqlite::Error) -> Self {
        AimsError::Prepare {
            detail: source.to_string(),
        }
    }

    pub(crate) fn step(source: rusqlite::Error) -> Self {
        AimsError::Step {
            detail: source.to_string(),
        }
    }
}
