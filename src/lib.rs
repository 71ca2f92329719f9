//! # AIMS - Agricultural Information Monitoring System
//!
//! An interactive reporting and data-entry tool over a SQLite database of
//! agricultural monitoring records: farmers, fields, crops, plantings,
//! soil samples, seasons, and maintenance events.
//!
//! ## Quick Start
//!
//! ```ignore
//! use aims::{Database, Value};
//!
//! let db = Database::open("./aims.sqlite")?;
//!
//! let mut stmt = db.prepare(
//!     "SELECT c_name FROM crop WHERE c_preferredseason = ?1",
//! )?;
//! let mut rows = stmt.query(&[Value::Int(1)])?;
//! while let Some(row) = rows.advance()? {
//!     println!("{:?}", row.get_text(0));
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │      Menu / Dispatch (cli::menu)    │
//! ├─────────────────────────────────────┤
//! │  Catalog (reports + inserts) and    │
//! │  field validation chains (catalog)  │
//! ├──────────────────┬──────────────────┤
//! │  Input Validator │ Table Renderer   │
//! │  (validate)      │ (cli::table)     │
//! ├──────────────────┴──────────────────┤
//! │  Statement Executor + Connection    │
//! │  (database, over rusqlite)          │
//! └─────────────────────────────────────┘
//! ```
//!
//! Every operation flows Validator → Executor → Renderer: user input is
//! rejected before storage is touched, statements bind typed [`Value`]s
//! positionally, result rows are materialized lazily, and rendering is a
//! single forward pass.
//!
//! ## Module Overview
//!
//! - [`database`]: connection lifecycle, prepared statements, lazy cursors
//! - [`types`]: the typed column value
//! - [`validate`]: pure input checks (date shape, numeric ranges)
//! - [`catalog`]: the canned reports and validated inserts
//! - [`cli`]: menu loop, table renderer, prompt history
//! - [`error`]: the error taxonomy

pub mod catalog;
pub mod cli;
pub mod database;
pub mod error;
pub mod types;
pub mod validate;

pub use database::{Database, Row, RowCursor, Statement};
pub use error::AimsError;
pub use types::Value;
