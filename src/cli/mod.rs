//! # AIMS CLI Module
//!
//! The interactive surface of the tool: a numbered menu of reports and
//! inserts over an agricultural monitoring database.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      CLI Entry Point                        │
//! │                      (bin/aims.rs)                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │                        Menu Loop                            │
//! │  - Reads selections and field values via rustyline          │
//! │  - Dispatches through the option table to the catalog       │
//! │  - Prints rendered tables / errors, resumes on failure      │
//! ├─────────────────────────────────────────────────────────────┤
//! │       Table Renderer          │          History            │
//! │  fixed-width text tables      │  persistent ~/.aims_*       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Menu Operations
//!
//! | Option | Operation                                          |
//! |--------|----------------------------------------------------|
//! | 1–9    | read-only reports (some with prompted parameters)  |
//! | 10     | insert a fieldcrop (planting/harvest) row          |
//! | 11     | insert a soilsample row                            |
//! | 0      | exit                                               |
//!
//! Prompt history is persisted to `~/.aims_history` by default and can be
//! moved or disabled with the `AIMS_HISTORY` environment variable.
//!
//! ## Module Organization
//!
//! - `menu`: menu loop, prompting, and the selection dispatch table
//! - `table`: fixed-width table formatter for query results
//! - `history`: history file path resolution

pub mod history;
pub mod menu;
pub mod table;

pub use menu::Menu;
