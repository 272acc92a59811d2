//! Account settings subsystem.
//!
//! - **Forms** (`forms.rs`): two-stage validation of the JSON request
//!   bodies, one validator per action
//! - **Handlers** (`handler.rs`): HTTP endpoints, thin glue over the
//!   collaborator traits
//! - **Export** (`export.rs`): background CSV export of account data
//! - **Types** (`types.rs`): settings page view model

pub mod export;
pub mod forms;
pub mod handler;
pub mod types;

pub use export::{ExportQueue, WorkerExportQueue};

// vim: ts=4
