//! Remote spreadsheet adapter trait.
//!
//! Storage requests are logged as one flat row per request in a tracking
//! sheet. The production implementation talks to the spreadsheet API;
//! tests and the basic server use an in-memory recorder.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::prelude::*;

#[async_trait]
pub trait SheetAppender: Send + Sync + Debug {
	/// Append one ordered row of values to the given sheet.
	async fn append_row(&self, sheet_id: &str, values: &[String]) -> SlResult<()>;
}

// vim: ts=4
