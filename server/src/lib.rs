//! Studiolo is an open-source content-studio platform server.
//!
//! This crate implements the account-settings surface of the platform:
//!
//! - Settings page payload (current user + localized message catalog)
//! - Username and password changes
//! - Issue reports (templated email to the support team)
//! - Storage requests (spreadsheet row + confirmation email)
//! - Account deletion (notification emails, export cleanup, row removal)
//! - Legal policy acceptance
//! - Asynchronous CSV export of the user's account data
//!
//! External collaborators (persistence, SMTP relay, spreadsheet API,
//! background queue) are modeled as traits so deployments can plug in
//! their own implementations.

#![forbid(unsafe_code)]

pub mod error;
pub mod core;
pub mod email;
pub mod i18n;
pub mod settings;
pub mod sheet_adapter;
pub mod user_adapter;
pub mod prelude;
pub mod types;
pub mod routes;

pub use crate::core::app::{App, AppBuilder, AppState};

// vim: ts=4
