//! Email subsystem: message type, sender trait, and template rendering.
//!
//! The settings actions send plain-text notification emails (issue
//! reports, storage requests, account deletion). Sending is synchronous
//! from the handler's point of view and failures propagate; there is no
//! retry queue here.

pub mod sender;
pub mod template;

pub use sender::{SmtpConfig, SmtpMailSender};
pub use template::TemplateEngine;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::prelude::*;

/// Email message to be sent
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct EmailMessage {
	pub from: String,
	pub to: Vec<String>,
	pub subject: String,
	pub body: String,
}

#[async_trait]
pub trait MailSender: Send + Sync + Debug {
	async fn send_mail(&self, message: EmailMessage) -> SlResult<()>;
}

// vim: ts=4
