//! SMTP email sender using lettre.

use async_trait::async_trait;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::SmtpTransport;
use lettre::{Message, Transport};
use std::time::Duration;

use crate::email::{EmailMessage, MailSender};
use crate::prelude::*;

/// SMTP relay configuration
#[derive(Clone, Debug)]
pub struct SmtpConfig {
	pub host: String,
	pub port: u16,
	pub username: String,
	pub password: String,
	/// One of "none", "starttls", "tls"
	pub tls_mode: String,
	pub timeout_seconds: u64,
}

/// SMTP email sender
#[derive(Debug)]
pub struct SmtpMailSender {
	mailer: SmtpTransport,
}

impl SmtpMailSender {
	pub fn new(config: &SmtpConfig) -> SlResult<Self> {
		let tls = match config.tls_mode.as_str() {
			"tls" => lettre::transport::smtp::client::Tls::Wrapper(
				lettre::transport::smtp::client::TlsParameters::builder(config.host.clone())
					.build()
					.map_err(|e| Error::ConfigError(format!("TLS configuration error: {}", e)))?,
			),
			"starttls" => lettre::transport::smtp::client::Tls::Opportunistic(
				lettre::transport::smtp::client::TlsParameters::builder(config.host.clone())
					.build()
					.map_err(|e| Error::ConfigError(format!("TLS configuration error: {}", e)))?,
			),
			"none" => lettre::transport::smtp::client::Tls::None,
			other => {
				return Err(Error::ConfigError(format!(
					"Invalid TLS mode: {}. Must be 'none', 'starttls', or 'tls'",
					other
				)))
			}
		};

		let credentials = Credentials::new(config.username.clone(), config.password.clone());
		let mailer = SmtpTransport::builder_dangerous(&config.host)
			.port(config.port)
			.timeout(Some(Duration::from_secs(config.timeout_seconds)))
			.tls(tls)
			.credentials(credentials)
			.build();

		Ok(Self { mailer })
	}
}

#[async_trait]
impl MailSender for SmtpMailSender {
	async fn send_mail(&self, message: EmailMessage) -> SlResult<()> {
		if message.to.is_empty() {
			return Err(Error::ValidationError("No recipients".into()));
		}

		let mut builder = Message::builder()
			.from(
				message
					.from
					.parse()
					.map_err(|_| Error::ValidationError("Invalid from email format".into()))?,
			)
			.subject(&message.subject);

		for to in &message.to {
			builder = builder.to(to
				.parse()
				.map_err(|_| Error::ValidationError("Invalid recipient email format".into()))?);
		}

		let email = builder
			.singlepart(lettre::message::SinglePart::plain(message.body))
			.map_err(|e| Error::ValidationError(format!("Failed to build email: {}", e)))?;

		match self.mailer.send(&email) {
			Ok(response) => {
				info!("Email sent to {:?} (response: {:?})", message.to, response);
				Ok(())
			}
			Err(e) => {
				warn!("Failed to send email to {:?}: {}", message.to, e);
				Err(Error::ServiceUnavailable(format!("SMTP send failed: {}", e)))
			}
		}
	}
}


// vim: ts=4
