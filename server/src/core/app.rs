//! App state type

use std::{
	path::{Path, PathBuf},
	sync::Arc,
};

use crate::core::{session::SessionStore, worker};
use crate::email::{MailSender, TemplateEngine};
use crate::error::{Error, SlResult};
use crate::i18n::MessageCatalog;
use crate::settings::{ExportQueue, WorkerExportQueue};
use crate::sheet_adapter::SheetAppender;
use crate::user_adapter::UserAdapter;
use tracing::info;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct AppState {
	pub worker: Arc<worker::WorkerPool>,
	pub sessions: SessionStore,
	pub catalog: MessageCatalog,
	pub templates: TemplateEngine,
	pub opts: AppOpts,

	pub user_adapter: Arc<dyn UserAdapter>,
	pub mail_sender: Arc<dyn MailSender>,
	pub sheet_appender: Arc<dyn SheetAppender>,
	pub export_queue: Arc<dyn ExportQueue>,
}

pub type App = Arc<AppState>;

pub struct Adapters {
	pub user_adapter: Option<Arc<dyn UserAdapter>>,
	pub mail_sender: Option<Arc<dyn MailSender>>,
	pub sheet_appender: Option<Arc<dyn SheetAppender>>,
	pub export_queue: Option<Arc<dyn ExportQueue>>,
}

#[derive(Debug)]
pub struct AppOpts {
	pub listen: Box<str>,
	pub secret: Box<str>,
	pub site_name: Box<str>,
	pub from_email: Box<str>,
	pub help_email: Box<str>,
	pub space_request_email: Box<str>,
	pub registration_info_email: Box<str>,
	pub policy_email: Box<str>,
	pub storage_sheet_id: Box<str>,
	pub export_dir: Box<Path>,
	pub deletion_buffer_days: i64,
	pub default_landing: Box<str>,
	pub policies_path: Box<str>,
	pub unsupported_browsers: Box<[Box<str>]>,
}

pub struct AppBuilder {
	opts: AppOpts,
	worker: Option<Arc<worker::WorkerPool>>,
	catalog: Option<MessageCatalog>,
	adapters: Adapters,
}

impl AppBuilder {
	pub fn new() -> Self {
		AppBuilder {
			opts: AppOpts {
				listen: "127.0.0.1:8080".into(),
				secret: "".into(),
				site_name: "Studiolo".into(),
				from_email: "noreply@studiolo.org".into(),
				help_email: "help@studiolo.org".into(),
				space_request_email: "storage@studiolo.org".into(),
				registration_info_email: "accounts@studiolo.org".into(),
				policy_email: "legal@studiolo.org".into(),
				storage_sheet_id: "".into(),
				export_dir: PathBuf::from("./exports").into(),
				deletion_buffer_days: 30,
				default_landing: "/channels".into(),
				policies_path: "/policies".into(),
				unsupported_browsers: Box::new(["MSIE".into(), "Trident/".into()]),
			},
			worker: None,
			catalog: None,
			adapters: Adapters {
				user_adapter: None,
				mail_sender: None,
				sheet_appender: None,
				export_queue: None,
			},
		}
	}

	// Opts
	pub fn listen(&mut self, listen: impl Into<Box<str>>) -> &mut Self { self.opts.listen = listen.into(); self }
	pub fn secret(&mut self, secret: impl Into<Box<str>>) -> &mut Self { self.opts.secret = secret.into(); self }
	pub fn site_name(&mut self, site_name: impl Into<Box<str>>) -> &mut Self { self.opts.site_name = site_name.into(); self }
	pub fn from_email(&mut self, from_email: impl Into<Box<str>>) -> &mut Self { self.opts.from_email = from_email.into(); self }
	pub fn help_email(&mut self, help_email: impl Into<Box<str>>) -> &mut Self { self.opts.help_email = help_email.into(); self }
	pub fn space_request_email(&mut self, email: impl Into<Box<str>>) -> &mut Self { self.opts.space_request_email = email.into(); self }
	pub fn registration_info_email(&mut self, email: impl Into<Box<str>>) -> &mut Self { self.opts.registration_info_email = email.into(); self }
	pub fn policy_email(&mut self, email: impl Into<Box<str>>) -> &mut Self { self.opts.policy_email = email.into(); self }
	pub fn storage_sheet_id(&mut self, sheet_id: impl Into<Box<str>>) -> &mut Self { self.opts.storage_sheet_id = sheet_id.into(); self }
	pub fn export_dir(&mut self, export_dir: impl Into<Box<Path>>) -> &mut Self { self.opts.export_dir = export_dir.into(); self }
	pub fn deletion_buffer_days(&mut self, days: i64) -> &mut Self { self.opts.deletion_buffer_days = days; self }
	pub fn default_landing(&mut self, path: impl Into<Box<str>>) -> &mut Self { self.opts.default_landing = path.into(); self }
	pub fn policies_path(&mut self, path: impl Into<Box<str>>) -> &mut Self { self.opts.policies_path = path.into(); self }
	pub fn unsupported_browsers(&mut self, markers: impl IntoIterator<Item = impl Into<Box<str>>>) -> &mut Self {
		self.opts.unsupported_browsers = markers.into_iter().map(|m| m.into()).collect();
		self
	}
	pub fn worker(&mut self, worker: Arc<worker::WorkerPool>) -> &mut Self { self.worker = Some(worker); self }
	pub fn catalog(&mut self, catalog: MessageCatalog) -> &mut Self { self.catalog = Some(catalog); self }

	// Adapters
	pub fn user_adapter(&mut self, user_adapter: Arc<dyn UserAdapter>) -> &mut Self { self.adapters.user_adapter = Some(user_adapter); self }
	pub fn mail_sender(&mut self, mail_sender: Arc<dyn MailSender>) -> &mut Self { self.adapters.mail_sender = Some(mail_sender); self }
	pub fn sheet_appender(&mut self, sheet_appender: Arc<dyn SheetAppender>) -> &mut Self { self.adapters.sheet_appender = Some(sheet_appender); self }
	pub fn export_queue(&mut self, export_queue: Arc<dyn ExportQueue>) -> &mut Self { self.adapters.export_queue = Some(export_queue); self }

	/// Assemble the shared application state without starting a server.
	pub fn build(self) -> SlResult<App> {
		if self.opts.secret.is_empty() {
			return Err(Error::ConfigError("No token secret configured".into()));
		}
		let user_adapter = self
			.adapters
			.user_adapter
			.ok_or_else(|| Error::ConfigError("No user adapter configured".into()))?;
		let mail_sender = self
			.adapters
			.mail_sender
			.ok_or_else(|| Error::ConfigError("No mail sender configured".into()))?;
		let sheet_appender = self
			.adapters
			.sheet_appender
			.ok_or_else(|| Error::ConfigError("No sheet appender configured".into()))?;

		let worker = self.worker.unwrap_or_else(|| worker::WorkerPool::new(1, 2));
		let export_queue = match self.adapters.export_queue {
			Some(queue) => queue,
			None => Arc::new(WorkerExportQueue::new(worker.clone(), self.opts.export_dir.clone())),
		};

		Ok(Arc::new(AppState {
			worker,
			sessions: SessionStore::new(),
			catalog: self.catalog.unwrap_or_default(),
			templates: TemplateEngine::new()?,
			opts: self.opts,

			user_adapter,
			mail_sender,
			sheet_appender,
			export_queue,
		}))
	}

	/// Build the application and serve it until shutdown.
	pub async fn run(self) -> SlResult<()> {
		tracing_subscriber::fmt()
			.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
			.with_target(false)
			.init();
		info!("Studiolo settings server v{}", VERSION);

		let app = self.build()?;
		tokio::fs::create_dir_all(&app.opts.export_dir).await?;

		let router = crate::routes::init(app.clone());
		let listener = tokio::net::TcpListener::bind(app.opts.listen.as_ref()).await?;
		info!("Listening on {}", app.opts.listen);

		axum::serve(listener, router)
			.await
			.map_err(|e| Error::ServiceUnavailable(format!("server error: {}", e)))?;

		Ok(())
	}
}

impl Default for AppBuilder {
	fn default() -> Self { Self::new() }
}

// vim: ts=4
