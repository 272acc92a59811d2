//! Shared test fixtures: in-memory adapters, a fully wired test app,
//! and request helpers for driving the router.

// Not every test binary uses every fixture
#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
	body::Body,
	http::{header, Request, Response},
	Router,
};
use http_body_util::BodyExt;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceExt;

use studiolo::core::route_auth;
use studiolo::email::{EmailMessage, MailSender};
use studiolo::error::{Error, SlResult};
use studiolo::settings::ExportQueue;
use studiolo::sheet_adapter::SheetAppender;
use studiolo::types::{Timestamp, UserId};
use studiolo::user_adapter::{User, UserAdapter};
use studiolo::{App, AppBuilder};

pub const SECRET: &str = "test secret";

// Adapters //
//**********//

#[derive(Debug, Default)]
pub struct MemoryUserAdapter {
	users: RwLock<HashMap<UserId, User>>,
}

impl MemoryUserAdapter {
	pub fn insert(&self, user: User) {
		self.users.write().insert(user.user_id, user);
	}

	pub fn get(&self, user_id: UserId) -> Option<User> {
		self.users.read().get(&user_id).cloned()
	}
}

#[async_trait]
impl UserAdapter for MemoryUserAdapter {
	async fn read_user(&self, user_id: UserId) -> SlResult<User> {
		self.users.read().get(&user_id).cloned().ok_or(Error::NotFound)
	}

	async fn is_username_taken(&self, username: &str) -> SlResult<bool> {
		Ok(self.users.read().values().any(|u| &*u.username == username))
	}

	async fn update_username(&self, user_id: UserId, username: &str) -> SlResult<()> {
		let mut users = self.users.write();
		let user = users.get_mut(&user_id).ok_or(Error::NotFound)?;
		user.username = username.into();
		user.email = username.into();
		Ok(())
	}

	async fn update_password(&self, user_id: UserId, _new_password: &str) -> SlResult<()> {
		self.users.read().get(&user_id).ok_or(Error::NotFound)?;
		Ok(())
	}

	async fn record_policy_acceptance(&self, user_id: UserId, policies: &[String]) -> SlResult<()> {
		let mut users = self.users.write();
		let user = users.get_mut(&user_id).ok_or(Error::NotFound)?;
		for policy in policies {
			user.policies.push(policy.clone().into());
		}
		Ok(())
	}

	async fn delete_user(&self, user_id: UserId) -> SlResult<()> {
		self.users.write().remove(&user_id).ok_or(Error::NotFound)?;
		Ok(())
	}
}

#[derive(Debug, Default)]
pub struct RecordingMailSender {
	pub sent: Mutex<Vec<EmailMessage>>,
}

#[async_trait]
impl MailSender for RecordingMailSender {
	async fn send_mail(&self, message: EmailMessage) -> SlResult<()> {
		self.sent.lock().push(message);
		Ok(())
	}
}

#[derive(Debug, Default)]
pub struct RecordingSheetAppender {
	pub rows: Mutex<Vec<(String, Vec<String>)>>,
}

#[async_trait]
impl SheetAppender for RecordingSheetAppender {
	async fn append_row(&self, sheet_id: &str, values: &[String]) -> SlResult<()> {
		self.rows.lock().push((sheet_id.to_string(), values.to_vec()));
		Ok(())
	}
}

#[derive(Debug, Default)]
pub struct RecordingExportQueue {
	pub enqueued: Mutex<Vec<UserId>>,
}

impl ExportQueue for RecordingExportQueue {
	fn enqueue(&self, user: User) -> SlResult<()> {
		self.enqueued.lock().push(user.user_id);
		Ok(())
	}
}

// Fixtures //
//**********//

pub fn alice() -> User {
	User {
		user_id: UserId(1),
		username: "alice@example.com".into(),
		email: "alice@example.com".into(),
		first_name: "Alice".into(),
		last_name: "Martin".into(),
		locale: "en".into(),
		date_joined: Timestamp(1_700_000_000),
		disk_space: 512,
		disk_space_used: 128,
		policies: vec![],
	}
}

pub fn bob() -> User {
	User {
		user_id: UserId(2),
		username: "bob@example.com".into(),
		email: "bob@example.com".into(),
		first_name: "Bob".into(),
		last_name: "Stone".into(),
		locale: "en".into(),
		date_joined: Timestamp(1_700_100_000),
		disk_space: 512,
		disk_space_used: 0,
		policies: vec![],
	}
}

pub struct TestEnv {
	pub app: App,
	pub router: Router,
	pub users: Arc<MemoryUserAdapter>,
	pub mail: Arc<RecordingMailSender>,
	pub sheet: Arc<RecordingSheetAppender>,
	pub exports: Arc<RecordingExportQueue>,
	pub export_dir: tempfile::TempDir,
}

pub fn test_env() -> TestEnv {
	let users = Arc::new(MemoryUserAdapter::default());
	users.insert(alice());
	users.insert(bob());

	let mail = Arc::new(RecordingMailSender::default());
	let sheet = Arc::new(RecordingSheetAppender::default());
	let exports = Arc::new(RecordingExportQueue::default());
	let export_dir = tempfile::tempdir().unwrap();

	let mut builder = AppBuilder::new();
	builder
		.secret(SECRET)
		.storage_sheet_id("storage-requests-test")
		.export_dir(export_dir.path())
		.user_adapter(users.clone())
		.mail_sender(mail.clone())
		.sheet_appender(sheet.clone())
		.export_queue(exports.clone());
	let app = builder.build().unwrap();
	let router = studiolo::routes::init(app.clone());

	TestEnv { app, router, users, mail, sheet, exports, export_dir }
}

/// Mint a token for a user; returns (bearer token, session id).
pub fn login(user_id: UserId) -> (String, String) {
	let (token, session_id) = route_auth::generate_access_token(SECRET, user_id).unwrap();
	(token.to_string(), session_id.to_string())
}

// Request helpers //
//*****************//

pub async fn get(env: &TestEnv, path: &str, token: Option<&str>, user_agent: &str) -> Response<Body> {
	let mut builder = Request::builder()
		.method("GET")
		.uri(path)
		.header(header::USER_AGENT, user_agent);
	if let Some(token) = token {
		builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
	}
	let req = builder.body(Body::empty()).unwrap();
	env.router.clone().oneshot(req).await.unwrap()
}

pub async fn post_json(
	env: &TestEnv,
	path: &str,
	token: Option<&str>,
	body: &serde_json::Value,
) -> Response<Body> {
	post_raw(env, path, token, serde_json::to_vec(body).unwrap()).await
}

pub async fn post_raw(
	env: &TestEnv,
	path: &str,
	token: Option<&str>,
	body: Vec<u8>,
) -> Response<Body> {
	let mut builder = Request::builder()
		.method("POST")
		.uri(path)
		.header(header::CONTENT_TYPE, "application/json")
		.header(header::USER_AGENT, "Mozilla/5.0 Firefox/131.0");
	if let Some(token) = token {
		builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
	}
	let req = builder.body(Body::from(body)).unwrap();
	env.router.clone().oneshot(req).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
	response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
	serde_json::from_slice(&body_bytes(response).await).unwrap()
}

// vim: ts=4
