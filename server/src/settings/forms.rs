//! Per-action form validation.
//!
//! Every mutating settings action follows the same two-stage contract:
//! `validate(raw) -> Result<Validated, FieldErrors>` on the decoded JSON
//! body, then the handler applies the action-specific effect. A
//! `FieldErrors` value maps to HTTP 400 with an empty body.

use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

use crate::error::Error;
use crate::user_adapter::User;

fn email_regex() -> &'static Regex {
	static RE: OnceLock<Regex> = OnceLock::new();
	// The pattern is a constant, so compilation cannot fail at runtime
	#[allow(clippy::expect_used)]
	RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("invalid email pattern"))
}

// FieldErrors //
//*************//
#[derive(Debug, Default)]
pub struct FieldErrors(Vec<(Box<str>, Box<str>)>);

impl FieldErrors {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push(&mut self, field: &str, message: &str) {
		self.0.push((Box::from(field), Box::from(message)));
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn fields(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(|(f, _)| f.as_ref())
	}

	fn or_ok<T>(self, value: T) -> Result<T, FieldErrors> {
		if self.is_empty() { Ok(value) } else { Err(self) }
	}

	fn body(message: &str) -> Self {
		let mut errors = Self::new();
		errors.push("__all__", message);
		errors
	}
}

impl From<FieldErrors> for Error {
	fn from(errors: FieldErrors) -> Self {
		let detail = errors
			.0
			.iter()
			.map(|(f, m)| format!("{}: {}", f, m))
			.collect::<Vec<_>>()
			.join("; ");
		Error::ValidationError(detail)
	}
}

fn decode<T: serde::de::DeserializeOwned>(data: &serde_json::Value) -> Result<T, FieldErrors> {
	serde_json::from_value(data.clone()).map_err(|e| FieldErrors::body(&e.to_string()))
}

fn required(errors: &mut FieldErrors, field: &str, value: &str) {
	if value.trim().is_empty() {
		errors.push(field, "This field is required");
	}
}

// Username change //
//*****************//
#[derive(Debug, Deserialize)]
struct UsernameChangeForm {
	username: String,
}

#[derive(Debug)]
pub struct UsernameChange {
	pub username: String,
}

/// Usernames are email addresses; uniqueness is checked against the store
/// by the handler.
pub fn validate_username_change(data: &serde_json::Value) -> Result<UsernameChange, FieldErrors> {
	let form: UsernameChangeForm = decode(data)?;
	let mut errors = FieldErrors::new();

	let username = form.username.trim().to_lowercase();
	required(&mut errors, "username", &username);
	if !username.is_empty() && !email_regex().is_match(&username) {
		errors.push("username", "Enter a valid email address");
	}

	errors.or_ok(UsernameChange { username })
}

// Password change //
//*****************//
const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Deserialize)]
struct SetPasswordForm {
	new_password1: String,
	new_password2: String,
}

#[derive(Debug)]
pub struct NewPassword {
	pub password: String,
}

pub fn validate_set_password(data: &serde_json::Value) -> Result<NewPassword, FieldErrors> {
	let form: SetPasswordForm = decode(data)?;
	let mut errors = FieldErrors::new();

	if form.new_password1.trim().is_empty() {
		errors.push("new_password1", "Password cannot be empty or only whitespace");
	} else if form.new_password1.len() < MIN_PASSWORD_LEN {
		errors.push("new_password1", "Password must be at least 8 characters");
	}
	if form.new_password1 != form.new_password2 {
		errors.push("new_password2", "The two password fields didn't match");
	}

	errors.or_ok(NewPassword { password: form.new_password1 })
}

// Issue report //
//**************//
#[derive(Debug, Deserialize)]
struct IssueReportForm {
	operating_system: String,
	browser: String,
	#[serde(default)]
	channel: String,
	description: String,
}

#[derive(Debug)]
pub struct IssueReport {
	pub operating_system: String,
	pub browser: String,
	pub channel: String,
	pub description: String,
}

pub fn validate_issue_report(data: &serde_json::Value) -> Result<IssueReport, FieldErrors> {
	let form: IssueReportForm = decode(data)?;
	let mut errors = FieldErrors::new();

	required(&mut errors, "operating_system", &form.operating_system);
	required(&mut errors, "browser", &form.browser);
	required(&mut errors, "description", &form.description);

	errors.or_ok(IssueReport {
		operating_system: form.operating_system,
		browser: form.browser,
		channel: form.channel,
		description: form.description,
	})
}

// Storage request //
//*****************//
#[derive(Debug, Deserialize)]
struct StorageRequestForm {
	storage: String,
	resource_count: u64,
	resource_size: u64,
	kind: String,
	#[serde(default)]
	creators: String,
	#[serde(default)]
	sample_link: String,
	license: String,
	/// Comma-separated list of potential public channel names
	#[serde(default)]
	public: String,
	audience: String,
	#[serde(default)]
	location: String,
	#[serde(default)]
	import_count: u64,
	#[serde(default)]
	uploading_for: String,
	#[serde(default)]
	organization_type: String,
	#[serde(default)]
	message: String,
	#[serde(default)]
	time_constraint: String,
}

#[derive(Debug)]
pub struct StorageRequest {
	pub storage: String,
	pub resource_count: u64,
	pub resource_size: u64,
	pub kind: String,
	pub creators: String,
	pub sample_link: String,
	pub license: String,
	pub public: String,
	pub audience: String,
	pub location: String,
	pub import_count: u64,
	pub uploading_for: String,
	pub organization_type: String,
	pub message: String,
	pub time_constraint: String,
}

impl StorageRequest {
	/// Names of the potential public channels, empty entries dropped.
	pub fn public_channels(&self) -> Vec<&str> {
		self.public.split(", ").filter(|c| !c.is_empty()).collect()
	}
}

pub fn validate_storage_request(data: &serde_json::Value) -> Result<StorageRequest, FieldErrors> {
	let form: StorageRequestForm = decode(data)?;
	let mut errors = FieldErrors::new();

	required(&mut errors, "storage", &form.storage);
	required(&mut errors, "kind", &form.kind);
	required(&mut errors, "license", &form.license);
	required(&mut errors, "audience", &form.audience);

	errors.or_ok(StorageRequest {
		storage: form.storage,
		resource_count: form.resource_count,
		resource_size: form.resource_size,
		kind: form.kind,
		creators: form.creators,
		sample_link: form.sample_link,
		license: form.license,
		public: form.public,
		audience: form.audience,
		location: form.location,
		import_count: form.import_count,
		uploading_for: form.uploading_for,
		organization_type: form.organization_type,
		message: form.message,
		time_constraint: form.time_constraint,
	})
}

// Account deletion //
//******************//
#[derive(Debug, Deserialize)]
struct DeleteAccountForm {
	email: String,
}

#[derive(Debug)]
pub struct DeleteAccount;

/// The confirmation email must match the account being deleted.
pub fn validate_delete_account(
	data: &serde_json::Value,
	user: &User,
) -> Result<DeleteAccount, FieldErrors> {
	let form: DeleteAccountForm = decode(data)?;
	let mut errors = FieldErrors::new();

	required(&mut errors, "email", &form.email);
	if !form.email.trim().is_empty() && !form.email.trim().eq_ignore_ascii_case(&user.email) {
		errors.push("email", "Email does not match this account");
	}

	errors.or_ok(DeleteAccount)
}

// Policy acceptance //
//*******************//
#[derive(Debug, Deserialize)]
struct PolicyAcceptForm {
	policies: Vec<String>,
}

#[derive(Debug)]
pub struct PolicyAccept {
	pub policies: Vec<String>,
}

pub fn validate_policy_accept(data: &serde_json::Value) -> Result<PolicyAccept, FieldErrors> {
	let form: PolicyAcceptForm = decode(data)?;
	Ok(PolicyAccept { policies: form.policies })
}


// vim: ts=4
