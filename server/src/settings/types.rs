//! Settings page view model.

use serde::Serialize;
use std::collections::HashMap;

use crate::types::Timestamp;
use crate::user_adapter::User;

/// Read-only projection of the current user, embedded in the settings
/// page payload. Field names follow the client's existing wire format.
#[derive(Debug, Serialize)]
pub struct UserSettings {
	pub username: String,
	pub email: String,
	pub first_name: String,
	pub last_name: String,
	pub locale: String,
	pub date_joined: Timestamp,
	pub disk_space: i64,
	pub disk_space_used: i64,
	pub policies: Vec<String>,
}

impl From<&User> for UserSettings {
	fn from(user: &User) -> Self {
		Self {
			username: user.username.to_string(),
			email: user.email.to_string(),
			first_name: user.first_name.to_string(),
			last_name: user.last_name.to_string(),
			locale: user.locale.to_string(),
			date_joined: user.date_joined,
			disk_space: user.disk_space,
			disk_space_used: user.disk_space_used,
			policies: user.policies.iter().map(|p| p.to_string()).collect(),
		}
	}
}

/// `GET /api/settings` response body
#[derive(Debug, Serialize)]
pub struct SettingsPage {
	pub current_user: UserSettings,
	pub i18n_messages: HashMap<String, String>,
}

/// `GET /api/settings/export` response body
#[derive(Debug, Serialize)]
pub struct ExportAck {
	pub success: bool,
}


// vim: ts=4
