//! User persistence adapter trait.
//!
//! The settings handlers never talk to a database directly; deployments
//! provide an implementation of [`UserAdapter`] (SQL, in-memory, ...).

use async_trait::async_trait;
use serde::Serialize;
use std::fmt::Debug;

use crate::prelude::*;

/// A user account row as seen by the settings subsystem.
#[derive(Clone, Debug, Serialize)]
pub struct User {
	pub user_id: UserId,
	/// Login name. Studiolo usernames are email addresses.
	pub username: Box<str>,
	pub email: Box<str>,
	pub first_name: Box<str>,
	pub last_name: Box<str>,
	pub locale: Box<str>,
	pub date_joined: Timestamp,
	/// Allocated storage in megabytes
	pub disk_space: i64,
	/// Used storage in megabytes
	pub disk_space_used: i64,
	/// Identifiers of the legal policies this user has accepted
	pub policies: Vec<Box<str>>,
}

impl User {
	pub fn full_name(&self) -> String {
		format!("{} {}", self.first_name, self.last_name)
	}
}

#[async_trait]
pub trait UserAdapter: Send + Sync + Debug {
	/// Read a user row. `Error::NotFound` if the account does not exist.
	async fn read_user(&self, user_id: UserId) -> SlResult<User>;

	/// Check whether a username is already registered to any account.
	async fn is_username_taken(&self, username: &str) -> SlResult<bool>;

	async fn update_username(&self, user_id: UserId, username: &str) -> SlResult<()>;

	async fn update_password(&self, user_id: UserId, new_password: &str) -> SlResult<()>;

	/// Record acceptance of the given policy identifiers on the user row.
	async fn record_policy_acceptance(&self, user_id: UserId, policies: &[String]) -> SlResult<()>;

	/// Remove the user row. Destructive and immediate.
	async fn delete_user(&self, user_id: UserId) -> SlResult<()>;
}

// vim: ts=4
