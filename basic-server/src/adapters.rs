//! In-memory adapters for the basic server.
//!
//! Good enough for trying the API locally; real deployments plug in
//! database, SMTP, and spreadsheet implementations.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

use studiolo::email::{EmailMessage, MailSender};
use studiolo::error::{Error, SlResult};
use studiolo::sheet_adapter::SheetAppender;
use studiolo::types::{Timestamp, UserId};
use studiolo::user_adapter::{User, UserAdapter};

#[derive(Debug, Default)]
pub struct MemoryUserAdapter {
	users: RwLock<HashMap<UserId, User>>,
}

impl MemoryUserAdapter {
	pub fn seeded() -> Self {
		let adapter = Self::default();
		adapter.insert(User {
			user_id: UserId(1),
			username: "demo@studiolo.org".into(),
			email: "demo@studiolo.org".into(),
			first_name: "Demo".into(),
			last_name: "User".into(),
			locale: "en".into(),
			date_joined: Timestamp::now(),
			disk_space: 512,
			disk_space_used: 0,
			policies: vec![],
		});
		adapter
	}

	pub fn insert(&self, user: User) {
		self.users.write().insert(user.user_id, user);
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
			if !user.policies.iter().any(|p| &**p == policy.as_str()) {
				user.policies.push(policy.clone().into());
			}
		}
		Ok(())
	}

	async fn delete_user(&self, user_id: UserId) -> SlResult<()> {
		self.users.write().remove(&user_id).ok_or(Error::NotFound)?;
		Ok(())
	}
}

/// Logs outgoing mail instead of delivering it.
#[derive(Debug, Default)]
pub struct LogMailSender;

#[async_trait]
impl MailSender for LogMailSender {
	async fn send_mail(&self, message: EmailMessage) -> SlResult<()> {
		println!("--- mail to {:?} ---\nSubject: {}\n\n{}", message.to, message.subject, message.body);
		Ok(())
	}
}

/// Records appended rows in memory.
#[derive(Debug, Default)]
pub struct MemorySheetAppender {
	pub rows: RwLock<Vec<Vec<String>>>,
}

#[async_trait]
impl SheetAppender for MemorySheetAppender {
	async fn append_row(&self, sheet_id: &str, values: &[String]) -> SlResult<()> {
		println!("--- sheet {} row: {:?}", sheet_id, values);
		self.rows.write().push(values.to_vec());
		Ok(())
	}
}

// vim: ts=4
