//! In-process session store.
//!
//! A plain key-value store scoped to the session lifetime. The only
//! settings-related entry is `policies`: the list of policy identifiers
//! the caller still has to accept, set at login time and cleared when the
//! user records acceptance.

use parking_lot::RwLock;
use std::collections::HashMap;

/// Session key holding the pending-policies list
pub const PENDING_POLICIES: &str = "policies";

#[derive(Debug, Default)]
pub struct SessionStore {
	sessions: RwLock<HashMap<Box<str>, HashMap<Box<str>, serde_json::Value>>>,
}

impl SessionStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self, session_id: &str, key: &str) -> Option<serde_json::Value> {
		let sessions = self.sessions.read();
		sessions.get(session_id).and_then(|s| s.get(key)).cloned()
	}

	pub fn set(&self, session_id: &str, key: &str, value: serde_json::Value) {
		let mut sessions = self.sessions.write();
		sessions
			.entry(Box::from(session_id))
			.or_default()
			.insert(Box::from(key), value);
	}

	/// Remove a single key. Clearing an absent key is a no-op.
	pub fn clear(&self, session_id: &str, key: &str) {
		let mut sessions = self.sessions.write();
		if let Some(session) = sessions.get_mut(session_id) {
			session.remove(key);
		}
	}

	/// Drop a whole session (logout, expiry).
	pub fn drop_session(&self, session_id: &str) {
		let mut sessions = self.sessions.write();
		sessions.remove(session_id);
	}

	/// Pending policy identifiers for the session, empty when none.
	pub fn pending_policies(&self, session_id: &str) -> Vec<String> {
		match self.get(session_id, PENDING_POLICIES) {
			Some(serde_json::Value::Array(items)) => items
				.into_iter()
				.filter_map(|v| v.as_str().map(String::from))
				.collect(),
			_ => Vec::new(),
		}
	}
}


// vim: ts=4
