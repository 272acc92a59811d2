//! CSV export of a user's account data.
//!
//! Requested from the settings page as a fire-and-forget background job.
//! The generated file has a deterministic per-user name so account
//! deletion can find and remove it later.

use async_trait::async_trait;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::worker::{Priority, WorkerPool};
use crate::prelude::*;
use crate::user_adapter::User;

/// File name of the generated export for a user, stable per username.
pub fn generate_user_csv_filename(username: &str) -> String {
	let sanitized: String = username
		.chars()
		.map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
		.collect();
	format!("user_export_{}.csv", sanitized)
}

pub fn user_csv_path(export_dir: &Path, username: &str) -> PathBuf {
	export_dir.join(generate_user_csv_filename(username))
}

fn csv_field(value: &str) -> String {
	if value.contains([',', '"', '\n']) {
		format!("\"{}\"", value.replace('"', "\"\""))
	} else {
		value.to_string()
	}
}

/// Write the account-data CSV for a user. Returns the file path.
pub fn write_user_csv(export_dir: &Path, user: &User) -> SlResult<PathBuf> {
	let path = user_csv_path(export_dir, &user.username);

	let header = ["username", "email", "first_name", "last_name", "locale", "date_joined", "disk_space", "disk_space_used"];
	let row = [
		csv_field(&user.username),
		csv_field(&user.email),
		csv_field(&user.first_name),
		csv_field(&user.last_name),
		csv_field(&user.locale),
		user.date_joined.to_string(),
		user.disk_space.to_string(),
		user.disk_space_used.to_string(),
	];

	let mut contents = header.join(",");
	contents.push('\n');
	contents.push_str(&row.join(","));
	contents.push('\n');

	std::fs::create_dir_all(export_dir)?;
	std::fs::write(&path, contents)?;

	Ok(path)
}

// Export queue //
//**************//

/// Background CSV-export enqueue. Fire-and-forget: the handler never
/// waits for or observes the job, and repeated requests enqueue
/// independent jobs.
pub trait ExportQueue: Send + Sync + Debug {
	fn enqueue(&self, user: User) -> SlResult<()>;
}

/// Production queue backed by the shared worker pool's low-priority lane.
#[derive(Debug)]
pub struct WorkerExportQueue {
	worker: Arc<WorkerPool>,
	export_dir: Box<Path>,
}

impl WorkerExportQueue {
	pub fn new(worker: Arc<WorkerPool>, export_dir: impl Into<Box<Path>>) -> Self {
		Self { worker, export_dir: export_dir.into() }
	}
}

impl ExportQueue for WorkerExportQueue {
	fn enqueue(&self, user: User) -> SlResult<()> {
		let export_dir = self.export_dir.clone();
		info!("Enqueueing CSV export for user {}", user.user_id);

		self.worker.fire(Priority::Low, move || {
			match write_user_csv(&export_dir, &user) {
				Ok(path) => info!("User CSV export written to {}", path.display()),
				Err(err) => error!("User CSV export for {} failed: {}", user.user_id, err),
			}
		});

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::types::{Timestamp, UserId};

	fn user() -> User {
		User {
			user_id: UserId(1),
			username: "alice@example.com".into(),
			email: "alice@example.com".into(),
			first_name: "Alice".into(),
			last_name: "O'Brien, Jr".into(),
			locale: "en".into(),
			date_joined: Timestamp(1_700_000_000),
			disk_space: 512,
			disk_space_used: 128,
			policies: vec![],
		}
	}

	#[test]
	fn test_filename_is_stable_and_sanitized() {
		let a = generate_user_csv_filename("alice@example.com");
		let b = generate_user_csv_filename("alice@example.com");
		assert_eq!(a, b);
		assert_eq!(a, "user_export_alice_example.com.csv");
		assert!(!a.contains('@'));
	}

	#[test]
	fn test_csv_field_escaping() {
		assert_eq!(csv_field("plain"), "plain");
		assert_eq!(csv_field("a,b"), "\"a,b\"");
		assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
	}

	#[test]
	fn test_write_user_csv() {
		let dir = tempfile::tempdir().unwrap();
		let path = write_user_csv(dir.path(), &user()).unwrap();
		let contents = std::fs::read_to_string(&path).unwrap();
		let mut lines = contents.lines();
		assert!(lines.next().unwrap().starts_with("username,email,"));
		let row = lines.next().unwrap();
		assert!(row.contains("alice@example.com"));
		assert!(row.contains("\"O'Brien, Jr\""));
	}

	#[tokio::test]
	async fn test_worker_queue_writes_file() {
		let dir = tempfile::tempdir().unwrap();
		let pool = WorkerPool::new(0, 1);
		let queue = WorkerExportQueue::new(pool.clone(), dir.path());
		queue.enqueue(user()).unwrap();
		// Synchronize on the single worker thread
		pool.spawn(Priority::Low, || ()).await.unwrap();
		assert!(user_csv_path(dir.path(), "alice@example.com").exists());
	}
}

// vim: ts=4
