//! End-to-end tests for the issue-report, storage-request,
//! account-deletion, and policy-acceptance endpoints.

#![allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]

mod common;

use axum::http::{header, StatusCode};
use serde_json::json;
use studiolo::core::session::PENDING_POLICIES;
use studiolo::settings::export;
use studiolo::types::UserId;

use common::*;

// Issue reports //
//***************//

fn issue_body() -> serde_json::Value {
	json!({
		"operating_system": "Ubuntu 24.04",
		"browser": "Firefox 131",
		"channel": "Maths grade 5",
		"description": "Uploads hang at 99%",
	})
}

#[tokio::test]
async fn test_issue_report_sends_one_mail() {
	let env = test_env();
	let (token, _) = login(UserId(1));

	let res = post_json(&env, "/api/settings/issue", Some(&token), &issue_body()).await;
	assert_eq!(res.status(), StatusCode::OK);
	assert!(body_bytes(res).await.is_empty());

	let sent = env.mail.sent.lock();
	assert_eq!(sent.len(), 1);
	let mail = &sent[0];
	assert_eq!(mail.to, vec!["help@studiolo.org", "alice@example.com"]);
	assert_eq!(mail.subject, "Studiolo Issue Report");
	assert!(mail.body.contains("Uploads hang at 99%"));
	assert!(mail.body.contains("Alice"));
}

#[tokio::test]
async fn test_issue_report_validation_failure_sends_nothing() {
	let env = test_env();
	let (token, _) = login(UserId(1));

	let res = post_json(
		&env,
		"/api/settings/issue",
		Some(&token),
		&json!({ "operating_system": "Ubuntu", "browser": "Firefox", "description": "  " }),
	)
	.await;
	assert_eq!(res.status(), StatusCode::BAD_REQUEST);
	assert!(env.mail.sent.lock().is_empty());
}

// Storage requests //
//******************//

fn storage_body() -> serde_json::Value {
	json!({
		"storage": "50 GB",
		"resource_count": 1200,
		"resource_size": 40,
		"kind": "video",
		"creators": "Alice Martin",
		"sample_link": "https://example.com/sample",
		"license": "CC BY",
		"public": "Maths, Physics",
		"audience": "primary school",
		"location": "France",
		"import_count": 3,
		"uploading_for": "my organization",
		"organization_type": "non-profit",
		"message": "Term starts soon",
		"time_constraint": "2 weeks",
	})
}

#[tokio::test]
async fn test_storage_request_appends_row_and_mails() {
	let env = test_env();
	let (token, _) = login(UserId(1));

	let res = post_json(&env, "/api/settings/storage", Some(&token), &storage_body()).await;
	assert_eq!(res.status(), StatusCode::OK);

	let rows = env.sheet.rows.lock();
	assert_eq!(rows.len(), 1);
	let (sheet_id, values) = &rows[0];
	assert_eq!(sheet_id, "storage-requests-test");
	assert_eq!(values.len(), 18);
	assert_eq!(values[0], "Alice Martin");
	assert_eq!(values[1], "alice@example.com");
	assert_eq!(values[2], "50 GB");
	// values[3] is the request timestamp
	assert_eq!(values[4], "1200");
	assert_eq!(values[5], "40");
	assert_eq!(values[6], "video");
	assert_eq!(values[7], "Alice Martin");
	assert_eq!(values[8], "https://example.com/sample");
	assert_eq!(values[9], "CC BY");
	assert_eq!(values[10], "Maths, Physics");
	assert_eq!(values[11], "primary school");
	assert_eq!(values[12], "France");
	assert_eq!(values[13], "3");
	assert_eq!(values[14], "my organization");
	assert_eq!(values[15], "non-profit");
	assert_eq!(values[16], "Term starts soon");
	assert_eq!(values[17], "2 weeks");

	let sent = env.mail.sent.lock();
	assert_eq!(sent.len(), 1);
	assert_eq!(sent[0].to, vec!["storage@studiolo.org", "alice@example.com"]);
	assert_eq!(sent[0].subject, "Studiolo Storage Request");
	assert!(sent[0].body.contains("50 GB"));
}

#[tokio::test]
async fn test_storage_request_validation_failure_has_no_effect() {
	let env = test_env();
	let (token, _) = login(UserId(1));

	let res = post_json(
		&env,
		"/api/settings/storage",
		Some(&token),
		&json!({ "storage": "50 GB", "resource_count": 1, "resource_size": 1 }),
	)
	.await;
	assert_eq!(res.status(), StatusCode::BAD_REQUEST);
	assert!(env.sheet.rows.lock().is_empty());
	assert!(env.mail.sent.lock().is_empty());
}

// Account deletion //
//******************//

#[tokio::test]
async fn test_delete_account_full_effect_sequence() {
	let env = test_env();
	let (token, _) = login(UserId(1));

	// A previously generated export must be cleaned up with the account
	let csv_path = export::write_user_csv(env.export_dir.path(), &alice()).unwrap();
	assert!(csv_path.exists());

	let res = post_json(
		&env,
		"/api/settings/delete-account",
		Some(&token),
		&json!({ "email": "alice@example.com" }),
	)
	.await;
	assert_eq!(res.status(), StatusCode::OK);

	// Team notification first, then the user's goodbye mail
	let sent = env.mail.sent.lock();
	assert_eq!(sent.len(), 2);
	assert_eq!(sent[0].to, vec!["accounts@studiolo.org"]);
	assert_eq!(sent[1].to, vec!["alice@example.com"]);
	assert_eq!(sent[0].subject, "Studiolo account deleted");
	assert_eq!(sent[1].subject, "Studiolo account deleted");
	assert!(sent[1].body.contains("Alice"));

	assert!(!csv_path.exists());
	assert!(env.users.get(UserId(1)).is_none());
}

#[tokio::test]
async fn test_delete_account_without_export_file() {
	let env = test_env();
	let (token, _) = login(UserId(1));

	let res = post_json(
		&env,
		"/api/settings/delete-account",
		Some(&token),
		&json!({ "email": "alice@example.com" }),
	)
	.await;
	assert_eq!(res.status(), StatusCode::OK);
	assert!(env.users.get(UserId(1)).is_none());
}

#[tokio::test]
async fn test_delete_account_wrong_email_has_no_effect() {
	let env = test_env();
	let (token, _) = login(UserId(1));

	let res = post_json(
		&env,
		"/api/settings/delete-account",
		Some(&token),
		&json!({ "email": "bob@example.com" }),
	)
	.await;
	assert_eq!(res.status(), StatusCode::BAD_REQUEST);
	assert!(env.mail.sent.lock().is_empty());
	assert!(env.users.get(UserId(1)).is_some());
}

// Policy acceptance //
//*******************//

#[tokio::test]
async fn test_accept_policies_clears_pending_and_redirects() {
	let env = test_env();
	let (token, session_id) = login(UserId(1));
	env.app.sessions.set(&session_id, PENDING_POLICIES, json!(["privacy_policy_2026"]));

	let res = post_json(
		&env,
		"/api/policies/accept",
		Some(&token),
		&json!({ "policies": ["privacy_policy_2026"] }),
	)
	.await;
	assert_eq!(res.status(), StatusCode::SEE_OTHER);
	assert_eq!(res.headers().get(header::LOCATION).unwrap(), "/channels");

	assert!(env.app.sessions.pending_policies(&session_id).is_empty());
	let user = env.users.get(UserId(1)).unwrap();
	assert!(user.policies.iter().any(|p| &**p == "privacy_policy_2026"));

	// The settings page is reachable again
	let res = get(&env, "/api/settings", Some(&token), "Mozilla/5.0 Firefox/131.0").await;
	assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_accept_policies_rejects_malformed_body() {
	let env = test_env();
	let (token, _) = login(UserId(1));

	let res = post_json(&env, "/api/policies/accept", Some(&token), &json!({ "policies": "oops" })).await;
	assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

// vim: ts=4
