//! Account settings handlers.
//!
//! Mutating actions share one contract: POST only, authenticated, JSON
//! body; 400 with empty body on validation failure, 200 with empty body
//! on success. Effects run in sequence with no rollback; a collaborator
//! failure after an earlier effect surfaces as a 500 with the earlier
//! effects already applied.

use axum::{
	extract::State,
	http::StatusCode,
	response::Redirect,
	Json,
};
use chrono::{Duration, Local};
use serde_json::json;

use crate::core::extract::Auth;
use crate::core::session::PENDING_POLICIES;
use crate::email::{template, EmailMessage};
use crate::prelude::*;
use crate::settings::forms;
use crate::settings::types::{ExportAck, SettingsPage, UserSettings};

/// GET /api/settings - settings page payload for the current user
pub async fn get_settings(
	State(app): State<App>,
	Auth(auth): Auth,
) -> SlResult<(StatusCode, Json<SettingsPage>)> {
	let user = app.user_adapter.read_user(auth.user_id).await?;

	let page = SettingsPage {
		current_user: UserSettings::from(&user),
		i18n_messages: app.catalog.messages_for(&user.locale),
	};

	Ok((StatusCode::OK, Json(page)))
}

/// GET /api/settings/export - enqueue an account-data CSV export
///
/// Fire-and-forget: the response does not wait for the job, and calling
/// twice enqueues two independent jobs.
pub async fn get_export(
	State(app): State<App>,
	Auth(auth): Auth,
) -> SlResult<(StatusCode, Json<ExportAck>)> {
	let user = app.user_adapter.read_user(auth.user_id).await?;
	app.export_queue.enqueue(user)?;

	Ok((StatusCode::OK, Json(ExportAck { success: true })))
}

/// POST /api/settings/username
pub async fn post_username(
	State(app): State<App>,
	Auth(auth): Auth,
	Json(data): Json<serde_json::Value>,
) -> SlResult<StatusCode> {
	let form = forms::validate_username_change(&data)?;
	let user = app.user_adapter.read_user(auth.user_id).await?;

	if form.username != *user.username && app.user_adapter.is_username_taken(&form.username).await? {
		return Err(Error::ValidationError(format!("Username {} is taken", form.username)));
	}

	app.user_adapter.update_username(auth.user_id, &form.username).await?;
	info!("User {} changed username to {}", auth.user_id, form.username);

	Ok(StatusCode::OK)
}

/// POST /api/settings/password
pub async fn post_password(
	State(app): State<App>,
	Auth(auth): Auth,
	Json(data): Json<serde_json::Value>,
) -> SlResult<StatusCode> {
	let form = forms::validate_set_password(&data)?;

	app.user_adapter.update_password(auth.user_id, &form.password).await?;
	info!("User {} changed their password", auth.user_id);

	Ok(StatusCode::OK)
}

/// POST /api/settings/issue - templated report to the support address and
/// the reporting user
pub async fn post_issue_report(
	State(app): State<App>,
	Auth(auth): Auth,
	Json(data): Json<serde_json::Value>,
) -> SlResult<StatusCode> {
	let form = forms::validate_issue_report(&data)?;
	let user = app.user_adapter.read_user(auth.user_id).await?;

	let body = app.templates.render(
		template::ISSUE_REPORT,
		&json!({
			"first_name": user.first_name,
			"last_name": user.last_name,
			"email": user.email,
			"operating_system": form.operating_system,
			"browser": form.browser,
			"channel": form.channel,
			"description": form.description,
		}),
	)?;

	app.mail_sender
		.send_mail(EmailMessage {
			from: app.opts.from_email.to_string(),
			to: vec![app.opts.help_email.to_string(), user.email.to_string()],
			subject: format!("{} Issue Report", app.opts.site_name),
			body,
		})
		.await?;

	Ok(StatusCode::OK)
}

/// POST /api/settings/storage - append the request row to the tracking
/// sheet, then send one confirmation email
pub async fn post_storage_request(
	State(app): State<App>,
	Auth(auth): Auth,
	Json(data): Json<serde_json::Value>,
) -> SlResult<StatusCode> {
	let form = forms::validate_storage_request(&data)?;
	let user = app.user_adapter.read_user(auth.user_id).await?;

	// Fixed row order: name, email, storage requested, date of request,
	// resource count/size, kind, creators, sample link, license, public
	// channels, audience, location, import count, uploading for,
	// organization type, message, time constraint.
	let requested_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
	let values = vec![
		user.full_name(),
		user.email.to_string(),
		form.storage.clone(),
		requested_at,
		form.resource_count.to_string(),
		form.resource_size.to_string(),
		form.kind.clone(),
		form.creators.clone(),
		form.sample_link.clone(),
		form.license.clone(),
		form.public.clone(),
		form.audience.clone(),
		form.location.clone(),
		form.import_count.to_string(),
		form.uploading_for.clone(),
		form.organization_type.clone(),
		form.message.clone(),
		form.time_constraint.clone(),
	];
	app.sheet_appender.append_row(&app.opts.storage_sheet_id, &values).await?;

	let body = app.templates.render(
		template::STORAGE_REQUEST,
		&json!({
			"full_name": user.full_name(),
			"email": user.email,
			"storage": form.storage,
			"resource_count": form.resource_count,
			"resource_size": form.resource_size,
			"kind": form.kind,
			"creators": form.creators,
			"sample_link": form.sample_link,
			"license": form.license,
			"channels": form.public_channels(),
			"audience": form.audience,
			"location": form.location,
			"import_count": form.import_count,
			"uploading_for": form.uploading_for,
			"organization_type": form.organization_type,
			"time_constraint": form.time_constraint,
			"message": form.message,
		}),
	)?;

	app.mail_sender
		.send_mail(EmailMessage {
			from: app.opts.from_email.to_string(),
			to: vec![app.opts.space_request_email.to_string(), user.email.to_string()],
			subject: format!("{} Storage Request", app.opts.site_name),
			body,
		})
		.await?;

	Ok(StatusCode::OK)
}

/// POST /api/settings/delete-account
///
/// Effects in order: notify the team, notify the user, remove any
/// generated export file, delete the user row. Deliberately not
/// transactional; a failure partway leaves earlier effects in place.
pub async fn post_delete_account(
	State(app): State<App>,
	Auth(auth): Auth,
	Json(data): Json<serde_json::Value>,
) -> SlResult<StatusCode> {
	let user = app.user_adapter.read_user(auth.user_id).await?;
	forms::validate_delete_account(&data, &user)?;

	let buffer_date = (Local::now() + Duration::days(app.opts.deletion_buffer_days))
		.format("%A, %B %d %Y")
		.to_string();
	let subject = format!("{} account deleted", app.opts.site_name);

	// Notify the team about the account being deleted
	let body = app.templates.render(
		template::ACCOUNT_DELETED_NOTIFICATION,
		&json!({
			"email": user.email,
			"buffer_date": buffer_date,
		}),
	)?;
	app.mail_sender
		.send_mail(EmailMessage {
			from: app.opts.from_email.to_string(),
			to: vec![app.opts.registration_info_email.to_string()],
			subject: subject.clone(),
			body,
		})
		.await?;

	// Notify the user
	let body = app.templates.render(
		template::ACCOUNT_DELETED_USER,
		&json!({
			"first_name": user.first_name,
			"buffer_date": buffer_date,
			"num_days": app.opts.deletion_buffer_days,
			"legal_email": app.opts.policy_email,
			"site_name": app.opts.site_name,
		}),
	)?;
	app.mail_sender
		.send_mail(EmailMessage {
			from: app.opts.from_email.to_string(),
			to: vec![user.email.to_string()],
			subject,
			body,
		})
		.await?;

	// Remove any generated export file
	let csv_path = crate::settings::export::user_csv_path(&app.opts.export_dir, &user.username);
	if tokio::fs::try_exists(&csv_path).await.unwrap_or(false) {
		tokio::fs::remove_file(&csv_path).await?;
		info!("Removed export file {}", csv_path.display());
	}

	app.user_adapter.delete_user(auth.user_id).await?;
	info!("Deleted account {} ({})", auth.user_id, user.email);

	Ok(StatusCode::OK)
}

/// POST /api/policies/accept - record acceptance, clear the session's
/// pending-policies entry, and send the client to the landing page
pub async fn post_accept_policies(
	State(app): State<App>,
	Auth(auth): Auth,
	Json(data): Json<serde_json::Value>,
) -> SlResult<Redirect> {
	let form = forms::validate_policy_accept(&data)?;

	app.user_adapter.record_policy_acceptance(auth.user_id, &form.policies).await?;
	app.sessions.clear(&auth.session_id, PENDING_POLICIES);
	info!("User {} accepted policies: {:?}", auth.user_id, form.policies);

	Ok(Redirect::to(&app.opts.default_landing))
}

// vim: ts=4
