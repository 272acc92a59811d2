use axum::{
	middleware,
	routing::{get, post},
	Router,
};
use tower_http::trace::TraceLayer;

use crate::core::route_auth;
use crate::settings;
use crate::App;

pub fn init(app: App) -> Router {
	// The settings page additionally requires a supported browser and an
	// up-to-date policy acceptance; the action endpoints only require auth
	// (policy acceptance itself must stay reachable).
	let page_router = Router::new()
		.route("/api/settings", get(settings::handler::get_settings))
		.layer(middleware::from_fn_with_state(app.clone(), route_auth::has_accepted_policies))
		.layer(middleware::from_fn_with_state(app.clone(), route_auth::browser_is_supported));

	let action_router = Router::new()
		.route("/api/settings/export", get(settings::handler::get_export))
		.route("/api/settings/username", post(settings::handler::post_username))
		.route("/api/settings/password", post(settings::handler::post_password))
		.route("/api/settings/issue", post(settings::handler::post_issue_report))
		.route("/api/settings/storage", post(settings::handler::post_storage_request))
		.route("/api/settings/delete-account", post(settings::handler::post_delete_account))
		.route("/api/policies/accept", post(settings::handler::post_accept_policies));

	Router::new()
		.merge(page_router)
		.merge(action_router)
		.layer(middleware::from_fn_with_state(app.clone(), route_auth::require_auth))
		.layer(TraceLayer::new_for_http())
		.with_state(app)
}

// vim: ts=4
