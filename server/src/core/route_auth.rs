//! Request gates applied in front of the settings handlers.
//!
//! Three preconditions, each short-circuiting before the handler runs:
//! bearer-token authentication, browser support, and legal-policy
//! acceptance.

const TOKEN_EXPIRE: u64 = 8; /* hours */

use axum::{
	body::Body,
	extract::State,
	http::{header, response::Response, Request},
	middleware::Next,
	response::{IntoResponse, Redirect},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::time;

use crate::core::extract::{Auth, AuthCtx};
use crate::prelude::*;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AuthToken {
	pub sub: u32,
	pub sid: String,
	pub exp: u64,
}

/// Mint an access token for a user. Returns the token and the session id
/// embedded in it. Token issuance itself (login) lives outside this crate;
/// this is used by deployments and tests.
pub fn generate_access_token(secret: &str, user_id: UserId) -> SlResult<(Box<str>, Box<str>)> {
	let expire = time::SystemTime::now()
		.duration_since(time::UNIX_EPOCH)
		.map_err(|_| Error::PermissionDenied)?
		.as_secs() + 3600 * TOKEN_EXPIRE;
	let session_id = uuid::Uuid::new_v4().to_string();

	let token = jsonwebtoken::encode(
		&jsonwebtoken::Header::new(Algorithm::HS256),
		&AuthToken { sub: user_id.0, sid: session_id.clone(), exp: expire },
		&jsonwebtoken::EncodingKey::from_secret(secret.as_bytes()),
	)
	.map_err(|_| Error::PermissionDenied)?;

	Ok((token.into(), session_id.into()))
}

fn validate_token(secret: &str, token: &str) -> SlResult<AuthCtx> {
	let decoding_key = DecodingKey::from_secret(secret.as_bytes());

	let token_data = decode::<AuthToken>(token, &decoding_key, &Validation::new(Algorithm::HS256))
		.map_err(|_| Error::PermissionDenied)?;

	Ok(AuthCtx {
		user_id: UserId(token_data.claims.sub),
		session_id: token_data.claims.sid.into(),
	})
}

/// Reject the request with 401 unless it carries a valid bearer token.
/// On success the `Auth` context is inserted for handlers and later gates.
pub async fn require_auth(
	State(app): State<App>,
	mut req: Request<Body>,
	next: Next,
) -> SlResult<Response<Body>> {
	let auth_header = req
		.headers()
		.get(header::AUTHORIZATION)
		.and_then(|h| h.to_str().ok())
		.ok_or(Error::PermissionDenied)?;

	let token = auth_header.strip_prefix("Bearer ").ok_or(Error::PermissionDenied)?;
	let ctx = validate_token(&app.opts.secret, token)?;

	req.extensions_mut().insert(Auth(ctx));

	Ok(next.run(req).await)
}

/// Block unsupported browsers with 403 before rendering the settings page.
pub async fn browser_is_supported(
	State(app): State<App>,
	req: Request<Body>,
	next: Next,
) -> SlResult<Response<Body>> {
	let user_agent = req
		.headers()
		.get(header::USER_AGENT)
		.and_then(|h| h.to_str().ok())
		.unwrap_or_default();

	for marker in app.opts.unsupported_browsers.iter() {
		if user_agent.contains(marker.as_ref()) {
			info!("Blocking unsupported browser: {}", user_agent);
			return Ok((axum::http::StatusCode::FORBIDDEN, "browser not supported").into_response());
		}
	}

	Ok(next.run(req).await)
}

/// Redirect to the policies page while the session still has pending
/// policies to accept. Runs after `require_auth`.
pub async fn has_accepted_policies(
	State(app): State<App>,
	req: Request<Body>,
	next: Next,
) -> SlResult<Response<Body>> {
	let auth = req.extensions().get::<Auth>().cloned().ok_or(Error::PermissionDenied)?;

	let pending = app.sessions.pending_policies(&auth.0.session_id);
	if !pending.is_empty() {
		info!("User {} has pending policies: {:?}", auth.0.user_id, pending);
		return Ok(Redirect::to(&app.opts.policies_path).into_response());
	}

	Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_token_roundtrip() {
		let (token, session_id) = generate_access_token("test secret", UserId(7)).unwrap();
		let ctx = validate_token("test secret", &token).unwrap();
		assert_eq!(ctx.user_id, UserId(7));
		assert_eq!(ctx.session_id, session_id);
	}

	#[test]
	fn test_wrong_secret_rejected() {
		let (token, _) = generate_access_token("secret a", UserId(1)).unwrap();
		assert!(matches!(validate_token("secret b", &token), Err(Error::PermissionDenied)));
	}

	#[test]
	fn test_garbage_token_rejected() {
		assert!(validate_token("secret", "not-a-jwt").is_err());
	}

	#[test]
	fn test_sessions_are_unique_per_token() {
		let (_, sid1) = generate_access_token("s", UserId(1)).unwrap();
		let (_, sid2) = generate_access_token("s", UserId(1)).unwrap();
		assert_ne!(sid1, sid2);
	}
}

// vim: ts=4
