use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::Error;

// Extractors //
//************//

// Auth //
//******//
/// Authenticated request context, inserted by `route_auth::require_auth`.
#[derive(Clone, Debug)]
pub struct AuthCtx {
	pub user_id: crate::types::UserId,
	pub session_id: Box<str>,
}

#[derive(Clone, Debug)]
pub struct Auth(pub AuthCtx);

impl<S> FromRequestParts<S> for Auth
where
	S: Send + Sync,
{
	type Rejection = Error;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		if let Some(auth) = parts.extensions.get::<Auth>().cloned() {
			Ok(auth)
		} else {
			Err(Error::PermissionDenied)
		}
	}
}

// vim: ts=4
