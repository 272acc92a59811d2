//! Crate-wide error type and HTTP status mapping.
//!
//! Mutating settings actions have exactly two client-visible outcomes:
//! validation failure (400, empty body) or success (200, empty body).
//! Collaborator failures (mail, sheet, storage) are not compensated and
//! surface as opaque 500s.

use axum::{http::StatusCode, response::IntoResponse};

pub type SlResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	NotFound,
	PermissionDenied,
	ValidationError(String),
	ConfigError(String),
	ServiceUnavailable(String),

	// externals
	Io(std::io::Error),
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Error::NotFound => write!(f, "not found"),
			Error::PermissionDenied => write!(f, "permission denied"),
			Error::ValidationError(msg) => write!(f, "validation error: {}", msg),
			Error::ConfigError(msg) => write!(f, "configuration error: {}", msg),
			Error::ServiceUnavailable(msg) => write!(f, "service unavailable: {}", msg),
			Error::Io(err) => write!(f, "io error: {}", err),
		}
	}
}

impl std::error::Error for Error {}

impl IntoResponse for Error {
	fn into_response(self) -> axum::response::Response {
		match self {
			Error::NotFound => StatusCode::NOT_FOUND.into_response(),
			Error::PermissionDenied => StatusCode::UNAUTHORIZED.into_response(),
			// Validation failures carry no body detail to the client
			Error::ValidationError(msg) => {
				tracing::debug!("validation rejected: {}", msg);
				StatusCode::BAD_REQUEST.into_response()
			}
			err => {
				tracing::error!("request failed: {}", err);
				StatusCode::INTERNAL_SERVER_ERROR.into_response()
			}
		}
	}
}


// vim: ts=4
