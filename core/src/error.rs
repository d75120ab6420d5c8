use axum::{http::StatusCode, response::IntoResponse};

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum ActorError {
	#[error("authentication required")]
	Unauthorized,

	#[error("forbidden")]
	Forbidden,

	#[error("failed reading request body: {0}")]
	Body(#[source] axum::Error),

	#[error("request body exceeds {0} bytes")]
	PayloadTooLarge(usize),

	#[error("request body is not valid json: {0}")]
	Json(#[from] serde_json::Error),

	#[error("invalid activitystreams document: {0}")]
	Vocab(#[from] apb::VocabError),

	#[error("document is not an activity: {0}")]
	NotAnActivity(String),

	#[error("missing field: {0}")]
	MissingField(&'static str),

	#[error("collaborator failed: {0}")]
	Collaborator(#[source] BoxError),
}

impl ActorError {
	pub fn collaborator(err: impl std::error::Error + Send + Sync + 'static) -> Self {
		Self::Collaborator(Box::new(err))
	}

	pub fn status(&self) -> StatusCode {
		match self {
			ActorError::Unauthorized => StatusCode::UNAUTHORIZED,
			ActorError::Forbidden => StatusCode::FORBIDDEN,
			ActorError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
			_ => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

pub type ActorResult<T> = Result<T, ActorError>;

impl IntoResponse for ActorError {
	fn into_response(self) -> axum::response::Response {
		let status = self.status();
		if status.is_server_error() {
			// no partial body for server faults
			status.into_response()
		} else {
			(status, self.to_string()).into_response()
		}
	}
}
