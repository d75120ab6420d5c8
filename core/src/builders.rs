use axum::{
	http::{header::{ALLOW, CONTENT_TYPE, LOCATION}, HeaderValue, StatusCode},
	response::{IntoResponse, Response},
};

// got this from https://github.com/kitsune-soc/kitsune/blob/b023a12b687dd9a274233a5a9950f2de5e192344/kitsune/src/http/responder.rs
pub struct JsonLD(pub serde_json::Value);

impl IntoResponse for JsonLD {
	fn into_response(self) -> Response {
		(
			[(CONTENT_TYPE, apb::jsonld::CONTENT_TYPE_ACTIVITY_JSON)],
			axum::Json(self.0),
		).into_response()
	}
}

pub fn method_not_allowed() -> Response {
	(StatusCode::METHOD_NOT_ALLOWED, [(ALLOW, "GET")]).into_response()
}

pub fn created(location: &apb::Iri) -> Response {
	match HeaderValue::from_str(location.as_str()) {
		Ok(location) => (StatusCode::CREATED, [(LOCATION, location)]).into_response(),
		Err(e) => {
			// ids are valid urls, this only happens with exotic unicode in them
			tracing::warn!("could not put '{location}' in Location header: {e}");
			StatusCode::CREATED.into_response()
		},
	}
}
