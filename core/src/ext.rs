/// fire-and-forget results: log the failure, keep going
pub trait LoggableError {
	fn info_failed(self, msg: &str);
	fn warn_failed(self, msg: &str);
	fn err_failed(self, msg: &str);
}

impl<T, E: std::fmt::Display> LoggableError for Result<T, E> {
	fn info_failed(self, msg: &str) {
		if let Err(e) = self {
			tracing::info!(error = %e, "{msg}");
		}
	}

	fn warn_failed(self, msg: &str) {
		if let Err(e) = self {
			tracing::warn!(error = %e, "{msg}");
		}
	}

	fn err_failed(self, msg: &str) {
		if let Err(e) = self {
			tracing::error!(error = %e, "{msg}");
		}
	}
}
