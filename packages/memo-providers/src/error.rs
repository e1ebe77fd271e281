pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Provider request timed out.")]
	Timeout,
	#[error("Failed to reach provider.")]
	Connect(#[source] reqwest::Error),
	#[error("Provider returned status {status}.")]
	Status { status: reqwest::StatusCode },
	#[error(transparent)]
	Request(reqwest::Error),
	#[error(transparent)]
	InvalidHeaderName(#[from] reqwest::header::InvalidHeaderName),
	#[error(transparent)]
	InvalidHeaderValue(#[from] reqwest::header::InvalidHeaderValue),
	#[error("{message}")]
	InvalidConfig { message: String },
	#[error("{message}")]
	InvalidResponse { message: String },
}

impl Error {
	/// Transient failures are worth another attempt; everything else means the
	/// request itself is wrong and a retry would only repeat the failure.
	pub fn is_transient(&self) -> bool {
		match self {
			Self::Timeout | Self::Connect(_) => true,
			Self::Status { status } =>
				status.is_server_error() || *status == reqwest::StatusCode::TOO_MANY_REQUESTS,
			_ => false,
		}
	}
}

impl From<reqwest::Error> for Error {
	fn from(err: reqwest::Error) -> Self {
		if err.is_timeout() {
			return Self::Timeout;
		}
		if err.is_connect() {
			return Self::Connect(err);
		}
		if let Some(status) = err.status() {
			return Self::Status { status };
		}

		Self::Request(err)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn server_errors_are_transient() {
		let err = Error::Status { status: reqwest::StatusCode::INTERNAL_SERVER_ERROR };

		assert!(err.is_transient());
	}

	#[test]
	fn rate_limiting_is_transient() {
		let err = Error::Status { status: reqwest::StatusCode::TOO_MANY_REQUESTS };

		assert!(err.is_transient());
	}

	#[test]
	fn auth_failures_are_permanent() {
		let err = Error::Status { status: reqwest::StatusCode::UNAUTHORIZED };

		assert!(!err.is_transient());
	}

	#[test]
	fn contract_violations_are_permanent() {
		let err = Error::InvalidResponse { message: "bad shape".to_string() };

		assert!(!err.is_transient());
	}

	#[test]
	fn timeouts_are_transient() {
		assert!(Error::Timeout.is_transient());
	}
}
