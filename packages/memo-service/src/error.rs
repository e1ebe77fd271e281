pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	Validation { message: String },
	#[error("{message}")]
	Enrichment { message: String },
	#[error("{message}")]
	Embedding { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
	#[error("Not found: {message}")]
	NotFound { message: String },
}

impl From<memo_storage::Error> for Error {
	fn from(err: memo_storage::Error) -> Self {
		match err {
			memo_storage::Error::InvalidArgument(message) => Self::Validation { message },
			memo_storage::Error::NotFound(message) => Self::NotFound { message },
		}
	}
}
