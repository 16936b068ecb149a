use reqwest::StatusCode;

/// Errors produced while synchronizing with the HeavyJob API.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("failed to get {path}: error sending request: {source}")]
	Request {
		path: String,
		#[source]
		source: reqwest::Error,
	},

	#[error("failed to get {path}: server responded with status code {status}")]
	Status {
		path: String,
		status: StatusCode,
	},

	#[error("failed to get {path}: error parsing response: {source}")]
	Decode {
		path: String,
		#[source]
		source: reqwest::Error,
	},

	#[error("failed to get {path}: server returned cursor {cursor:?} again")]
	RepeatedCursor {
		path: String,
		cursor: String,
	},

	#[error("failed to obtain access token: {0}")]
	Identity(String),

	#[error("failed to save {kind}: {message}")]
	Store {
		kind: &'static str,
		message: String,
	},

	#[error("invalid configuration: {0}")]
	Config(String),
}
