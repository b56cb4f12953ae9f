//! Adapter-level error types shared across configuration, transport, and identity mapping.

// self
use crate::_prelude::*;

/// Adapter-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical adapter error exposed by public APIs.
///
/// The host framework treats every variant as a failed authentication and shows its generic
/// access-denied page; the variants exist so logs and tests can tell a local
/// misconfiguration from an upstream rejection.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] crate::config::CanvasConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Canvas rejected a request or answered with an unusable payload.
	#[error(transparent)]
	Api(#[from] ApiError),
	/// Profile data could not be mapped to a username.
	#[error(transparent)]
	Identity(#[from] IdentityError),
}
impl Error {
	/// HTTP status returned by Canvas, when the failure carries one.
	pub fn upstream_status(&self) -> Option<u16> {
		match self {
			Error::Api(ApiError::Unexpected { status, .. })
			| Error::Api(ApiError::ResponseParse { status, .. }) => Some(*status),
			_ => None,
		}
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the Canvas API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the Canvas API.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Failures reported by the Canvas REST layer.
#[derive(Debug, ThisError)]
pub enum ApiError {
	/// Canvas answered with a non-success status.
	#[error("Canvas API request to {url} returned status {status}.")]
	Unexpected {
		/// Endpoint URL that produced the response.
		url: String,
		/// Upstream HTTP status code.
		status: u16,
		/// Bounded preview of the response body, when one was returned.
		body_preview: Option<String>,
	},
	/// Canvas answered with a payload that does not match the expected shape.
	#[error("Canvas API response from {url} is malformed JSON.")]
	ResponseParse {
		/// Endpoint URL that produced the response.
		url: String,
		/// Upstream HTTP status code.
		status: u16,
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// A pagination `Link` header advertised a `rel="next"` target that is not a valid URL.
	#[error("Canvas pagination link `{value}` is not a valid URL.")]
	InvalidNextLink {
		/// The advertised link target.
		value: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}

/// Failures raised while mapping profile data onto an identity record.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum IdentityError {
	/// The configured username field is absent from the profile payload.
	#[error("Canvas profile is missing the `{key}` username field.")]
	MissingUsernameField {
		/// Configured `username_key`.
		key: String,
	},
	/// The configured username field is present but empty.
	#[error("Canvas profile field `{key}` is empty.")]
	EmptyUsername {
		/// Configured `username_key`.
		key: String,
	},
}
