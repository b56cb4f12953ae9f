//! Validated adapter configuration and derived Canvas endpoints.
//!
//! `builder` performs the validation Canvas deployments require (trailing-slash base URLs,
//! bare email domains, non-empty lookup keys) and `scope` holds the normalized OAuth scope
//! list the host requests during authorization. Endpoint URLs are derived once at build
//! time so the rest of the crate never joins URLs at request time.

/// Builder API for assembling validated configurations.
pub mod builder;
/// Scope modeling helpers.
pub mod scope;

pub use builder::*;
pub use scope::*;

// self
use crate::_prelude::*;

const AUTHORIZE_PATH: &str = "login/oauth2/auth";
const TOKEN_PATH: &str = "login/oauth2/token";
const PROFILE_PATH: &str = "api/v1/users/self/profile";
const COURSES_PATH: &str = "api/v1/courses";
const SELF_GROUPS_PATH: &str = "api/v1/users/self/groups";

/// Endpoint set derived from a validated Canvas base URL.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasEndpoints {
	/// Authorization endpoint the host sends browsers to.
	pub authorize: Url,
	/// Token endpoint the host exchanges authorization codes against.
	pub token: Url,
	/// Profile endpoint for the authenticated user.
	pub profile: Url,
	/// Course listing endpoint for the authenticated user.
	pub courses: Url,
	/// Group listing endpoint for the authenticated user.
	pub self_groups: Url,
}
impl CanvasEndpoints {
	pub(crate) fn derive(base: &Url) -> Result<Self, CanvasConfigError> {
		Ok(Self {
			authorize: join(base, "authorize", AUTHORIZE_PATH)?,
			token: join(base, "token", TOKEN_PATH)?,
			profile: join(base, "profile", PROFILE_PATH)?,
			courses: join(base, "courses", COURSES_PATH)?,
			self_groups: join(base, "self_groups", SELF_GROUPS_PATH)?,
		})
	}
}

/// Immutable adapter configuration consumed by the API client and identity assembly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasConfig {
	/// Endpoint set derived from [`base_url`](Self::base_url).
	pub endpoints: CanvasEndpoints,
	/// Base URL of the Canvas installation (always carries a trailing slash).
	pub base_url: Url,
	/// OAuth scopes the host should request during authorization.
	pub scope: ScopeSet,
	/// Email domain stripped from derived usernames, when configured.
	pub strip_email_domain: Option<String>,
	/// Display label for the host's login button.
	pub login_service: String,
	/// Profile field whose value becomes the username.
	pub username_key: String,
	/// Course field used when deriving course group names.
	pub course_key: String,
	/// Enables course/group membership derivation during authentication.
	pub manage_groups: bool,
	/// Requests single-token replacement during the host's token exchange.
	pub replace_tokens: bool,
}
impl CanvasConfig {
	/// Creates a new builder for the provided base URL.
	pub fn builder(base_url: impl Into<String>) -> CanvasConfigBuilder {
		CanvasConfigBuilder::new(base_url)
	}

	/// Extra form parameters the host appends to its token exchange.
	///
	/// `replace_tokens=1` asks Canvas to revoke the previous token for the client/user pair
	/// instead of letting tokens accumulate across logins.
	pub fn token_request_params(&self) -> Vec<(String, String)> {
		if self.replace_tokens {
			vec![("replace_tokens".into(), "1".into())]
		} else {
			Vec::new()
		}
	}
}

fn join(base: &Url, endpoint: &'static str, path: &str) -> Result<Url, CanvasConfigError> {
	base.join(path).map_err(|source| CanvasConfigError::InvalidEndpoint { endpoint, source })
}
