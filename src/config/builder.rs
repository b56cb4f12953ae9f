// self
use crate::{
	_prelude::*,
	config::{CanvasConfig, CanvasEndpoints, ScopeSet, ScopeValidationError},
};

/// Errors raised while constructing or validating adapter configurations.
#[derive(Debug, ThisError)]
pub enum CanvasConfigError {
	/// Endpoint joins stay rooted only when the base URL ends with a slash.
	#[error("Canvas base URL must end with a trailing slash: {url}.")]
	MissingTrailingSlash {
		/// Base URL that failed validation.
		url: String,
	},
	/// Base URL failed to parse.
	#[error("Canvas base URL is invalid.")]
	InvalidBaseUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Only HTTP(S) Canvas deployments are supported.
	#[error("Canvas base URL must use http or https, not {scheme}.")]
	UnsupportedScheme {
		/// Scheme that failed validation.
		scheme: String,
	},
	/// A derived endpoint failed to parse against the base URL.
	#[error("Canvas `{endpoint}` endpoint could not be derived from the base URL.")]
	InvalidEndpoint {
		/// Which endpoint failed derivation.
		endpoint: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Email domains are matched as `@{domain}` suffixes and must be bare.
	#[error("strip_email_domain must be a bare domain such as `example.edu`: `{domain}`.")]
	InvalidEmailDomain {
		/// Domain that failed validation.
		domain: String,
	},
	/// The username lookup key cannot be empty.
	#[error("username_key cannot be empty.")]
	EmptyUsernameKey,
	/// The course lookup key cannot be empty.
	#[error("course_key cannot be empty.")]
	EmptyCourseKey,
	/// Requested scopes cannot be normalized.
	#[error("Requested scopes are invalid.")]
	InvalidScope(#[from] ScopeValidationError),
}

/// Builder for [`CanvasConfig`] values.
#[derive(Clone, Debug)]
pub struct CanvasConfigBuilder {
	/// Raw base URL of the Canvas installation (must keep its trailing slash).
	pub base_url: String,
	/// OAuth scopes requested from Canvas, normalized at build time.
	pub scopes: Vec<String>,
	/// Optional email domain stripped from derived usernames.
	pub strip_email_domain: Option<String>,
	/// Display label for the host's login button.
	pub login_service: String,
	/// Profile field whose value becomes the username.
	pub username_key: String,
	/// Course field used when deriving course group names.
	pub course_key: String,
	/// Enables course/group membership derivation.
	pub manage_groups: bool,
	/// Requests single-token replacement during the host's token exchange.
	pub replace_tokens: bool,
}
impl CanvasConfigBuilder {
	/// Creates a new builder seeded with the provided base URL.
	///
	/// Defaults: no scopes, no domain stripping, `Canvas` login service, `primary_email`
	/// username key, `id` course key, group management and token replacement enabled.
	///
	/// `id` is the least descriptive course key but the only one every enrollment type can
	/// read; `sis_course_id` and `course_code` are the common human-readable alternatives.
	pub fn new(base_url: impl Into<String>) -> Self {
		Self {
			base_url: base_url.into(),
			scopes: Vec::new(),
			strip_email_domain: None,
			login_service: "Canvas".into(),
			username_key: "primary_email".into(),
			course_key: "id".into(),
			manage_groups: true,
			replace_tokens: true,
		}
	}

	/// Adds a single OAuth scope.
	pub fn scope(mut self, scope: impl Into<String>) -> Self {
		self.scopes.push(scope.into());

		self
	}

	/// Adds multiple OAuth scopes.
	pub fn scopes<I, S>(mut self, scopes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.scopes.extend(scopes.into_iter().map(Into::into));

		self
	}

	/// Sets the email domain stripped from derived usernames.
	pub fn strip_email_domain(mut self, domain: impl Into<String>) -> Self {
		self.strip_email_domain = Some(domain.into());

		self
	}

	/// Overrides the display label for the host's login button.
	pub fn login_service(mut self, service: impl Into<String>) -> Self {
		self.login_service = service.into();

		self
	}

	/// Overrides the profile field whose value becomes the username.
	pub fn username_key(mut self, key: impl Into<String>) -> Self {
		self.username_key = key.into();

		self
	}

	/// Overrides the course field used when deriving course group names.
	pub fn course_key(mut self, key: impl Into<String>) -> Self {
		self.course_key = key.into();

		self
	}

	/// Overrides the group management flag.
	pub fn manage_groups(mut self, manage: bool) -> Self {
		self.manage_groups = manage;

		self
	}

	/// Overrides the token replacement flag.
	pub fn replace_tokens(mut self, replace: bool) -> Self {
		self.replace_tokens = replace;

		self
	}

	/// Consumes the builder, validates its inputs, and derives the endpoint set.
	pub fn build(self) -> Result<CanvasConfig, CanvasConfigError> {
		if !self.base_url.ends_with('/') {
			return Err(CanvasConfigError::MissingTrailingSlash { url: self.base_url });
		}

		let base_url = Url::parse(&self.base_url)
			.map_err(|source| CanvasConfigError::InvalidBaseUrl { source })?;

		if !matches!(base_url.scheme(), "http" | "https") {
			return Err(CanvasConfigError::UnsupportedScheme {
				scheme: base_url.scheme().into(),
			});
		}
		if self.username_key.is_empty() {
			return Err(CanvasConfigError::EmptyUsernameKey);
		}
		if self.course_key.is_empty() {
			return Err(CanvasConfigError::EmptyCourseKey);
		}
		if let Some(domain) = self.strip_email_domain.as_deref() {
			if domain.is_empty() || domain.contains('@') {
				return Err(CanvasConfigError::InvalidEmailDomain { domain: domain.into() });
			}
		}

		let scope = ScopeSet::new(self.scopes)?;
		let endpoints = CanvasEndpoints::derive(&base_url)?;

		Ok(CanvasConfig {
			endpoints,
			base_url,
			scope,
			strip_email_domain: self.strip_email_domain,
			login_service: self.login_service,
			username_key: self.username_key,
			course_key: self.course_key,
			manage_groups: self.manage_groups,
			replace_tokens: self.replace_tokens,
		})
	}
}
