//! High-level identity adapter orchestrating the Canvas fetches.
//!
//! The adapter owns no token lifecycle: the host framework performs the OAuth handshake
//! and hands the resulting bearer token to [`IdentityAdapter::authenticate`], which issues
//! the REST calls and assembles the identity record the host expects. Group membership is
//! recomputed on every login; to refresh, the user logs in again.

// self
use crate::{
	_prelude::*,
	api::CanvasApi,
	config::CanvasConfig,
	groups,
	http::ApiHttpClient,
	identity::{self, AccessToken, IdentityRecord},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Environment variable prefix used when exporting auth state to spawned user servers.
pub const SPAWN_ENV_PREFIX: &str = "OAUTH2_";

/// Profile fields exported to the spawn environment when present.
const SPAWN_PROFILE_KEYS: &[&str] = &["login_id", "name", "sortable_name", "primary_email"];

/// Adapts Canvas identity data for a generic OAuth host framework.
#[derive(Clone)]
pub struct IdentityAdapter<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Typed REST client shared by every fetch.
	pub api: CanvasApi<C>,
}
impl<C> IdentityAdapter<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates an adapter that reuses a caller-provided transport.
	pub fn with_http_client(config: CanvasConfig, http_client: impl Into<Arc<C>>) -> Self {
		Self { api: CanvasApi::with_http_client(config, http_client) }
	}

	/// Validated configuration backing this adapter.
	pub fn config(&self) -> &CanvasConfig {
		&self.api.config
	}

	/// Authenticates the bearer token's owner and assembles their identity record.
	///
	/// The profile fetch always runs; course and group fetches run only while
	/// `manage_groups` is enabled. Any failing step aborts the login with no partial
	/// record.
	pub async fn authenticate(&self, token: &AccessToken) -> Result<IdentityRecord> {
		let config = self.config();
		let profile = self.api.fetch_profile(token).await?;
		let username = identity::derive_username(
			&profile,
			&config.username_key,
			config.strip_email_domain.as_deref(),
		)?;
		let mut group_names = BTreeSet::new();

		if config.manage_groups {
			let courses = self.api.fetch_courses(token).await?;

			group_names.extend(groups::groups_from_courses(&courses, &config.course_key));

			let canvas_groups = self.api.fetch_self_groups(token).await?;

			group_names.extend(groups::groups_from_canvas_groups(&canvas_groups));
		}

		Ok(IdentityRecord { username, attributes: profile.into_fields(), groups: group_names })
	}

	/// Builds the `OAUTH2_`-prefixed environment the host passes to spawned user servers.
	pub fn spawn_environment(
		&self,
		token: &AccessToken,
		record: &IdentityRecord,
	) -> BTreeMap<String, String> {
		let mut environment = BTreeMap::new();

		environment.insert(format!("{SPAWN_ENV_PREFIX}ACCESS_TOKEN"), token.expose().to_owned());

		for key in SPAWN_PROFILE_KEYS {
			if let Some(value) = record.attribute_str(key) {
				environment.insert(format!("{SPAWN_ENV_PREFIX}{}", key.to_uppercase()), value);
			}
		}

		environment
	}
}
#[cfg(feature = "reqwest")]
impl IdentityAdapter<ReqwestHttpClient> {
	/// Creates an adapter backed by the crate's default reqwest transport.
	pub fn new(config: CanvasConfig) -> Self {
		Self::with_http_client(config, ReqwestHttpClient::default())
	}
}
impl<C> Debug for IdentityAdapter<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("IdentityAdapter").field("config", self.config()).finish()
	}
}
