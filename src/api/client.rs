//! Typed client for the Canvas REST endpoints the adapter consumes.

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	api::{CanvasGroup, Course, UserProfile},
	config::CanvasConfig,
	error::{ApiError, TransportError},
	http::{ApiHttpClient, ApiRequest, ApiResponse},
	identity::AccessToken,
	obs::{self, FetchKind, FetchOutcome, FetchSpan},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

const BODY_PREVIEW_LIMIT: usize = 256;

/// Typed Canvas REST client sharing one transport across fetches.
///
/// Every fetch issues plain bearer-authenticated GETs: no retries, no caching, and no
/// state beyond the shared transport handle. Failures surface immediately so the host can
/// fail the login.
#[derive(Clone)]
pub struct CanvasApi<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// HTTP client wrapper used for every outbound request.
	pub http_client: Arc<C>,
	/// Validated adapter configuration.
	pub config: CanvasConfig,
}
impl<C> CanvasApi<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a client that reuses a caller-provided transport.
	pub fn with_http_client(config: CanvasConfig, http_client: impl Into<Arc<C>>) -> Self {
		Self { http_client: http_client.into(), config }
	}

	/// Fetches the authenticated user's profile.
	pub async fn fetch_profile(&self, token: &AccessToken) -> Result<UserProfile> {
		const KIND: FetchKind = FetchKind::Profile;

		let span = FetchSpan::new(KIND, "fetch_profile");

		obs::record_fetch_outcome(KIND, FetchOutcome::Attempt);

		let result = span
			.instrument(async move {
				let url = self.config.endpoints.profile.clone();
				let (profile, _) = self.fetch_page::<UserProfile>(url, token).await?;

				Ok(profile)
			})
			.await;

		record_result(KIND, &result);

		result
	}

	/// Fetches the user's active courses, following pagination links.
	pub async fn fetch_courses(&self, token: &AccessToken) -> Result<Vec<Course>> {
		self.fetch_items(
			FetchKind::Courses,
			"fetch_courses",
			self.config.endpoints.courses.clone(),
			token,
		)
		.await
	}

	/// Fetches the user's active groups, following pagination links.
	pub async fn fetch_self_groups(&self, token: &AccessToken) -> Result<Vec<CanvasGroup>> {
		self.fetch_items(
			FetchKind::SelfGroups,
			"fetch_self_groups",
			self.config.endpoints.self_groups.clone(),
			token,
		)
		.await
	}

	async fn fetch_items<T>(
		&self,
		kind: FetchKind,
		stage: &'static str,
		first: Url,
		token: &AccessToken,
	) -> Result<Vec<T>>
	where
		T: DeserializeOwned,
	{
		let span = FetchSpan::new(kind, stage);

		obs::record_fetch_outcome(kind, FetchOutcome::Attempt);

		let result = span
			.instrument(async move {
				let mut items = Vec::new();
				let mut next = Some(first);

				while let Some(url) = next {
					let (page, link): (Vec<T>, _) = self.fetch_page(url, token).await?;

					items.extend(page);
					next = link;
				}

				Ok(items)
			})
			.await;

		record_result(kind, &result);

		result
	}

	async fn fetch_page<T>(&self, url: Url, token: &AccessToken) -> Result<(T, Option<Url>)>
	where
		T: DeserializeOwned,
	{
		let request = ApiRequest { url: url.clone(), bearer: token.clone() };
		let response = self
			.http_client
			.get(request)
			.await
			.map_err(|e| Error::Transport(TransportError::network(e)))?;

		if !response.is_success() {
			return Err(ApiError::Unexpected {
				url: url.to_string(),
				status: response.status,
				body_preview: body_preview(&response),
			}
			.into());
		}

		let next = next_url(&response)?;
		let mut deserializer = serde_json::Deserializer::from_slice(&response.body);
		let value = serde_path_to_error::deserialize(&mut deserializer).map_err(|source| {
			ApiError::ResponseParse { url: url.to_string(), status: response.status, source }
		})?;

		Ok((value, next))
	}
}
#[cfg(feature = "reqwest")]
impl CanvasApi<ReqwestHttpClient> {
	/// Creates a client backed by the crate's default reqwest transport.
	pub fn new(config: CanvasConfig) -> Self {
		Self::with_http_client(config, ReqwestHttpClient::default())
	}
}
impl<C> Debug for CanvasApi<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CanvasApi").field("config", &self.config).finish()
	}
}

fn record_result<T>(kind: FetchKind, result: &Result<T>) {
	match result {
		Ok(_) => obs::record_fetch_outcome(kind, FetchOutcome::Success),
		Err(_) => obs::record_fetch_outcome(kind, FetchOutcome::Failure),
	}
}

fn next_url(response: &ApiResponse) -> Result<Option<Url>> {
	let Some(raw) = response.next_link() else { return Ok(None) };

	Url::parse(raw)
		.map(Some)
		.map_err(|source| ApiError::InvalidNextLink { value: raw.into(), source }.into())
}

fn body_preview(response: &ApiResponse) -> Option<String> {
	if response.body.is_empty() {
		return None;
	}

	let text = String::from_utf8_lossy(&response.body);
	let mut buf = String::new();

	for (idx, ch) in text.chars().enumerate() {
		if idx >= BODY_PREVIEW_LIMIT {
			buf.push('…');

			break;
		}

		buf.push(ch);
	}

	Some(buf)
}
