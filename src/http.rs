//! Transport primitives for Canvas REST calls.
//!
//! The module exposes [`ApiHttpClient`] alongside [`ApiRequest`] and [`ApiResponse`] so
//! downstream crates can integrate custom HTTP clients. The trait is the crate's only
//! dependency on an HTTP stack: implementations execute one bearer-authenticated GET and
//! hand back the raw outcome, while the API client owns status classification, pagination,
//! and JSON decoding.

// std
use std::ops::Deref;
// crates.io
#[cfg(feature = "reqwest")] use reqwest::header::LINK;
// self
use crate::{_prelude::*, identity::AccessToken};

/// Boxed future returned by [`ApiHttpClient::get`].
pub type ApiFuture<E> = Pin<Box<dyn Future<Output = Result<ApiResponse, E>> + Send>>;

/// Abstraction over HTTP transports capable of executing bearer-authenticated GET requests.
///
/// Implementations must be `Send + Sync + 'static` so they can be shared across adapter
/// instances behind `Arc<T>`, and the futures they return must own whatever state they need
/// so in-flight requests remain `Send`.
pub trait ApiHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Executes a single GET request and resolves with the raw response.
	fn get(&self, request: ApiRequest) -> ApiFuture<Self::TransportError>;
}

/// Bearer-authenticated GET request issued by the API client.
#[derive(Clone, Debug)]
pub struct ApiRequest {
	/// Absolute endpoint URL.
	pub url: Url,
	/// Bearer token attached to the `Authorization` header.
	pub bearer: AccessToken,
}

/// Raw response handed back by a transport.
#[derive(Clone, Debug)]
pub struct ApiResponse {
	/// HTTP status code.
	pub status: u16,
	/// Raw `Link` header, when Canvas returned one.
	pub link: Option<String>,
	/// Response body bytes.
	pub body: Vec<u8>,
}
impl ApiResponse {
	/// Returns true for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Target of the `rel="next"` pagination link, when the `Link` header advertises one.
	///
	/// Canvas paginates every listing endpoint through RFC 8288 `Link` headers.
	pub fn next_link(&self) -> Option<&str> {
		parse_link_next(self.link.as_deref()?)
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
/// Canvas GETs are plain bearer-authenticated requests, so any custom [`ReqwestClient`]
/// (timeouts, proxies, pinned roots) can be dropped in via [`with_client`](Self::with_client).
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn get(&self, request: ApiRequest) -> ApiFuture<Self::TransportError> {
		let client = self.0.clone();

		Box::pin(async move {
			let response =
				client.get(request.url).bearer_auth(request.bearer.expose()).send().await?;
			let status = response.status().as_u16();
			let link = response
				.headers()
				.get(LINK)
				.and_then(|value| value.to_str().ok())
				.map(str::to_owned);
			let body = response.bytes().await?.to_vec();

			Ok(ApiResponse { status, link, body })
		})
	}
}

fn parse_link_next(header: &str) -> Option<&str> {
	for entry in header.split(',') {
		let mut parts = entry.split(';');
		let target = parts.next()?.trim();

		if !target.starts_with('<') || !target.ends_with('>') {
			continue;
		}

		let is_next = parts.any(|param| {
			let param = param.trim();

			param.eq_ignore_ascii_case("rel=\"next\"") || param.eq_ignore_ascii_case("rel=next")
		});

		if is_next {
			return Some(&target[1..target.len() - 1]);
		}
	}

	None
}
