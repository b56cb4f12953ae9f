//! Canvas LMS identity adapter - turn a bearer token into framework-ready usernames,
//! enrollment groups, and spawn environments for OAuth hosts.
//!
//! The OAuth handshake itself is owned by the host framework; this crate starts where the
//! handshake ends. Hand [`adapter::IdentityAdapter::authenticate`] a valid bearer token and
//! it calls the Canvas profile, course, and group APIs, then normalizes the results into an
//! [`identity::IdentityRecord`] the host can store.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod adapter;
pub mod api;
pub mod config;
pub mod error;
pub mod groups;
pub mod http;
pub mod identity;
pub mod obs;
#[cfg(feature = "reqwest")]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests backed by the default
	//! reqwest transport.

	pub use crate::_prelude::*;

	// self
	use crate::{
		adapter::IdentityAdapter,
		config::{CanvasConfig, CanvasConfigBuilder},
		http::ReqwestHttpClient,
	};

	/// Adapter type alias used by reqwest-backed integration tests.
	pub type ReqwestTestAdapter = IdentityAdapter<ReqwestHttpClient>;

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Seeds a configuration builder against a mock server base URL, applying the trailing
	/// slash the validation rules require.
	pub fn test_config(base_url: &str) -> CanvasConfigBuilder {
		let base =
			if base_url.ends_with('/') { base_url.to_owned() } else { format!("{base_url}/") };

		CanvasConfig::builder(base)
	}

	/// Constructs an [`IdentityAdapter`] backed by the certificate-tolerant reqwest
	/// transport used across integration tests.
	pub fn build_reqwest_test_adapter(config: CanvasConfig) -> ReqwestTestAdapter {
		IdentityAdapter::with_http_client(config, test_reqwest_http_client())
	}
}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, BTreeSet},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::{Map as JsonMap, Value as JsonValue};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {httpmock as _, tokio as _};
