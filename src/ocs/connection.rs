//! Connection to one Nextcloud instance
//!
//! Owns the HTTP client plus the credentials every OCS call authenticates
//! with, and funnels the three request modes through a single dispatch.

use std::sync::LazyLock;
use std::time::Duration;

use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::debug;

use crate::error::OcsError;

use super::params::{RequestParams, Verb};
use super::response::OcsResponse;

/// Header Nextcloud requires on every OCS API call.
pub const OCS_API_REQUEST_HEADER: &str = "OCS-APIRequest";

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Shared HTTP client for all connections (connection pooling).
/// Redirects are disabled so 3xx answers stay visible to the failure
/// classification instead of being followed silently.
static SHARED_CLIENT: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(30))
        .pool_max_idle_per_host(10)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to build shared HTTP client")
});

/// Connection to a Nextcloud OCS endpoint.
///
/// Credentials and base URL are fixed at construction and never mutated;
/// one instance can serve concurrent callers.
#[derive(Clone)]
pub struct Connection {
    base_url: String,
    username: String,
    password: String,
    client: Client,
}

impl Connection {
    /// Create a connection bound to a base URL, e.g.
    /// `https://cloud.example.com/ocs/` (reuses the shared connection pool).
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            username: username.into(),
            password: password.into(),
            client: SHARED_CLIENT.clone(),
        }
    }

    /// Base parameter bag: the OCS header plus the stored credentials.
    #[must_use]
    pub fn base_params(&self) -> RequestParams {
        RequestParams::new()
            .header(OCS_API_REQUEST_HEADER, "true")
            .basic_auth(&self.username, &self.password)
    }

    /// Perform a request.
    ///
    /// Without an explicit bag the base parameters are used; an explicit
    /// bag is taken exactly as supplied, nothing is merged in.
    pub async fn request(
        &self,
        verb: Verb,
        path: &str,
        params: Option<RequestParams>,
    ) -> Result<OcsResponse, OcsError> {
        let params = params.unwrap_or_else(|| self.base_params());
        self.dispatch(verb, path, params).await
    }

    /// Perform a request pushing url-encoded data.
    ///
    /// An empty bag is replaced by the base parameters; either way the
    /// `Content-Type` header is forced to `application/x-www-form-urlencoded`.
    pub async fn push_data_request(
        &self,
        verb: Verb,
        path: &str,
        params: RequestParams,
    ) -> Result<OcsResponse, OcsError> {
        let params = if params.is_empty() {
            self.base_params()
        } else {
            params
        };
        let params = params.header("Content-Type", FORM_URLENCODED);
        self.request(verb, path, Some(params)).await
    }

    /// Perform a request sending form data under the base parameters.
    /// The transport picks the matching `Content-Type` itself.
    pub async fn submit_request(
        &self,
        verb: Verb,
        path: &str,
        form: &[(&str, &str)],
    ) -> Result<OcsResponse, OcsError> {
        self.request(verb, path, Some(self.base_params().form(form)))
            .await
    }

    /// One network round-trip, then envelope construction.
    async fn dispatch(
        &self,
        verb: Verb,
        path: &str,
        params: RequestParams,
    ) -> Result<OcsResponse, OcsError> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        debug!(%verb, %url, "dispatching OCS request");

        let mut builder = self.client.request(verb.into(), &url);
        if let Some((username, secret)) = params.auth() {
            builder = builder.basic_auth(username, Some(secret));
        }
        if let Some(fields) = params.body() {
            builder = builder.form(fields);
        }
        // Headers go last so a forced Content-Type wins over whatever the
        // body encoding set.
        builder = builder.headers(header_map(&params)?);

        let response = builder.send().await?;
        debug!(status = %response.status(), %url, "received OCS response");
        OcsResponse::from_http(response).await
    }
}

/// Build a typed header map from the bag. A header the transport cannot
/// represent aborts before any network I/O.
fn header_map(params: &RequestParams) -> Result<HeaderMap, OcsError> {
    let mut headers = HeaderMap::new();
    for (name, value) in params.headers() {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|err| OcsError::Transport(format!("invalid header name {name}: {err}")))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|err| OcsError::Transport(format!("invalid header value for {name}: {err}")))?;
        headers.insert(header_name, header_value);
    }
    Ok(headers)
}
