//! Response envelope over the OCS XML wire format
//!
//! Every OCS endpoint answers with the same envelope:
//!
//! ```xml
//! <ocs>
//!   <meta><status>ok</status><statuscode>100</statuscode><message>...</message></meta>
//!   <data>...</data>
//! </ocs>
//! ```
//!
//! [`OcsResponse`] wraps one such answer: a snapshot of the transport
//! response plus the document tree parsed from its body.

use reqwest::StatusCode;
use reqwest::header::HeaderMap;

use crate::error::OcsError;

use super::xml::{self, Element, XmlValue};

/// Snapshot of the transport response: status line, final URL, headers and
/// the raw body text.
#[derive(Debug, Clone)]
pub struct RawResponse {
    status: StatusCode,
    url: String,
    headers: HeaderMap,
    body: String,
}

impl RawResponse {
    pub(crate) fn new(status: StatusCode, url: String, headers: HeaderMap, body: String) -> Self {
        Self {
            status,
            url,
            headers,
            body,
        }
    }

    /// Read the body of a live transport response into a snapshot.
    /// A network failure while reading classifies as a transport error.
    pub(crate) async fn read(response: reqwest::Response) -> Result<Self, OcsError> {
        let status = response.status();
        let url = response.url().to_string();
        let headers = response.headers().clone();
        let body = response.text().await?;
        Ok(Self::new(status, url, headers, body))
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }
}

/// One parsed OCS response.
///
/// Construction parses the XML body exactly once; transport failures and
/// unparseable bodies never produce an envelope. An envelope whose meta
/// block reports an application-level failure is still returned normally,
/// interpreting OCS status codes is the caller's job.
#[derive(Debug, Clone)]
pub struct OcsResponse {
    raw: RawResponse,
    body: Element,
}

impl OcsResponse {
    pub(crate) async fn from_http(response: reqwest::Response) -> Result<Self, OcsError> {
        let raw = RawResponse::read(response).await?;
        Self::from_raw(raw)
    }

    /// Classify the transport status, then parse the body.
    pub(crate) fn from_raw(raw: RawResponse) -> Result<Self, OcsError> {
        let status = raw.status();
        if status.is_redirection() {
            return Err(OcsError::Redirect { response: raw });
        }
        if status.is_client_error() {
            return Err(OcsError::Client { response: raw });
        }
        if status.is_server_error() {
            return Err(OcsError::Server { response: raw });
        }
        match xml::parse(raw.body()) {
            Ok(body) => Ok(Self { raw, body }),
            Err(err) => Err(OcsError::Parse {
                message: err.to_string(),
                response: raw,
            }),
        }
    }

    /// Value of `meta.status`, empty when the element is missing.
    #[must_use]
    pub fn status(&self) -> &str {
        self.body
            .descendant(&["meta", "status"])
            .map_or("", Element::text)
    }

    /// Value of `meta.message`, when present.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.body.descendant(&["meta", "message"]).map(Element::text)
    }

    /// Value of `meta.statuscode`, `0` when missing or not numeric.
    #[must_use]
    pub fn status_code(&self) -> i64 {
        self.body
            .descendant(&["meta", "statuscode"])
            .and_then(|element| element.text().parse().ok())
            .unwrap_or(0)
    }

    /// Normalized `data` subtree, `None` when the server sent none.
    #[must_use]
    pub fn data(&self) -> Option<XmlValue> {
        let data = self.body.child("data")?;
        if data.is_empty() {
            return None;
        }
        Some(xml::normalize(data))
    }

    /// The parsed document tree.
    #[must_use]
    pub fn xml(&self) -> &Element {
        &self.body
    }

    /// The transport response snapshot the envelope was built from.
    #[must_use]
    pub fn raw_response(&self) -> &RawResponse {
        &self.raw
    }
}
