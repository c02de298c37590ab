//! Request verbs and parameter bags

use std::fmt;

use indexmap::IndexMap;
use reqwest::Method;

/// HTTP verbs accepted by the OCS endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl Verb {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Verb> for Method {
    fn from(verb: Verb) -> Self {
        match verb {
            Verb::Get => Self::GET,
            Verb::Post => Self::POST,
            Verb::Put => Self::PUT,
            Verb::Delete => Self::DELETE,
        }
    }
}

/// Parameters attached to a single request: headers, basic-auth credentials
/// and an optional flat form body.
///
/// An empty bag means "use the connection defaults" for the operations that
/// substitute them; see [`Connection`](super::connection::Connection).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestParams {
    headers: IndexMap<String, String>,
    auth: Option<(String, String)>,
    body: Option<Vec<(String, String)>>,
}

impl RequestParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a header, replacing any previous value under the same name.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Attach basic-auth credentials.
    #[must_use]
    pub fn basic_auth(mut self, username: impl Into<String>, secret: impl Into<String>) -> Self {
        self.auth = Some((username.into(), secret.into()));
        self
    }

    /// Attach a flat form body.
    #[must_use]
    pub fn form(mut self, fields: &[(&str, &str)]) -> Self {
        self.body = Some(
            fields
                .iter()
                .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
                .collect(),
        );
        self
    }

    /// True when no header, credential or body has been set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.auth.is_none() && self.body.is_none()
    }

    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    #[must_use]
    pub fn auth(&self) -> Option<(&str, &str)> {
        self.auth
            .as_ref()
            .map(|(username, secret)| (username.as_str(), secret.as_str()))
    }

    #[must_use]
    pub fn body(&self) -> Option<&[(String, String)]> {
        self.body.as_deref()
    }
}
