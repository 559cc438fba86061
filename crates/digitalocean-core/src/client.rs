//! The request dispatcher: one HTTP exchange per submitted descriptor.
//!
//! A [`DigitalOceanClient`] owns the connection pool and the bearer
//! credential for the process lifetime. Concurrent [`send`] calls share
//! both without locking; each call runs independently to completion or
//! failure, with no retry, caching, or cancellation.
//!
//! [`send`]: DigitalOceanClient::send

use crate::codec;
use crate::error::{Error, Result};
use crate::outcome;
use crate::request::{ApiResponse, Request};
use reqwest::header;
use secrecy::{ExposeSecret, SecretString};
use std::any::type_name;
use std::collections::BTreeMap;
use std::time::Duration;
use url::Url;

/// Origin and version prefix every request path is resolved against.
pub const DEFAULT_API_BASE: &str = "https://api.digitalocean.com/v2/";

/// Fixed per-call timeout, in seconds.
pub const DEFAULT_TIMEOUT: u64 = 60;

const USER_AGENT: &str = concat!("digitalocean-core/", env!("CARGO_PKG_VERSION"));

/// Builder for [`DigitalOceanClient`].
#[derive(Debug, Clone)]
pub struct DigitalOceanClientBuilder {
    token: SecretString,
    base_url: String,
    timeout: Duration,
    user_agent: String,
}

impl DigitalOceanClientBuilder {
    /// Create a builder holding the API token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::from(token.into()),
            base_url: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT),
            user_agent: USER_AGENT.to_string(),
        }
    }

    /// Override the API base. The trailing slash matters: descriptor paths
    /// are joined relative to it.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the fixed per-call timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the User-Agent header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEndpoint`] when the base URL does not parse,
    /// or a transport error when the underlying HTTP client cannot be
    /// constructed.
    pub fn build(self) -> Result<DigitalOceanClient> {
        let base_url = Url::parse(&self.base_url)?;
        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent)
            .build()?;

        Ok(DigitalOceanClient {
            http,
            base_url,
            token: self.token,
        })
    }
}

/// Asynchronous client for the DigitalOcean v2 API.
#[derive(Clone, Debug)]
pub struct DigitalOceanClient {
    http: reqwest::Client,
    base_url: Url,
    token: SecretString,
}

impl DigitalOceanClient {
    /// Construct a client with the default base URL and timeout.
    ///
    /// # Errors
    ///
    /// Propagates [`DigitalOceanClientBuilder::build`] failures.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        DigitalOceanClientBuilder::new(token).build()
    }

    /// Start building a client with overrides.
    pub fn builder(token: impl Into<String>) -> DigitalOceanClientBuilder {
        DigitalOceanClientBuilder::new(token)
    }

    /// Return the API base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Dispatch one request descriptor and decode the typed response.
    ///
    /// Exactly one network call is made per invocation; callers that need
    /// retry semantics re-invoke `send`. Every failure comes back as an
    /// [`Error`] value.
    ///
    /// # Errors
    ///
    /// See the [`Error`] taxonomy: encoding and endpoint construction fail
    /// before any network call; transport failures and timeouts surface
    /// when no response is obtained; remote and status errors come from
    /// classification; missing-body and decode failures from the final
    /// decoding step.
    pub async fn send<R: Request>(&self, request: &R) -> Result<R::Response> {
        let body = match request.body() {
            Some(body) => Some(codec::encode(body)?),
            None => None,
        };

        let url = self.endpoint(&request.path(), request.query())?;
        let method = request.method();
        tracing::debug!(%method, %url, "dispatching request");

        let mut call = self
            .http
            .request(method, url)
            .bearer_auth(self.token.expose_secret())
            .header(header::CACHE_CONTROL, "no-cache");
        if let Some(bytes) = body {
            call = call
                .header(header::CONTENT_TYPE, "application/json")
                .body(bytes);
        }

        let response = call.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        tracing::debug!(status = status.as_u16(), len = bytes.len(), "response received");

        let payload = if bytes.is_empty() {
            None
        } else {
            Some(bytes.as_ref())
        };
        if let Err(err) = outcome::classify(status, payload) {
            tracing::warn!(code = err.error_code(), status = err.status(), "request failed");
            return Err(err);
        }

        if let Some(done) = R::Response::no_content() {
            return Ok(done);
        }
        match payload {
            Some(bytes) => codec::decode(bytes),
            None => Err(Error::MissingBody {
                target: type_name::<R::Response>(),
            }),
        }
    }

    fn endpoint(&self, path: &str, query: Option<BTreeMap<String, String>>) -> Result<Url> {
        let mut url = self.base_url.join(path).map_err(|err| {
            Error::InvalidEndpoint(format!("{}{path}: {err}", self.base_url))
        })?;
        if let Some(query) = query.filter(|query| !query.is_empty()) {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }
}
