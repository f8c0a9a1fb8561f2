use std::num::NonZeroU32;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use tracing::{debug, trace};

use crate::config::Configuration;
use crate::error::{CoreError, TransportError};

use super::connection::endpoint_url;
use super::{HttpRequest, HttpResponse, HttpTransport};

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// `reqwest`-backed transport that authenticates every request with HTTP
/// basic auth taken from a [`Configuration`].
pub struct ReqwestTransport {
    client: reqwest::Client,
    url: reqwest::Url,
    auth: Option<(String, String)>,
    limiter: Option<DirectRateLimiter>,
}

impl ReqwestTransport {
    /// Build a transport for `config`.
    ///
    /// The daemon URL is resolved here, so a bad host fails construction
    /// rather than the first call. Basic auth is skipped only when both login
    /// and password are empty, for nodes reached through token-in-URL proxies.
    pub fn new(config: &Configuration) -> Result<Self, CoreError> {
        let url = endpoint_url(config.host(), config.port())?;
        let auth = if config.login().is_empty() && config.password().is_empty() {
            None
        } else {
            Some((config.login().to_owned(), config.password().to_owned()))
        };

        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(60))
            .pool_max_idle_per_host(8)
            .tcp_nodelay(true)
            .build()
            .map_err(|e| CoreError::Config(format!("build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url,
            auth,
            limiter: None,
        })
    }

    /// Cap outbound requests at `limit` per second.
    pub fn with_requests_per_second(mut self, limit: u32) -> Result<Self, CoreError> {
        let limit = NonZeroU32::new(limit).ok_or_else(|| {
            CoreError::Config("requests_per_second must be at least 1".to_owned())
        })?;
        self.limiter = Some(RateLimiter::direct(Quota::per_second(limit)));
        Ok(self)
    }

    pub fn url(&self) -> &reqwest::Url {
        &self.url
    }

    async fn wait_for_rate_limit(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.wait_for_rate_limit().await;

        let url = &self.url;
        let mut builder = self.client.post(url.clone()).body(request.body);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some((ref user, ref pass)) = self.auth {
            builder = builder.basic_auth(user, Some(pass));
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(
            %url,
            endpoint = %request.url,
            status,
            body_len = body.len(),
            "http exchange complete"
        );
        trace!(%url, body = %body, "http response body");

        Ok(HttpResponse { status, body })
    }
}
