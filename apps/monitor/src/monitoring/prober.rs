use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;
use tokio::time::{Instant, sleep};
use url::Url;

use super::types::ProbeResult;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Request failed: {0}")]
    Request(String),
}

/// Application-layer request used as the reachability signal.
///
/// Implementations only report whether *a* response arrived; status codes
/// and bodies are irrelevant.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn request(&self, url: &Url) -> Result<(), TransportError>;
}

/// HTTP/HTTPS transport
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// `ceiling` bounds how long an attempt may linger after it lost the
    /// timeout race.
    pub fn new(ceiling: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(ceiling).build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(&self, url: &Url) -> Result<(), TransportError> {
        // Any status code counts: only transport-level completion matters
        self.client
            .get(url.clone())
            .send()
            .await
            .map(|_response| ())
            // Alternate form appends the cause chain
            .map_err(|e| TransportError::Request(format!("{:#}", anyhow::Error::new(e))))
    }
}

/// Reachability prober - races one request against a timer
pub struct Prober {
    transport: Arc<dyn Transport>,
    timeout: Duration,
    scheme: String,
}

impl Prober {
    pub fn new(transport: Arc<dyn Transport>, timeout: Duration, scheme: impl Into<String>) -> Self {
        Self { transport, timeout, scheme: scheme.into() }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Build the request URL for a registered host
    pub fn target_url(&self, host: &str) -> Result<Url, url::ParseError> {
        if host.contains("://") {
            Url::parse(host)
        } else {
            Url::parse(&format!("{}://{}", self.scheme, host))
        }
    }

    /// Probe a host. Never fails: every failure path is `Unreachable`.
    ///
    /// The request runs in its own task. When the timer wins, the task is
    /// detached rather than aborted and its eventual outcome is dropped.
    pub async fn probe(&self, host: &str) -> ProbeResult {
        let url = match self.target_url(host) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!(host, error = %e, "Cannot build probe URL");
                return ProbeResult::unreachable(format!("Invalid target URL: {e}"));
            }
        };

        let start = Instant::now();
        let transport = self.transport.clone();
        let attempt = tokio::spawn(async move {
            transport.request(&url).await.map(|()| start.elapsed())
        });

        let result = tokio::select! {
            // A response landing on the deadline still counts
            biased;
            settled = attempt => match settled {
                Ok(Ok(elapsed)) => ProbeResult::reachable(elapsed.as_millis() as u64),
                Ok(Err(e)) => ProbeResult::unreachable(e.to_string()),
                Err(e) => ProbeResult::unreachable(format!("Probe task failed: {e}")),
            },
            _ = sleep(self.timeout) => ProbeResult::timed_out(),
        };

        tracing::debug!(host, %result, "Probe settled");
        result
    }
}
