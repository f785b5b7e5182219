//! HTTP client for `GET /reports/weekly/`.

use std::time::Duration;

use advision_core::config::ApiConfig;
use advision_core::error::{DashboardResult, FetchError};
use advision_core::report::Report;
use advision_core::source::ReportSource;
use async_trait::async_trait;
use tracing::{debug, warn};
use url::Url;

use crate::{api_url, http_client};

pub const WEEKLY_REPORT_PATH: &str = "reports/weekly/";

/// Fetches the weekly report for the session identified by the bearer token.
/// One request per call, no retries, body returned untransformed.
pub struct ReportClient {
    http: reqwest::Client,
    endpoint: Url,
    bearer: Option<String>,
}

impl ReportClient {
    pub fn new(base_url: &str, timeout: Duration) -> DashboardResult<Self> {
        Ok(Self {
            http: http_client(timeout)?,
            endpoint: api_url(base_url, WEEKLY_REPORT_PATH)?,
            bearer: None,
        })
    }

    pub fn from_config(config: &ApiConfig) -> DashboardResult<Self> {
        Self::new(&config.base_url, Duration::from_millis(config.timeout_ms))
    }

    /// Attach the session's access token.
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn request(&self) -> Result<Report, FetchError> {
        let mut request = self.http.get(self.endpoint.clone());
        if let Some(token) = &self.bearer {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ReportSource for ReportClient {
    async fn fetch_weekly_report(&self) -> Result<Report, FetchError> {
        let start = std::time::Instant::now();
        let result = self.request().await;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match &result {
            Ok(report) => {
                metrics::counter!("report.fetch.success").increment(1);
                debug!(
                    endpoint = %self.endpoint,
                    elapsed_ms,
                    period = %report.period,
                    "weekly report fetched"
                );
            }
            Err(err) => {
                metrics::counter!("report.fetch.failure").increment(1);
                warn!(
                    endpoint = %self.endpoint,
                    authenticated = self.bearer.is_some(),
                    elapsed_ms,
                    error = %err,
                    "weekly report fetch failed"
                );
            }
        }
        result
    }
}
