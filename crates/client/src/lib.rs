//! Backend API clients: the weekly report fetch, the Google sign-in code
//! exchange, and persistence of the resulting session tokens.

pub mod auth;
pub mod report_client;
pub mod token_store;

pub use auth::{AuthClient, TokenPair};
pub use report_client::ReportClient;
pub use token_store::{FileTokenStore, MemoryTokenStore, StoredTokens, TokenStore};

use advision_core::error::DashboardError;
use std::time::Duration;
use url::Url;

/// Resolves an API path against the configured base URL. The base is treated
/// as a directory even without a trailing slash, so `http://host/api` +
/// `reports/weekly/` gives `http://host/api/reports/weekly/`.
pub fn api_url(base_url: &str, path: &str) -> Result<Url, DashboardError> {
    let mut base = base_url.trim_end_matches('/').to_string();
    base.push('/');
    let base = Url::parse(&base)
        .map_err(|e| DashboardError::Config(format!("invalid api base url {base_url:?}: {e}")))?;
    base.join(path.trim_start_matches('/'))
        .map_err(|e| DashboardError::Config(format!("invalid api path {path:?}: {e}")))
}

pub(crate) fn http_client(timeout: Duration) -> Result<reqwest::Client, DashboardError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| DashboardError::Config(format!("failed to build http client: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url_joins_under_base_path() {
        let url = api_url("http://localhost:8000/api", "/reports/weekly/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/reports/weekly/");

        let url = api_url("https://example.com/", "auth/google/").unwrap();
        assert_eq!(url.as_str(), "https://example.com/auth/google/");
    }

    #[test]
    fn test_api_url_rejects_garbage() {
        assert!(matches!(
            api_url("not a url", "reports/weekly/"),
            Err(DashboardError::Config(_))
        ));
    }
}
