//! Seam between the page shell and whatever produces the weekly report.

use async_trait::async_trait;

use crate::error::FetchError;
use crate::report::Report;

/// Produces the weekly report for the current session. Each call is exactly
/// one retrieval attempt; implementations must not retry.
#[async_trait]
pub trait ReportSource: Send + Sync {
    async fn fetch_weekly_report(&self) -> Result<Report, FetchError>;
}
