pub mod config;
pub mod error;
pub mod report;
pub mod source;

pub use config::AppConfig;
pub use error::{AuthError, DashboardError, DashboardResult, FetchError, TokenStoreError};
pub use report::{Recommendation, Report, ReportInsights, ReportSummary};
pub use source::ReportSource;
