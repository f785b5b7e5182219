//! Page shell: the Loading → Loaded / Failed lifecycle of one report page
//! visit.
//!
//! A shell is mounted once, fetches at most once, and never refreshes. The
//! only way out of `Failed` is mounting a new shell. The fetch races the
//! unmount signal, so a page torn down mid-fetch drops the request and keeps
//! its state untouched.

use advision_core::error::FetchError;
use advision_core::report::Report;
use advision_core::source::ReportSource;
use tokio::sync::oneshot;
use tracing::{debug, error, info};

use crate::view::ReportView;

pub const EXPORT_PENDING_MESSAGE: &str = "Download feature coming soon!";

#[derive(Debug, Clone, PartialEq)]
pub enum ShellState {
    Loading,
    /// Holds the report as fetched. The layout is composed on demand.
    Loaded(Report),
    Failed(FetchError),
}

/// What a call to [`PageShell::load`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Failed,
    /// The page was unmounted before the fetch resolved; the result (if any)
    /// was dropped.
    Discarded,
    /// The single fetch already happened; nothing was requested.
    AlreadySettled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    NotYetImplemented { message: &'static str },
}

/// Signals teardown of a mounted shell. Dropping the handle counts as
/// unmounting.
#[derive(Debug)]
pub struct UnmountHandle {
    tx: oneshot::Sender<()>,
}

impl UnmountHandle {
    pub fn unmount(self) {
        let _ = self.tx.send(());
    }
}

pub struct PageShell {
    state: ShellState,
    fetch_started: bool,
    torn_down: bool,
    unmounted: oneshot::Receiver<()>,
}

impl PageShell {
    /// Mount a fresh page: the shell starts in `Loading`.
    pub fn mount() -> (Self, UnmountHandle) {
        let (tx, rx) = oneshot::channel();
        debug!("report page mounted");
        (
            Self {
                state: ShellState::Loading,
                fetch_started: false,
                torn_down: false,
                unmounted: rx,
            },
            UnmountHandle { tx },
        )
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    /// Composes the layout for a loaded report. Recomputed on every call.
    pub fn view(&self) -> Option<ReportView> {
        match &self.state {
            ShellState::Loaded(report) => Some(ReportView::compose(report)),
            _ => None,
        }
    }

    /// Run the page's single fetch and settle the state.
    pub async fn load(&mut self, source: &dyn ReportSource) -> LoadOutcome {
        if self.torn_down {
            return LoadOutcome::Discarded;
        }
        if self.fetch_started {
            return LoadOutcome::AlreadySettled;
        }
        self.fetch_started = true;

        let result = tokio::select! {
            biased;
            _ = &mut self.unmounted => {
                self.torn_down = true;
                debug!("report page unmounted before fetch completed, discarding");
                return LoadOutcome::Discarded;
            }
            result = source.fetch_weekly_report() => result,
        };

        match result {
            Ok(report) => {
                info!(
                    period = %report.period,
                    recommendations = report.recommendations.len(),
                    next_steps = report.next_steps.len(),
                    "weekly report loaded"
                );
                metrics::counter!("report.shell.loaded").increment(1);
                self.state = ShellState::Loaded(report);
                LoadOutcome::Loaded
            }
            Err(err) => {
                error!(error = %err, "Error fetching report");
                metrics::counter!("report.shell.failed").increment(1);
                self.state = ShellState::Failed(err);
                LoadOutcome::Failed
            }
        }
    }

    /// PDF export placeholder. Does nothing and says so.
    pub fn export(&self) -> ExportOutcome {
        info!("report export requested");
        ExportOutcome::NotYetImplemented {
            message: EXPORT_PENDING_MESSAGE,
        }
    }
}
