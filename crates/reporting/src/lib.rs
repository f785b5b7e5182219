//! Weekly report presentation: field classification, report layout, text
//! rendering, and the page lifecycle around a single report fetch.

pub mod background;
pub mod classifier;
pub mod render;
pub mod shell;
pub mod view;

pub use background::{BackgroundLoader, BackgroundScene};
pub use shell::{ExportOutcome, LoadOutcome, PageShell, ShellState, UnmountHandle};
pub use view::ReportView;
