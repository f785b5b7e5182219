//! AdVision dashboard: terminal client for the weekly performance report.
//!
//! Loads configuration, restores the stored session, and drives one report
//! page visit: mount, fetch once, render.

use std::future::Future;
use std::path::PathBuf;
use std::process::ExitCode;

use advision_client::{AuthClient, FileTokenStore, ReportClient, StoredTokens, TokenStore};
use advision_core::config::AppConfig;
use advision_core::error::{DashboardError, DashboardResult};
use advision_core::source::ReportSource;
use advision_reporting::render::render_state;
use advision_reporting::{BackgroundLoader, ExportOutcome, LoadOutcome, PageShell, ShellState};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info, warn};

#[derive(Parser, Debug)]
#[command(name = "advision-dashboard")]
#[command(about = "AdVision weekly performance report client")]
#[command(version)]
struct Cli {
    /// Config file (TOML). Defaults to ./advision.toml when present.
    #[arg(long, env = "ADVISION_CONFIG")]
    config: Option<PathBuf>,

    /// API base URL (overrides config)
    #[arg(long)]
    api_url: Option<String>,

    /// Session token file (overrides config)
    #[arg(long)]
    token_file: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch and display this week's performance report
    Report {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Exchange a Google authorization code for a session
    Login {
        /// Authorization code returned by the Google consent screen
        #[arg(long)]
        code: String,
    },

    /// Forget the stored session
    Logout,

    /// Export the report as PDF
    Export,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// How a report page visit ended, when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Shown,
    /// Torn down before the report arrived; nothing was rendered.
    Closed,
}

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.logging.filter.as_str().into());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if config.logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let loaded = AppConfig::load(cli.config.as_deref());
    let mut config = loaded.as_ref().cloned().unwrap_or_default();
    init_tracing(&config);
    if let Err(e) = &loaded {
        warn!(error = %e, "Failed to load config, using defaults");
    }

    // Apply CLI overrides
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }
    if let Some(path) = cli.token_file {
        config.auth.token_path = path;
    }

    debug!(
        base_url = %config.api.base_url,
        timeout_ms = config.api.timeout_ms,
        token_path = %config.auth.token_path,
        "Configuration loaded"
    );

    let store = FileTokenStore::new(&config.auth.token_path);

    let result = match cli.command {
        Commands::Report { format } => show_report(&config, &store, format).await,
        Commands::Login { code } => login(&config, &store, &code).await,
        Commands::Logout => logout(&store),
        Commands::Export => {
            let (shell, _mounted) = PageShell::mount();
            match shell.export() {
                ExportOutcome::NotYetImplemented { message } => println!("{message}"),
            }
            Ok(ExitCode::SUCCESS)
        }
    };

    match result {
        Ok(code) => Ok(code),
        Err(err) => failure_exit(err),
    }
}

/// Report and login failures have already been shown to the user and only
/// change the exit status. Everything else propagates.
fn failure_exit(err: DashboardError) -> anyhow::Result<ExitCode> {
    match err {
        DashboardError::Fetch(e) => {
            debug!(error = %e, "report page ended in failure");
            Ok(ExitCode::FAILURE)
        }
        DashboardError::Auth(e) => {
            warn!(error = %e, "Google login error");
            eprintln!("{}", e.user_message());
            Ok(ExitCode::FAILURE)
        }
        other => Err(other.into()),
    }
}

async fn show_report(
    config: &AppConfig,
    store: &dyn TokenStore,
    format: OutputFormat,
) -> DashboardResult<ExitCode> {
    let mut client = ReportClient::from_config(&config.api)?;
    match store.load() {
        Ok(Some(tokens)) => client = client.with_bearer(tokens.access_token),
        Ok(None) => warn!("No stored session, requesting report anonymously"),
        Err(e) => warn!(error = %e, "Could not read stored session"),
    }

    let background = BackgroundLoader::default();
    background.ensure_loaded(|scene| {
        debug!(project = %scene.project_id, script = %scene.script_url, "background scene ready");
    });

    let interrupted = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    Ok(match visit_page(&client, interrupted, format).await? {
        Visit::Shown => ExitCode::SUCCESS,
        Visit::Closed => ExitCode::FAILURE,
    })
}

/// Mounts a report page, loads it unless `teardown` resolves first, and
/// renders whatever state it settled in. A failed fetch is rendered and then
/// returned as the error.
async fn visit_page<F>(
    source: &dyn ReportSource,
    teardown: F,
    format: OutputFormat,
) -> DashboardResult<Visit>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (mut shell, mounted) = PageShell::mount();
    let watcher = tokio::spawn(async move {
        teardown.await;
        mounted.unmount();
    });
    let outcome = shell.load(source).await;
    watcher.abort();

    if outcome == LoadOutcome::Discarded {
        info!("Report page closed before the report arrived");
        return Ok(Visit::Closed);
    }

    match format {
        OutputFormat::Text => {
            for line in render_state(shell.state()) {
                println!("{line}");
            }
        }
        OutputFormat::Json => match (shell.view(), shell.state()) {
            (Some(view), _) => println!("{}", serde_json::to_string_pretty(&view)?),
            (None, ShellState::Failed(err)) => println!(
                "{}",
                serde_json::json!({ "state": "failed", "message": err.user_message() })
            ),
            (None, _) => println!("{}", serde_json::json!({ "state": "loading" })),
        },
    }

    match shell.state() {
        ShellState::Failed(err) => Err(err.clone().into()),
        _ => Ok(Visit::Shown),
    }
}

async fn login(config: &AppConfig, store: &dyn TokenStore, code: &str) -> DashboardResult<ExitCode> {
    let auth = AuthClient::from_config(&config.api)?;
    info!("Logging in with Google...");

    let tokens = auth.exchange_code(code).await?;
    store.save(&StoredTokens::from_pair(&tokens))?;
    println!("Logged in successfully!");
    Ok(ExitCode::SUCCESS)
}

fn logout(store: &dyn TokenStore) -> DashboardResult<ExitCode> {
    store.clear()?;
    println!("Logged out.");
    Ok(ExitCode::SUCCESS)
}
