//! Dashboard server entry point

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;

use dashboard::{DashboardResult, DashboardServer, DashboardState, RealStaticFileServer};
use reviews::{DatasetSource, RealDatasetSource, RealSubmissionLog, ReviewStore, merge_submissions};
use shared::config::{DEFAULT_DATASET_PATH, DEFAULT_STATIC_DIR, DEFAULT_SUBMISSIONS_PATH, load_env_file};
use shared::{DashboardConfig, DataPaths, ProcessId, logging, process_info, process_warn};

/// Command line arguments; every flag can also come from the environment or `.env`
#[derive(Parser, Debug)]
#[command(name = "dashboard")]
#[command(about = "Store reviews dashboard server")]
struct Args {
    /// Address for the HTTP server
    #[arg(long, env = "MCREVIEWS_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port for the HTTP server
    #[arg(long, env = "MCREVIEWS_PORT", default_value = "8080")]
    port: u16,

    /// Base review dataset (ISO-8859-1 CSV)
    #[arg(long, env = "MCREVIEWS_DATASET", default_value = DEFAULT_DATASET_PATH)]
    dataset: PathBuf,

    /// Submission log (UTF-8 CSV, created on first submission)
    #[arg(long, env = "MCREVIEWS_SUBMISSIONS", default_value = DEFAULT_SUBMISSIONS_PATH)]
    submissions: PathBuf,

    /// Static files directory
    #[arg(long, env = "MCREVIEWS_STATIC_DIR", default_value = DEFAULT_STATIC_DIR)]
    static_dir: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "MCREVIEWS_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

impl From<Args> for DashboardConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            paths: DataPaths {
                dataset: args.dataset,
                submissions: args.submissions,
            },
            static_dir: args.static_dir,
            log_level: args.log_level,
        }
    }
}

#[tokio::main]
async fn main() -> DashboardResult<()> {
    let env_loaded = load_env_file()?;
    let config = DashboardConfig::from(Args::parse());

    ProcessId::init_dashboard();
    logging::init_tracing(Some(&config.log_level));
    if env_loaded {
        process_info!(ProcessId::current(), "🔧 Loaded settings from .env");
    }

    let http_addr = config.bind_addr()?;
    logging::log_startup(ProcessId::current(), &format!("dashboard on {http_addr}"));

    let state = build_state(&config)?;
    let server = DashboardServer::new(state);

    // Set up graceful shutdown
    let shutdown_sender = server.get_shutdown_sender();
    tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => {
                logging::log_shutdown(ProcessId::current(), "Received Ctrl+C signal");
                let _ = shutdown_sender.send(()).await;
            }
            Err(err) => {
                logging::log_error(ProcessId::current(), "Signal handling", &err);
            }
        }
    });

    server.run(http_addr).await?;

    logging::log_success(ProcessId::current(), "Dashboard stopped gracefully");
    Ok(())
}

/// Load the base set (fatal on failure) and merge the log (warn on failure)
fn build_state(config: &DashboardConfig) -> DashboardResult<DashboardState> {
    let dataset = RealDatasetSource::new(&config.paths.dataset);
    let submission_log = RealSubmissionLog::new(&config.paths.submissions);

    logging::log_progress(ProcessId::current(), "Loading reviews", &dataset.describe());
    let mut store = ReviewStore::new(dataset.load_base()?);
    match merge_submissions(&mut store, &submission_log) {
        Ok(count) => logging::log_progress(
            ProcessId::current(),
            "Submissions",
            &format!("{count} merged from {}", submission_log.path().display()),
        ),
        Err(e) => process_warn!(
            ProcessId::current(),
            "⚠️ Serving base reviews only, submission log unreadable: {}",
            e
        ),
    }

    Ok(DashboardState::new(
        store,
        Arc::new(submission_log),
        Arc::new(RealStaticFileServer::new(&config.static_dir)),
    ))
}
