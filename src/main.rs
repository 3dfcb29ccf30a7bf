use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use log::{error, info};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use tod::core::config::{self, CliOverrides};
use tod::service::{GraphTaskService, TaskService};

#[derive(Parser)]
#[command(name = "tod", about = "Terminal client for Microsoft To Do")]
struct Args {
    /// Maximum number of open tasks fetched per list
    #[arg(long)]
    max_tasks: Option<usize>,

    /// Seconds before a service call is abandoned (0 = never)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Log file, truncated on every start
    #[arg(long, default_value = "tod.log")]
    log_file: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "debug")]
    log_level: String,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // The terminal belongs to the UI, so logs go to a file
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let level = args.log_level.parse().unwrap_or(LevelFilter::Debug);
    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(level, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    let cli = CliOverrides {
        max_tasks: args.max_tasks,
        timeout_secs: args.timeout_secs,
    };
    let resolved = config::resolve(&file_config, &cli);

    let service = Arc::new(GraphTaskService::new(
        Some(resolved.graph_base_url.clone()),
        resolved.access_token.clone(),
    ));
    info!(
        "tod starting up against {} (max_tasks={}, timeout={:?})",
        resolved.graph_base_url, resolved.max_tasks, resolved.request_timeout
    );

    // Nothing works without a valid token, so fail before taking the terminal
    if let Err(e) = service.verify_credentials().await {
        error!("Credential check failed: {}", e);
        eprintln!("Could not reach {}: {e}", service.name());
        std::process::exit(1);
    }

    tod::tui::run(resolved, service)
}
