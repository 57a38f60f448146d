use minispider::handlers::{self, Stage};
use minispider::command_argument_builder;
use minispider_core::{CrawlOptions, FileOutputer, execute_crawl, generate_crawl_report};
use std::process;
use std::sync::Arc;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;

#[tokio::main]
async fn main() {
    let matches = command_argument_builder().get_matches();
    let conf_dir = matches
        .get_one::<String>("conf")
        .map(String::as_str)
        .unwrap_or(minispider::commands::DEFAULT_CONF_DIR);
    let log_dir = matches
        .get_one::<String>("log")
        .map(String::as_str)
        .unwrap_or(minispider::commands::DEFAULT_LOG_DIR);
    let to_stdout = matches.get_flag("stdout");
    let debug = matches.get_flag("debug");

    let guard = match handlers::init_logging(log_dir, to_stdout, debug) {
        Ok(guard) => guard,
        Err(e) => {
            handlers::print_failure(Stage::Logging, &e);
            process::exit(Stage::Logging.exit_code());
        }
    };

    info!(version = env!("CARGO_PKG_VERSION"), "minispider starting");

    if let Err((stage, e)) = run(conf_dir, to_stdout).await {
        error!(stage = ?stage, "{:#}", e);
        handlers::print_failure(stage, &e);
        exit(guard, stage.exit_code());
    }

    info!("minispider finished");
    exit(guard, 0);
}

async fn run(conf_dir: &str, to_stdout: bool) -> Result<(), (Stage, anyhow::Error)> {
    let config = handlers::load_config(conf_dir).map_err(|e| (Stage::Config, e))?;
    info!(config = ?config, "config loaded");

    let output_dir = handlers::prepare_output_directory(&config)
        .await
        .map_err(|e| (Stage::OutputDirectory, e))?;
    info!(dir = %output_dir.display(), "output directory ready");

    let seeds = handlers::load_seeds(&config).map_err(|e| (Stage::Seeds, e))?;
    info!(count = seeds.len(), "seeds loaded");

    let outputer = FileOutputer::new(&config.outputer).map_err(|e| (Stage::Outputer, e.into()))?;

    let options = CrawlOptions {
        seeds,
        show_progress_bars: !to_stdout,
    };
    let summary = execute_crawl(&config, Arc::new(outputer), options)
        .await
        .map_err(|e| (Stage::Crawl, e.into()))?;

    info!(summary = ?summary, "crawl finished");
    info!("\n{}", generate_crawl_report(&summary));
    if !to_stdout {
        handlers::print_summary(&summary);
    }
    Ok(())
}

/// Flush buffered log lines, then exit.
fn exit(guard: WorkerGuard, code: i32) -> ! {
    drop(guard);
    process::exit(code);
}
