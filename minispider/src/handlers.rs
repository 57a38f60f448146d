use anyhow::{Context, Result};
use colored::Colorize;
use minispider_core::config::CONF_FILE_NAME;
use minispider_core::outputer::create_output_directory;
use minispider_core::{Config, seed};
use minispider_engine::CrawlSummary;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_FILE_NAME: &str = "minispider.log";

/// Exit status for each startup stage that can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Logging,
    Config,
    OutputDirectory,
    Seeds,
    Outputer,
    Crawl,
}

impl Stage {
    pub fn exit_code(self) -> i32 {
        match self {
            Stage::Logging => -1,
            Stage::Config => -2,
            Stage::OutputDirectory => -3,
            Stage::Seeds => -4,
            Stage::Outputer => -5,
            Stage::Crawl => -6,
        }
    }
}

/// Resolve the config file inside `conf_dir`, expanding `~`.
pub fn config_file_path(conf_dir: &str) -> PathBuf {
    let expanded = shellexpand::tilde(conf_dir);
    Path::new(expanded.as_ref()).join(CONF_FILE_NAME)
}

/// Install the global subscriber: a daily-rotated file in `log_dir`, plus
/// stdout when `to_stdout` is set. Keep the guard alive until exit.
pub fn init_logging(log_dir: &str, to_stdout: bool, debug: bool) -> Result<WorkerGuard> {
    let log_dir = PathBuf::from(shellexpand::tilde(log_dir).as_ref());
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_NAME);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true);

    let stdout_layer = to_stdout.then(|| fmt::layer().with_target(false));

    tracing_subscriber::registry()
        .with(EnvFilter::new(log_level(debug)))
        .with(file_layer)
        .with(stdout_layer)
        .try_init()
        .context("failed to install log subscriber")?;

    Ok(guard)
}

pub fn log_level(debug: bool) -> &'static str {
    if debug { "debug" } else { "info" }
}

pub fn load_config(conf_dir: &str) -> Result<Config> {
    let path = config_file_path(conf_dir);
    Config::load_and_check(&path)
        .with_context(|| format!("failed to load config {}", path.display()))
}

pub async fn prepare_output_directory(config: &Config) -> Result<PathBuf> {
    let dir = config.outputer.output_path();
    create_output_directory(&dir)
        .await
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    Ok(dir)
}

pub fn load_seeds(config: &Config) -> Result<Vec<String>> {
    let path = config.basic.url_list_path();
    seed::load(&path).with_context(|| format!("failed to load seeds from {}", path.display()))
}

pub fn print_summary(summary: &CrawlSummary) {
    println!("\n{} Crawl complete!\n", "✓".green().bold());
    println!(
        "  {} {}",
        "Pages fetched:".bright_white(),
        summary.pages_fetched.to_string().green()
    );
    let failures = summary.fetch_failures + summary.output_failures;
    let failures = if failures == 0 {
        failures.to_string().green()
    } else {
        failures.to_string().yellow()
    };
    println!("  {} {}", "Failures:".bright_white(), failures);
    println!(
        "  {} {}",
        "Links followed:".bright_white(),
        summary.links_admitted
    );
    println!(
        "  {} {:.1}s\n",
        "Elapsed:".bright_white(),
        summary.elapsed.as_secs_f64()
    );
}

pub fn print_failure(stage: Stage, err: &anyhow::Error) {
    eprintln!("{} {:?} stage failed: {:#}", "✗".red().bold(), stage, err);
}
