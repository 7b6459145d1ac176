// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, error};
use std::io::Write;

use crate::app_config::{Config, LogLevel, TranslationConfig, TranslationProvider};
use sync_controller::SyncController;

mod api_client;
mod app_config;
mod catalog;
mod errors;
mod materialize;
mod pool;
mod providers;
mod sync_controller;
mod translation;

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    Google,
    #[value(name = "libretranslate")]
    LibreTranslate,
    #[value(name = "mymemory")]
    MyMemory,
    None,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Google => TranslationProvider::Google,
            CliTranslationProvider::LibreTranslate => TranslationProvider::LibreTranslate,
            CliTranslationProvider::MyMemory => TranslationProvider::MyMemory,
            CliTranslationProvider::None => TranslationProvider::None,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for srdsync
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// srdsync - D&D 5e SRD catalog sync pipeline
///
/// Pulls the complete SRD ruleset catalog from the public REST API,
/// machine-translates it into target locales, and materializes per-locale
/// JSON document shards for the character manager to consume.
#[derive(Parser, Debug)]
#[command(name = "srdsync")]
#[command(version = "1.0.0")]
#[command(about = "Offline D&D 5e ruleset catalog sync")]
#[command(long_about = "srdsync pulls the D&D 5e SRD catalog and materializes localized JSON shards.

EXAMPLES:
    srdsync                                    # Sync into data/dnd with default provider
    srdsync -o out -l es,fr                    # Translate into Spanish and French
    srdsync -p none                            # English-only sync, no provider calls
    srdsync -p libretranslate -e http://lt:5000  # Self-hosted LibreTranslate
    srdsync --skip-full-sync                   # Skip the full-catalog snapshot stage
    srdsync completions bash > srdsync.bash    # Generate bash completions

CONFIGURATION:
    Every flag doubles as an environment variable where noted, e.g.
    TRANSLATION_PROVIDER, TRANSLATION_ENDPOINT, TRANSLATION_API_KEY,
    TRANSLATION_EMAIL, TRANSLATION_THROTTLE_MS and DND_SKIP_FULL_SYNC=1.

SUPPORTED PROVIDERS:
    google         - Unauthenticated public endpoint (default)
    libretranslate - Self-hosted instance, API key optional
    mymemory       - Public quota-limited endpoint, contact email optional
    none           - Identity passthrough, no network calls")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Output directory for materialized documents
    #[arg(short, long, default_value = "data/dnd")]
    out_dir: String,

    /// Target locales to translate into (comma-separated)
    #[arg(short, long, value_delimiter = ',', default_value = "es")]
    locales: Vec<String>,

    /// Source locale of the catalog baseline
    #[arg(long, default_value = "en")]
    source_locale: String,

    /// Translation provider to use
    #[arg(short, long, value_enum, env = "TRANSLATION_PROVIDER")]
    provider: Option<CliTranslationProvider>,

    /// Provider endpoint override (LibreTranslate host)
    #[arg(short, long, env = "TRANSLATION_ENDPOINT")]
    endpoint: Option<String>,

    /// Provider API key
    #[arg(short = 'k', long, env = "TRANSLATION_API_KEY")]
    api_key: Option<String>,

    /// Contact email forwarded to MyMemory
    #[arg(long, env = "TRANSLATION_EMAIL")]
    email: Option<String>,

    /// Minimum milliseconds between provider calls
    #[arg(short, long, env = "TRANSLATION_THROTTLE_MS")]
    throttle_ms: Option<u64>,

    /// Skip the full-catalog snapshot stage
    #[arg(long)]
    skip_full_sync: bool,

    /// Catalog API base override
    #[arg(long)]
    api_base: Option<String>,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll raise or lower it after parsing the command line
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "srdsync", &mut std::io::stdout());
        return Ok(());
    }

    if let Some(cmd_log_level) = &cli.log_level {
        let log_level = match LogLevel::from(cmd_log_level.clone()) {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        };
        log::set_max_level(log_level);
    }

    let config = build_config(&cli);

    // If no level came from the command line, honor the configured one
    if cli.log_level.is_none() {
        let log_level = match config.log_level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        };
        log::set_max_level(log_level);
    }

    let controller = SyncController::with_config(config)?;
    if let Err(e) = controller.run().await {
        error!("Sync failed: {:#}", e);
        return Err(e);
    }

    Ok(())
}

/// Assemble the pipeline configuration from CLI flags, environment
/// variables and defaults
fn build_config(cli: &CommandLineOptions) -> Config {
    let mut config = Config::default();

    config.out_dir = cli.out_dir.clone();
    config.source_locale = cli.source_locale.clone();
    config.target_locales = cli.locales.clone();

    if let Some(api_base) = &cli.api_base {
        config.api_base = api_base.clone();
    }

    // DND_SKIP_FULL_SYNC=1 disables the snapshot stage, same as the flag
    let env_skip = std::env::var("DND_SKIP_FULL_SYNC")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    config.skip_full_sync = cli.skip_full_sync || env_skip;

    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }

    config.translation = TranslationConfig {
        provider: cli
            .provider
            .clone()
            .map(TranslationProvider::from)
            .unwrap_or_default(),
        endpoint: cli.endpoint.clone().unwrap_or_default(),
        api_key: cli.api_key.clone().unwrap_or_default(),
        email: cli.email.clone().unwrap_or_default(),
        throttle_ms: cli.throttle_ms.unwrap_or(40),
        max_chunk_len: config.translation.max_chunk_len,
    };

    config
}
