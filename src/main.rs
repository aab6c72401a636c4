// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::Path;

use crate::app_config::{Config, LanguageMissingPolicy};
use crate::caption_extractor::CaptionExtractor;

mod app_config;
mod caption_extractor;
mod caption_metadata;
mod errors;
mod fetcher;
mod language_utils;
mod service;
mod transcript_parser;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP extraction service (default command)
    Serve(ServeArgs),

    /// Extract one video's transcript and print it as JSON
    Extract(ExtractArgs),

    /// Generate shell completions for ytscribe
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ServeArgs {
    /// Address to bind the listener to
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct ExtractArgs {
    /// Video identifier to extract captions for
    #[arg(value_name = "VIDEO_ID")]
    video_id: String,

    /// Language code to select (e.g., 'en', 'es', 'fr')
    #[arg(short, long)]
    language: Option<String>,

    /// Fail with the available-language list instead of falling back
    /// when the requested language has no track
    #[arg(long, requires = "language")]
    strict_language: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// ytscribe - YouTube caption extraction service
///
/// Retrieves a video's subtitle/caption text as structured, time-coded
/// entries, either over HTTP or one-shot from the command line.
#[derive(Parser, Debug)]
#[command(name = "ytscribe")]
#[command(version = "1.0.0")]
#[command(about = "Caption/transcript extraction service")]
#[command(long_about = "ytscribe scrapes the caption track listing embedded in a video's watch page,
selects a track by language and returns the timed transcript as JSON.

EXAMPLES:
    ytscribe                                   # Serve HTTP on the configured address
    ytscribe serve -p 9000                     # Serve on another port
    ytscribe extract dQw4w9WgXcQ               # Print the default track's transcript
    ytscribe extract dQw4w9WgXcQ -l es         # Prefer the Spanish track
    ytscribe extract dQw4w9WgXcQ -l es --strict-language  # Fail listing languages instead of falling back
    ytscribe completions bash > ytscribe.bash  # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, built-in
    defaults are used.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
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
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)
        .context("Failed to initialize logger")?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "ytscribe", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Serve(args)) => run_serve(args).await,
        Some(Commands::Extract(args)) => run_extract(args).await,
        None => {
            // Default behavior - serve with the top-level options
            let serve_args = ServeArgs {
                host: None,
                port: None,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_serve(serve_args).await
        }
    }
}

/// Load the configuration file and apply shared CLI overrides
fn load_config(config_path: &str, log_level: &Option<CliLogLevel>) -> Result<Config> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter(&config_log_level));
    }

    let mut config = if Path::new(config_path).exists() {
        Config::from_file(config_path)?
    } else {
        warn!("Config file {} not found, using defaults", config_path);
        Config::default()
    };

    if let Some(cmd_log_level) = log_level {
        config.log_level = cmd_log_level.clone().into();
    }

    log::set_max_level(level_filter(&config.log_level));

    Ok(config)
}

async fn run_serve(options: ServeArgs) -> Result<()> {
    let mut config = load_config(&options.config_path, &options.log_level)?;

    // Override config with CLI options if provided
    if let Some(host) = options.host {
        config.server.host = host;
    }
    if let Some(port) = options.port {
        config.server.port = port;
    }

    config.validate()?;

    info!("ytscribe v{} starting", env!("CARGO_PKG_VERSION"));
    service::run_server(config).await
}

async fn run_extract(options: ExtractArgs) -> Result<()> {
    let mut config = load_config(&options.config_path, &options.log_level)?;

    if options.strict_language {
        config.extraction.on_language_missing = LanguageMissingPolicy::Report;
    }

    config.validate()?;

    let extractor = CaptionExtractor::new(config.extraction);
    let result = extractor
        .extract(&options.video_id, options.language.as_deref())
        .await;

    println!(
        "{}",
        serde_json::to_string_pretty(&result).context("Failed to serialize result")?
    );

    if !result.success {
        std::process::exit(1);
    }

    Ok(())
}
