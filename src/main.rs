// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug, info};
use serde_json::{Map, Value};
use std::io::Write;

use dbintl::app_config::{self, Config};
use dbintl::{DatabaseConnection, Intl};

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

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the catalog tables in the configured database
    Init,

    /// Render a message template with params
    Translate {
        /// Message key (category)
        #[arg(value_name = "KEY")]
        key: String,

        /// Language tag (e.g. 'fr-FR', 'en')
        #[arg(value_name = "LANG")]
        lang: String,

        /// Template param as NAME=VALUE; numbers and booleans keep their type
        #[arg(short, long = "param", value_name = "NAME=VALUE")]
        params: Vec<String>,
    },

    /// Localize a pluralized message from its stored localize config
    Plurals {
        /// Message key (category)
        #[arg(value_name = "KEY")]
        key: String,

        /// Language tag (e.g. 'fr-FR', 'en')
        #[arg(value_name = "LANG")]
        lang: String,
    },

    /// Generate shell completions for dbintl
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// dbintl - Database-backed message translation
///
/// Looks up messages in a SQLite message catalog and renders them for a language.
#[derive(Parser, Debug)]
#[command(name = "dbintl")]
#[command(version = "0.1.0")]
#[command(about = "Database-backed message translation tool")]
#[command(long_about = "dbintl reads messages and their translations from a SQLite catalog and renders them.

EXAMPLES:
    dbintl init                                          # Create the catalog tables
    dbintl translate delivery fr-FR -p Date=demain -p Price=123
    dbintl plurals cart_items en                         # Localize a pluralized message
    dbintl --database other.db translate greeting de     # Use another catalog
    dbintl completions bash > dbintl.bash                # Generate bash completions

CONFIGURATION:
    Configuration is stored in intl.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "intl.json")]
    config: String,

    /// Catalog database path, overriding the config
    #[arg(short, long, global = true, env = "DBINTL_DATABASE")]
    database: Option<String>,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
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
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {:<5} {}\x1B[0m",
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
    // Initialize with the most verbose level the logger will ever need;
    // the effective level is set through log::set_max_level below
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match &cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(*shell, &mut cmd, "dbintl", &mut std::io::stdout());
        }
        Commands::Init => {
            let (config, intl) = open_translator(&cli)?;
            intl.repository().ensure_tables()?;
            info!("Catalog ready at '{}'", config.database_path);
        }
        Commands::Translate { key, lang, params } => {
            let params = parse_params(params)?;
            let (_, intl) = open_translator(&cli)?;
            let text = intl
                .translate_async(key, lang, &params)
                .await
                .with_context(|| format!("Failed to translate '{}' into '{}'", key, lang))?;
            println!("{}", text);
        }
        Commands::Plurals { key, lang } => {
            let (_, intl) = open_translator(&cli)?;
            let text = intl
                .translate_plurals_async(key, lang)
                .await
                .with_context(|| format!("Failed to localize '{}' into '{}'", key, lang))?;
            println!("{}", text);
        }
    }

    Ok(())
}

fn open_translator(cli: &CommandLineOptions) -> Result<(Config, Intl)> {
    let config = load_config(cli)?;
    log::set_max_level(config.log_level.to_level_filter());

    let db = DatabaseConnection::new(&config.database_path)?;
    let intl = Intl::from_config(db, &config).context("Failed to set up translator")?;
    Ok((config, intl))
}

fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let mut config = Config::load_or_create(&cli.config)?;

    // Override config with CLI options if provided
    if let Some(database) = &cli.database {
        config.database_path = database.clone();
    }

    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }

    config
        .validate()
        .context("Configuration validation failed")?;

    debug!("Using catalog '{}' with tables {:?}", config.database_path, config.tables);
    Ok(config)
}

// @returns: Template data built from NAME=VALUE pairs
fn parse_params(raw: &[String]) -> Result<Map<String, Value>> {
    let mut params = Map::new();

    for pair in raw {
        let (name, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("Invalid param '{}', expected NAME=VALUE", pair))?;

        if name.is_empty() {
            return Err(anyhow!("Invalid param '{}', name must not be empty", pair));
        }

        let value = match serde_json::from_str::<Value>(value) {
            Ok(parsed @ (Value::Number(_) | Value::Bool(_))) => parsed,
            _ => Value::String(value.to_string()),
        };

        params.insert(name.to_string(), value);
    }

    Ok(params)
}
