// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug};
use std::io::{Read, Write};
use std::path::PathBuf;

use termlock::app_config::{Config, LogLevel, SegmentationMode, TranslationProvider};
use termlock::app_controller::Controller;
use termlock::terminology::{ExportFormat, save_sample_terminology};

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    Google,
    Mock,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Google => TranslationProvider::Google,
            CliTranslationProvider::Mock => TranslationProvider::Mock,
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

/// CLI Wrapper for ExportFormat to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliExportFormat {
    Json,
    Csv,
}

impl From<CliExportFormat> for ExportFormat {
    fn from(format: CliExportFormat) -> Self {
        match format {
            CliExportFormat::Json => ExportFormat::Json,
            CliExportFormat::Csv => ExportFormat::Csv,
        }
    }
}

/// Options shared by every command that reads the configuration
#[derive(Args, Debug)]
struct ConfigArgs {
    /// Configuration file path
    #[arg(long = "config", default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Args, Debug)]
struct TranslateArgs {
    /// Text to translate (read from stdin when neither TEXT nor --file is given)
    #[arg(value_name = "TEXT", conflicts_with = "file")]
    text: Option<String>,

    /// Translate a file, one text per non-empty line
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Target language code (e.g., 'ak', 'twi', 'gaa')
    #[arg(short, long)]
    target: Option<String>,

    /// Source language code (default from config, 'en')
    #[arg(short, long)]
    source: Option<String>,

    /// Terminology CSV file
    #[arg(short = 'c', long = "terminology", value_name = "CSV")]
    terminology: Option<PathBuf>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Print preprocessed text, raw translation and replacement counts as JSON
    #[arg(long)]
    debug: bool,

    /// Only print the translation
    #[arg(short, long)]
    quiet: bool,

    /// Match single glossary words instead of noun chunks
    #[arg(long)]
    words: bool,

    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate text while keeping glossary terms intact
    Translate(TranslateArgs),

    /// List the terms of a glossary
    Terms {
        /// Terminology CSV file (default from config)
        #[arg(short = 'c', long = "terminology", value_name = "CSV")]
        terminology: Option<PathBuf>,

        /// Print as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Export a glossary as JSON or CSV records
    Export {
        /// Terminology CSV file
        #[arg(short = 'c', long = "terminology", value_name = "CSV")]
        terminology: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: CliExportFormat,

        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Check that the configured translation service is reachable
    Check {
        /// Translation provider
        #[arg(long, value_enum)]
        provider: Option<CliTranslationProvider>,

        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Write a sample glossary to get started
    Sample {
        /// Destination file
        #[arg(default_value = "sample_terminology.csv")]
        path: PathBuf,
    },

    /// Generate shell completions for termlock
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Termlock - terminology-controlled machine translation
///
/// Protects glossary terms from being mistranslated by replacing them with
/// markers before translation and restoring the mandated translations after.
#[derive(Parser, Debug)]
#[command(name = "termlock")]
#[command(version)]
#[command(about = "Terminology-controlled machine translation")]
#[command(long_about = "Termlock keeps domain glossary terms intact through machine translation.

EXAMPLES:
    termlock translate \"I want to buy a house\" -t ak -c terms.csv
    termlock translate -f input.txt -t twi -c terms.csv -o output.txt
    termlock translate --debug \"The big house\" -t ak -c terms.csv
    termlock terms -c terms.csv --json
    termlock export -c terms.csv --format csv
    termlock check --provider google
    termlock sample my_terms.csv
    termlock completions bash > termlock.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.

TERMINOLOGY FILES:
    Comma, semicolon or tab separated, with a header row. The source column is
    one of text, english, source, term, word; the translation column one of
    text_translated, translation, target, translated. Otherwise the first two
    columns are used.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
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

    // @returns: Emoji and ANSI color for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌ ", "1;31"),
            Level::Warn => ("🚧 ", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("🔍 ", "1;36"),
            Level::Trace => ("📋 ", "1;35"),
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
            let (emoji, color) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", color, now, emoji, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logger accepts everything; the effective level is set with set_max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Translate(args) => run_translate(args).await,
        Commands::Terms {
            terminology,
            json,
            config,
        } => {
            let mut loaded = load_config(&config, false)?;
            if let Some(path) = terminology {
                loaded.terminology_path = Some(path.to_string_lossy().to_string());
            }
            let controller = Controller::with_config(loaded)?;
            let listing = controller.list_terms();

            if json {
                println!("{}", serde_json::to_string_pretty(&listing)?);
            } else {
                for term in &listing.terms {
                    println!("{}", term);
                }
                println!("\nTotal: {} terms", listing.term_count);
            }
            Ok(())
        }
        Commands::Export {
            terminology,
            format,
            config,
        } => {
            let mut loaded = load_config(&config, false)?;
            loaded.terminology_path = Some(terminology.to_string_lossy().to_string());
            let controller = Controller::with_config(loaded)?;
            println!("{}", controller.export_terms(format.into())?);
            Ok(())
        }
        Commands::Check { provider, config } => {
            let mut loaded = load_config(&config, false)?;
            if let Some(provider) = provider {
                loaded.provider.provider_type = provider.into();
            }
            let controller = Controller::with_config(loaded)?;
            controller.check_connection().await?;
            println!("Translation service is reachable");
            Ok(())
        }
        Commands::Sample { path } => {
            save_sample_terminology(&path)?;
            println!("Sample terminology written to {}", path.display());
            Ok(())
        }
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "termlock", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Load the configuration file and apply the log level
fn load_config(args: &ConfigArgs, quiet: bool) -> Result<Config> {
    let mut config = Config::load_or_create(&args.config_path)?;

    if let Some(log_level) = &args.log_level {
        config.log_level = log_level.clone().into();
    }

    let level = if quiet {
        LevelFilter::Error
    } else {
        config.log_level.to_level_filter()
    };
    log::set_max_level(level);

    Ok(config)
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    let mut config = load_config(&options.config, options.quiet)?;

    // Override config with CLI options if provided
    if let Some(source) = &options.source {
        config.source_language = source.clone();
    }
    if let Some(target) = &options.target {
        config.target_language = target.clone();
    }
    if let Some(path) = &options.terminology {
        config.terminology_path = Some(path.to_string_lossy().to_string());
    }
    if let Some(provider) = &options.provider {
        config.provider.provider_type = provider.clone().into();
    }
    if options.words {
        config.segmentation = SegmentationMode::Words;
    }

    let controller = Controller::with_config(config)?;
    debug!("Using provider {}", controller.config().provider.provider_type.display_name());

    let rendered = if let Some(file) = &options.file {
        let records = controller.translate_file(file, !options.quiet).await?;
        Controller::render_batch(&records, options.debug)?
    } else {
        let text = match &options.text {
            Some(text) => text.clone(),
            None => read_stdin()?,
        };
        if text.trim().is_empty() {
            return Err(anyhow!("No text provided"));
        }

        let result = controller.translate_text(&text).await?;
        controller.render_result(&result, options.debug)?
    };

    Controller::write_output(options.output.as_deref(), &rendered)
}

fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read text from stdin")?;
    Ok(buffer.trim().to_string())
}
