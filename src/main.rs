// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug, error, info};
use std::io::Write;
use std::path::PathBuf;

use yaltwai::app_config::{self, Config, TranslationProvider, default_config_path};
use yaltwai::app_controller::{ConversionRequest, Controller, FAILURE_MARKER, SUCCESS_MARKER};
use yaltwai::formats::{LocalizationFormat, Platform};
use yaltwai::language_utils;

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliTranslationProvider {
    #[value(name = "deepseek")]
    DeepSeek,
    Gemini,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::DeepSeek => TranslationProvider::DeepSeek,
            CliTranslationProvider::Gemini => TranslationProvider::Gemini,
        }
    }
}

/// CLI Wrapper for Platform to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliPlatform {
    Ios,
    Flutter,
    Electron,
}

impl From<CliPlatform> for Platform {
    fn from(cli_platform: CliPlatform) -> Self {
        match cli_platform {
            CliPlatform::Ios => Platform::Ios,
            CliPlatform::Flutter => Platform::Flutter,
            CliPlatform::Electron => Platform::Electron,
        }
    }
}

/// CLI Wrapper for the output format
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Strings,
    Xcstrings,
    Arb,
    Json,
}

impl From<CliOutputFormat> for LocalizationFormat {
    fn from(cli_format: CliOutputFormat) -> Self {
        match cli_format {
            CliOutputFormat::Strings => LocalizationFormat::Strings,
            CliOutputFormat::Xcstrings => LocalizationFormat::XcStrings,
            CliOutputFormat::Arb => LocalizationFormat::Arb,
            CliOutputFormat::Json => LocalizationFormat::Electron,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
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

/// Options shared by every command that talks to a provider
#[derive(Args, Debug, Clone, Default)]
struct ProviderArgs {
    /// Configuration file path (default: ./conf.json, else the user config directory)
    #[arg(short, long)]
    config_path: Option<PathBuf>,

    /// Translation provider to use
    #[arg(long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Model name to use for translation
    #[arg(short, long)]
    model: Option<String>,

    /// API key of the provider
    #[arg(long, env = "YALTWAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Args, Debug, Clone, Default)]
struct ConvertArgs {
    /// Localization file to translate (.strings, .xcstrings, .arb, .json)
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Output directory, or catalog file for .xcstrings output
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Target language codes, comma separated (e.g. 'fr,de,ja')
    #[arg(short, long, value_delimiter = ',')]
    languages: Vec<String>,

    /// Platform the input file belongs to
    #[arg(short, long, value_enum)]
    platform: Option<CliPlatform>,

    /// Source language code (e.g., 'en', 'zh-Hans')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Write a different format (only strings -> xcstrings is supported)
    #[arg(long = "to", value_enum)]
    output_format: Option<CliOutputFormat>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    #[command(flatten)]
    provider: ProviderArgs,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a localization file (default command)
    #[command(alias = "translate")]
    Convert(ConvertArgs),

    /// List the languages offered for translation
    Languages,

    /// Collect the Chinese-character keys of a JSON file into a string catalog or a `.txt` key list
    ScanKeys {
        /// JSON file to scan
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,

        /// Catalog file, directory, or `.txt` key list to write
        #[arg(short, long)]
        output: PathBuf,

        /// Source language of the keys
        #[arg(short, long, default_value = "zh-Hans")]
        source_language: String,

        /// Force overwrite of an existing output
        #[arg(short, long)]
        force_overwrite: bool,
    },

    /// Check that the configured provider answers
    Check(ProviderArgs),

    /// Generate shell completions for yaltwai
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// YALTwAI - Yet Another Localization Translator with AI
///
/// Translates iOS, Flutter and Electron localization files with AI providers
/// (DeepSeek, Gemini).
#[derive(Parser, Debug)]
#[command(name = "yaltwai")]
#[command(version)]
#[command(about = "AI-powered localization file translator")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "YALTwAI translates app localization files using AI providers.

EXAMPLES:
    yaltwai Localizable.strings -o Resources -l fr,de     # One fr.lproj/de.lproj per language
    yaltwai Localizable.xcstrings -o Localizable.xcstrings -l ja -f
    yaltwai app_en.arb -o lib/l10n -l es,pt-BR           # app_es.arb, app_pt-BR.arb
    yaltwai en.json -p electron -o locales -l ko          # locale-ko.json
    yaltwai Localizable.strings --to xcstrings -o Resources -l fr
    yaltwai scan-keys dump.json -o Localizable.xcstrings
    yaltwai check --provider gemini
    yaltwai completions bash > yaltwai.bash

CONFIGURATION:
    Configuration is read from ./conf.json, or from the user configuration
    directory when ./conf.json does not exist. A default file is created
    automatically. The API key may also come from YALTWAI_API_KEY.

SUPPORTED PROVIDERS:
    deepseek - DeepSeek Chat (default: deepseek-chat)
    gemini   - Google Gemini (default: gemini-1.5-flash)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    convert: ConvertArgs,
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

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌",
            Level::Warn => "🚧",
            Level::Info => " ",
            Level::Debug => "🔍",
            Level::Trace => "📋",
        }
    }

    // @returns: ANSI color for log level
    fn get_color_for_level(level: Level) -> &'static str {
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
        metadata.level() <= self.level.min(log::max_level())
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let level = record.level();
            let _ = writeln!(
                std::io::stderr(),
                "{}{} {} {}\x1B[0m",
                Self::get_color_for_level(level),
                now,
                Self::get_emoji_for_level(level),
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
    // Everything up to trace passes the logger; the max level decides
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    let succeeded = match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "yaltwai", &mut std::io::stdout());
            true
        }
        Some(Commands::Languages) => {
            print_languages();
            true
        }
        Some(Commands::ScanKeys { input_path, output, source_language, force_overwrite }) => {
            run_scan_keys(input_path, output, source_language, force_overwrite)?
        }
        Some(Commands::Check(args)) => run_check(args).await?,
        Some(Commands::Convert(args)) => run_convert(args).await?,
        None => run_convert(cli.convert).await?,
    };

    if !succeeded {
        std::process::exit(1);
    }
    Ok(())
}

/// Load the configuration and apply command line overrides
fn load_config(args: &ProviderArgs) -> Result<Config> {
    if let Some(level) = args.log_level {
        let level: app_config::LogLevel = level.into();
        log::set_max_level(level.to_level_filter());
    }

    let config_path = args.config_path.clone().unwrap_or_else(default_config_path);
    debug!("Using configuration file {}", config_path.display());
    let mut config = Config::load_or_create(&config_path)?;

    if let Some(provider) = args.provider {
        config.translation.provider = provider.into();
    }
    if let Some(model) = &args.model {
        config.set_model(model.clone());
    }
    if let Some(api_key) = &args.api_key {
        config.set_api_key(api_key.clone());
    }

    match args.log_level {
        Some(level) => config.log_level = level.into(),
        None => log::set_max_level(config.log_level.to_level_filter()),
    }

    Ok(config)
}

async fn run_convert(args: ConvertArgs) -> Result<bool> {
    let input = args.input_path.clone().ok_or_else(|| {
        anyhow!("INPUT_PATH is required (see yaltwai --help)")
    })?;

    let mut config = load_config(&args.provider)?;
    if let Some(source_language) = &args.source_language {
        config.source_language = source_language.clone();
    }
    if !args.languages.is_empty() {
        config.target_languages = args.languages.clone();
    }
    if let Some(platform) = args.platform {
        config.platform = Some(platform.into());
    }
    config.validate().context("Configuration validation failed")?;

    let output = match args.output.clone() {
        Some(output) => output,
        None => input
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".")),
    };

    let request = ConversionRequest {
        input,
        output,
        platform: config.platform,
        languages: config.target_languages.clone(),
        output_format: args.output_format.map(Into::into),
        force_overwrite: args.force_overwrite,
    };

    info!(
        "🚀 YALTwAI: {} - {}",
        config.translation.provider.display_name(),
        config.translation.get_model()
    );

    let controller = Controller::with_config(config)?;
    let summary = controller.run(&request).await;
    println!("{}", summary);

    Ok(summary.starts_with(SUCCESS_MARKER))
}

async fn run_check(args: ProviderArgs) -> Result<bool> {
    let config = load_config(&args)?;
    let name = config.translation.provider.description().to_string();
    let model = config.translation.get_model();
    let controller = Controller::with_config(config)?;

    match controller.check_connection().await {
        Ok(()) => {
            println!("{} {} ({}) is reachable", SUCCESS_MARKER, name, model);
            Ok(true)
        }
        Err(e) => {
            error!("Connection check failed: {}", e);
            println!("{} {} ({}): {}", FAILURE_MARKER, name, model, e);
            Ok(false)
        }
    }
}

fn run_scan_keys(input: PathBuf, output: PathBuf, source_language: String, force_overwrite: bool) -> Result<bool> {
    language_utils::validate_language_code(&source_language)
        .with_context(|| format!("Invalid source language: {}", source_language))?;

    let config = Config {
        source_language,
        ..Config::default()
    };
    let controller = Controller::with_config(config)?;

    match controller.scan_keys(&input, &output, force_overwrite) {
        Ok(count) => {
            println!("{} Collected {} keys from {}", SUCCESS_MARKER, count, input.display());
            Ok(true)
        }
        Err(e) => {
            println!("{} {}", FAILURE_MARKER, e);
            Ok(false)
        }
    }
}

fn print_languages() {
    println!("{:<8} {:<22} {}", "CODE", "NAME", "NATIVE NAME");
    for language in language_utils::supported_languages() {
        println!("{:<8} {:<22} {}", language.code, language.display_name, language.localized_name);
    }
}
