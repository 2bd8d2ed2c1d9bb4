use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::app_config::Config;
use crate::errors::{AppError, ProviderError};
use crate::file_utils::FileManager;
use crate::formats::arb::arb_path;
use crate::formats::electron::electron_path;
use crate::formats::key_scan::{collect_han_keys, render_key_list};
use crate::formats::strings::lproj_path;
use crate::formats::{
    ArbDocument, ElectronDocument, LocalizationFormat, Platform, StringCatalog, StringsDocument,
};
use crate::language_utils;
use crate::translation::batch::ProgressFn;
use crate::translation::{BatchTranslator, TranslationService};

// @module: Application controller for localization file conversion

/// Prefix of a summary whose every language succeeded
pub const SUCCESS_MARKER: &str = "✅";
/// Prefix of a summary with at least one failure
pub const FAILURE_MARKER: &str = "❌";

/// Name of the catalog written when the output is a directory
const CATALOG_FILE_NAME: &str = "Localizable.xcstrings";

/// One conversion: input file, where to write, which languages
#[derive(Debug, Clone, Default)]
pub struct ConversionRequest {
    /// Localization file to read
    pub input: PathBuf,
    /// Output directory, or catalog file for `.xcstrings` output
    pub output: PathBuf,
    /// Platform the input must belong to; falls back to the configured one
    pub platform: Option<Platform>,
    /// Target languages; falls back to the configured ones
    pub languages: Vec<String>,
    /// Output format when it differs from the input format
    pub output_format: Option<LocalizationFormat>,
    /// Replace existing output files
    pub force_overwrite: bool,
}

/// Outcome of a conversion
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversionReport {
    /// Files written
    pub outputs: Vec<PathBuf>,
    /// Languages translated (or copied) successfully
    pub succeeded: Vec<String>,
    /// Languages left for review, with the reason
    pub failed: Vec<(String, String)>,
}

impl ConversionReport {
    /// Whether every language succeeded
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Human readable result line, prefixed with the success or failure marker
    pub fn summary(&self) -> String {
        let files = self
            .outputs
            .iter()
            .map(|path| path.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");

        if self.is_success() {
            return format!(
                "{} Converted {} language(s): {} -> {}",
                SUCCESS_MARKER,
                self.succeeded.len(),
                self.succeeded.join(", "),
                files
            );
        }

        let reasons = self
            .failed
            .iter()
            .map(|(_, reason)| reason.clone())
            .collect::<Vec<_>>()
            .join("; ");
        format!(
            "{} {} of {} language(s) need review: {}. Written: {}",
            FAILURE_MARKER,
            self.failed.len(),
            self.failed.len() + self.succeeded.len(),
            reasons,
            files
        )
    }
}

/// Input document, parsed according to its format
enum SourceDocument {
    Strings(StringsDocument),
    Catalog(StringCatalog),
    Arb(ArbDocument),
    Electron(ElectronDocument),
}

impl SourceDocument {
    fn parse(format: LocalizationFormat, content: &str) -> Result<Self, AppError> {
        Ok(match format {
            LocalizationFormat::Strings => Self::Strings(StringsDocument::parse(content)?),
            LocalizationFormat::XcStrings => Self::Catalog(StringCatalog::parse(content)?),
            LocalizationFormat::Arb => Self::Arb(ArbDocument::parse(content)?),
            LocalizationFormat::Electron => Self::Electron(ElectronDocument::parse(content)?),
        })
    }

    fn extract(&self) -> Vec<String> {
        match self {
            Self::Strings(doc) => doc.extract(),
            Self::Catalog(catalog) => catalog.extract(),
            Self::Arb(doc) => doc.extract(),
            Self::Electron(doc) => doc.extract(),
        }
    }

    // The file's own declaration wins over the configured source language
    fn source_language(&self, configured: &str) -> String {
        match self {
            Self::Catalog(catalog) if !catalog.source_language.is_empty() => catalog.source_language.clone(),
            Self::Arb(doc) => doc.locale().unwrap_or(configured).to_string(),
            _ => configured.to_string(),
        }
    }
}

/// Main application controller for localization conversion
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Translator shared by every language
    translator: BatchTranslator,
    // @field: Draw progress bars on stderr
    show_progress: bool,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self, AppError> {
        let service = TranslationService::new(&config.translation)?;
        Ok(Self::with_translator(config, BatchTranslator::new(service)))
    }

    /// Create a controller over an existing translator
    pub fn with_translator(config: Config, translator: BatchTranslator) -> Self {
        Self {
            config,
            translator,
            show_progress: true,
        }
    }

    /// Disable progress bars
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Configuration in use
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run a conversion and fold any error into a failure summary
    pub async fn run(&self, request: &ConversionRequest) -> String {
        match self.process(request).await {
            Ok(report) => report.summary(),
            Err(e) => format!("{} {}", FAILURE_MARKER, e),
        }
    }

    /// Convert `request.input` into every requested language
    ///
    /// A language whose translation fails is written with empty values marked
    /// `needs_review` and the remaining languages carry on.
    pub async fn process(&self, request: &ConversionRequest) -> Result<ConversionReport, AppError> {
        let start_time = Instant::now();

        if !FileManager::file_exists(&request.input) {
            return Err(AppError::File(format!("Input file does not exist: {}", request.input.display())));
        }

        let input_format = LocalizationFormat::from_path(&request.input).ok_or_else(|| {
            AppError::UnsupportedFormat(
                request
                    .input
                    .extension()
                    .map(|ext| format!(".{}", ext.to_string_lossy()))
                    .unwrap_or_else(|| request.input.display().to_string()),
            )
        })?;

        if let Some(platform) = request.platform.or(self.config.platform) {
            if !platform.accepts(input_format.extension()) {
                return Err(AppError::PlatformMismatch {
                    platform: platform.to_string(),
                    extension: input_format.extension().to_string(),
                });
            }
        }

        let output_format = request.output_format.unwrap_or(input_format);
        let conversion_allowed = output_format == input_format
            || (input_format == LocalizationFormat::Strings && output_format == LocalizationFormat::XcStrings);
        if !conversion_allowed {
            return Err(AppError::UnsupportedFormat(format!(
                "cannot convert .{} to .{}",
                input_format.extension(),
                output_format.extension()
            )));
        }

        let languages = self.target_languages(request)?;
        let content = FileManager::read_to_string(&request.input).map_err(file_error)?;
        let document = SourceDocument::parse(input_format, &content)?;
        let source_language = document.source_language(&self.config.source_language);
        let document = match document {
            SourceDocument::Strings(doc) if output_format == LocalizationFormat::XcStrings => {
                SourceDocument::Catalog(StringCatalog::from_strings(&doc, &source_language))
            }
            other => other,
        };

        let planned = self.planned_outputs(&document, request, &languages);
        if !request.force_overwrite {
            let existing = FileManager::existing(&planned);
            if !existing.is_empty() {
                let names = existing.iter().map(|p| p.display().to_string()).collect::<Vec<_>>();
                return Err(AppError::OutputExists(names.join(", ")));
            }
        }

        let texts = document.extract();
        info!(
            "{}: {} translatable strings, source language {}, targets {}",
            request.input.display(),
            texts.len(),
            source_language,
            languages.join(", ")
        );

        let mut report = ConversionReport::default();
        let mut catalog = match &document {
            SourceDocument::Catalog(catalog) => Some(catalog.clone()),
            _ => None,
        };

        for language in &languages {
            let outcome = self.translate_language(&texts, language, &source_language).await;
            if let Err(e) = &outcome {
                warn!("{} will be marked needs_review: {}", language, e);
            }

            match &document {
                SourceDocument::Strings(doc) => {
                    let translated = match &outcome {
                        Ok(translations) => doc.assemble(translations)?,
                        Err(_) => doc.needs_review(),
                    };
                    let path = lproj_path(&request.output, language);
                    write_output(&path, &translated.render())?;
                    report.outputs.push(path);
                }
                SourceDocument::Catalog(_) => {
                    if let Some(current) = catalog.take() {
                        catalog = Some(match &outcome {
                            Ok(translations) => current.assemble(translations, language)?,
                            Err(_) => current.mark_needs_review(language),
                        });
                    }
                }
                SourceDocument::Arb(doc) => {
                    let translated = match &outcome {
                        Ok(translations) => doc.assemble(translations, language)?,
                        Err(_) => doc.needs_review(language),
                    };
                    let path = arb_path(&request.output, language);
                    write_output(&path, &translated.render()?)?;
                    report.outputs.push(path);
                }
                SourceDocument::Electron(doc) => {
                    let translated = match &outcome {
                        Ok(translations) => doc.assemble(translations)?,
                        Err(_) => doc.needs_review(),
                    };
                    let path = electron_path(&request.output, language);
                    write_output(&path, &translated.render()?)?;
                    report.outputs.push(path);
                }
            }

            match outcome {
                Ok(_) => report.succeeded.push(language.clone()),
                Err(source) => {
                    let failure = AppError::Translation { language: language.clone(), source };
                    report.failed.push((language.clone(), failure.to_string()));
                }
            }
        }

        if let Some(catalog) = catalog {
            let path = catalog_output_path(&request.output);
            write_output(&path, &catalog.render()?)?;
            report.outputs.push(path);
        }

        info!(
            "Conversion finished in {}: {} succeeded, {} need review",
            Self::format_duration(start_time.elapsed()),
            report.succeeded.len(),
            report.failed.len()
        );
        Ok(report)
    }

    /// Collect the Han-character keys of a JSON file
    ///
    /// A `.txt` output receives one key per line; any other output gets a
    /// string catalog skeleton.
    pub fn scan_keys(&self, input: &Path, output: &Path, force_overwrite: bool) -> Result<usize, AppError> {
        let content = FileManager::read_to_string(input).map_err(file_error)?;
        let value: serde_json::Value = serde_json::from_str(&content).map_err(|e| {
            AppError::Format(crate::errors::FormatError::Parse { format: "json", message: e.to_string() })
        })?;

        let keys = collect_han_keys(&value);
        let as_list = output
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));
        let path = if as_list { output.to_path_buf() } else { catalog_output_path(output) };
        if path.exists() && !force_overwrite {
            return Err(AppError::OutputExists(path.display().to_string()));
        }

        let rendered = if as_list {
            render_key_list(&keys)
        } else {
            StringCatalog::skeleton(keys.iter().cloned(), &self.config.source_language).render()?
        };
        write_output(&path, &rendered)?;
        info!("Wrote {} keys to {}", keys.len(), path.display());
        Ok(keys.len())
    }

    /// Send a minimal request to the configured provider
    pub async fn check_connection(&self) -> Result<(), AppError> {
        self.translator.service().test_connection().await?;
        Ok(())
    }

    fn target_languages(&self, request: &ConversionRequest) -> Result<Vec<String>, AppError> {
        let requested = if request.languages.is_empty() {
            &self.config.target_languages
        } else {
            &request.languages
        };

        let mut languages: Vec<String> = Vec::new();
        for language in requested {
            let language = language.trim();
            if language.is_empty() {
                continue;
            }
            language_utils::validate_language_code(language)
                .map_err(|e| AppError::Config(e.to_string()))?;
            if !languages.iter().any(|known| language_utils::language_codes_match(known, language)) {
                languages.push(language.to_string());
            }
        }

        if languages.is_empty() {
            return Err(AppError::Config("No target languages given".to_string()));
        }
        Ok(languages)
    }

    fn planned_outputs(&self, document: &SourceDocument, request: &ConversionRequest, languages: &[String]) -> Vec<PathBuf> {
        match document {
            SourceDocument::Catalog(_) => vec![catalog_output_path(&request.output)],
            SourceDocument::Strings(_) => languages.iter().map(|l| lproj_path(&request.output, l)).collect(),
            SourceDocument::Arb(_) => languages.iter().map(|l| arb_path(&request.output, l)).collect(),
            SourceDocument::Electron(_) => languages.iter().map(|l| electron_path(&request.output, l)).collect(),
        }
    }

    async fn translate_language(
        &self,
        texts: &[String],
        language: &str,
        source_language: &str,
    ) -> Result<Vec<String>, ProviderError> {
        if language_utils::language_codes_match(language, source_language) {
            debug!("{} is the source language, copying values", language);
            return Ok(texts.to_vec());
        }

        let progress_bar = self.progress_bar(language);
        let pb = progress_bar.clone();
        let on_progress = move |fraction: f64| pb.set_position((fraction * 100.0).round() as u64);
        let callback: ProgressFn<'_> = &on_progress;

        let result = self.translator.translate_all(texts, language, Some(callback)).await;
        progress_bar.finish_and_clear();

        if result.is_ok() {
            info!("Translated {} strings into {}", texts.len(), language);
        }
        result
    }

    fn progress_bar(&self, language: &str) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let progress_bar = ProgressBar::new(100);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {percent}% {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));
        progress_bar.set_message(language.to_string());
        progress_bar
    }

    // Format duration in a human-readable format
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;

        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}

/// Catalog file for an output argument: the path itself when it names a catalog
pub fn catalog_output_path(output: &Path) -> PathBuf {
    match LocalizationFormat::from_path(output) {
        Some(LocalizationFormat::XcStrings) => output.to_path_buf(),
        _ => output.join(CATALOG_FILE_NAME),
    }
}

fn write_output(path: &Path, content: &str) -> Result<(), AppError> {
    FileManager::write_atomic(path, content).map_err(file_error)?;
    info!("Success: {}", path.display());
    Ok(())
}

fn file_error(error: anyhow::Error) -> AppError {
    AppError::File(format!("{:#}", error))
}
