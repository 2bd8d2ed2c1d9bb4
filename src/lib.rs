/*!
 * # YALTwAI - Yet Another Localization Translator with AI
 *
 * A Rust library that translates app localization files with AI chat models.
 *
 * ## Features
 *
 * - Read and write the common app localization formats:
 *   - Apple `.strings` and Xcode string catalogs (`.xcstrings`)
 *   - Flutter ARB files (`.arb`)
 *   - Electron locale files (`.json`)
 * - Translate using DeepSeek or Google Gemini
 * - Batched requests with a fixed pause between them
 * - Failed languages are kept with empty values marked `needs_review`
 * - Catalog skeletons generated from Chinese-keyed JSON
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `formats`: Localization file formats:
 *   - `formats::strings`: `.strings` files
 *   - `formats::catalog`: string catalogs
 *   - `formats::arb`: ARB files
 *   - `formats::electron`: Electron locale files
 *   - `formats::json_tree`: classified JSON tree shared by the JSON formats
 *   - `formats::key_scan`: Han-character key scanner
 * - `translation`: AI-powered translation services:
 *   - `translation::core`: Prompting and reply validation
 *   - `translation::batch`: Sequential batch processing
 * - `providers`: Chat-completion back-ends:
 *   - `providers::deepseek`: DeepSeek API
 *   - `providers::gemini`: Gemini API
 *   - `providers::client`: HTTP client shared by both
 *   - `providers::mock`: In-process provider for tests
 * - `file_utils`: File system operations
 * - `app_controller`: Conversion pipeline
 * - `language_utils`: Language reference set and code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod formats;
pub mod language_utils;
pub mod providers;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{ConversionReport, ConversionRequest, Controller};
pub use errors::{AppError, FormatError, ProviderError};
pub use formats::{LocalizationFormat, Platform, TranslationState};
pub use language_utils::{get_language_name, language_codes_match, supported_languages};
pub use translation::{BatchTranslator, TranslationService};
