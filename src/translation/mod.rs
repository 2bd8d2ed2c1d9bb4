/*!
 * Translation of localization strings using AI providers.
 *
 * - `core`: prompt building and reply validation for one request
 * - `batch`: sequential chunking with pacing and progress reporting
 */

// Re-export main types for easier usage
pub use self::batch::{BatchTranslator, SEGMENT_DELIMITER};
pub use self::core::{TranslationOptions, TranslationService};
pub use crate::app_config::SegmentProtocol;

// Submodules
pub mod batch;
pub mod core;
