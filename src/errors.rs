/*!
 * Error types for the yaltwai application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when talking to a chat-completion provider
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// Missing or unusable configuration, detected before any request is sent
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The provider endpoint could not be turned into a URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Transport-level failure (DNS, TLS, timeout, connection reset)
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Non-success status, unparsable body, or a segment count mismatch
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// Request body could not be serialized
    #[error("JSON error: {0}")]
    JsonError(String),

    /// Business error reported by the provider itself
    #[error("API error: {0}")]
    ApiError(String),

    /// Provider reported a rate limit or exhausted quota
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Provider rejected the API key
    #[error("Invalid API key")]
    Unauthorized,
}

/// Errors raised while reading, walking or writing a localization document
#[derive(Error, Debug)]
pub enum FormatError {
    /// The input could not be parsed as the expected format
    #[error("Failed to parse {format} document: {message}")]
    Parse {
        /// Format name
        format: &'static str,
        /// Parser message
        message: String,
    },

    /// The document and the translations do not line up
    #[error("Document structure error: {0}")]
    Structure(String),

    /// The document could not be serialized
    #[error("Failed to serialize document: {0}")]
    Serialize(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Input extension is not one of the supported localization formats
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Input extension does not belong to the selected platform
    #[error("{platform} does not accept .{extension} files")]
    PlatformMismatch {
        /// Selected platform
        platform: String,
        /// Extension of the input file
        extension: String,
    },

    /// An output artifact already exists and overwriting was not requested
    #[error("Output already exists: {0} (use -f to overwrite)")]
    OutputExists(String),

    /// Configuration problem
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from a format adapter
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// Translation into one language failed
    #[error("Translation into {language} failed: {source}")]
    Translation {
        /// Target language
        language: String,
        /// Underlying provider error
        source: ProviderError,
    },

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<serde_json::Error> for FormatError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialize(error.to_string())
    }
}
