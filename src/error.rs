//! # Error Handling
//!
//! Structured errors for rendering post sizes and writing them out.
//!
//! ## Architecture
//!
//! - **Error variants**: one per failure domain (configuration, crop core,
//!   decode, encode, archive, I/O), each carrying the fields a caller needs to
//!   report the problem without string parsing
//! - **Error context**: optional operation, free-form context and a recovery
//!   suggestion, attached with builder-style `with_*` methods
//! - **Categories**: a stable short string per variant for logs and exit codes
//!
//! Nothing in this crate is transient: every failure is a precondition
//! violation or a hard I/O/codec error, so there is no retry classification.
//!
//! ## Usage
//!
//! ```rust
//! use post_resizer::error::ResizeError;
//!
//! let error = ResizeError::config("targets", "[]", "at least one target is required")
//!     .with_context("loading render configuration")
//!     .with_recovery_suggestion("pass --preset or --target");
//!
//! assert_eq!(error.category(), "config");
//! assert_eq!(error.recovery_suggestion(), Some("pass --preset or --target"));
//! ```

use std::path::PathBuf;

use crop_scale::CropError;

/// Metadata about where an error happened.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The operation being performed when the error occurred
    pub operation: Option<String>,
    /// Additional context about the error
    pub context: Option<String>,
    /// Suggested recovery action
    pub recovery_suggestion: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_recovery_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.recovery_suggestion = Some(suggestion.into());
        self
    }
}

/// Base error type for the post resizer.
#[derive(Debug, thiserror::Error)]
pub enum ResizeError {
    /// Configuration validation errors
    #[error("configuration error in {field} (value: {value}): {reason}")]
    Config {
        field: String,
        value: String,
        reason: String,
        context: ErrorContext,
    },
    /// Caller precondition violations
    #[error("invalid argument {name}: {reason}")]
    InvalidArgument {
        name: String,
        reason: String,
        context: ErrorContext,
    },
    /// Two results would share one output label
    #[error("duplicate output label {label}")]
    DuplicateLabel {
        label: String,
        context: ErrorContext,
    },
    /// Smart crop failures for one target
    #[error("smart crop for {target} failed: {source}")]
    Crop {
        target: String,
        #[source]
        source: CropError,
        context: ErrorContext,
    },
    /// Source image could not be decoded
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
        context: ErrorContext,
    },
    /// Result image could not be encoded
    #[error("failed to encode {label}: {source}")]
    Encode {
        label: String,
        #[source]
        source: image::ImageError,
        context: ErrorContext,
    },
    /// ZIP container errors
    #[error("archive error at {entry}: {source}")]
    Archive {
        entry: String,
        #[source]
        source: zip::result::ZipError,
        context: ErrorContext,
    },
    /// I/O errors
    #[error("I/O error during {operation}{}: {source}", display_path(.path))]
    Io {
        operation: String,
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
        context: ErrorContext,
    },
}

impl ResizeError {
    /// Create a configuration error
    pub fn config(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Config {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
            context: ErrorContext::new(),
        }
    }

    /// Create an invalid-argument error
    pub fn invalid_argument(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            reason: reason.into(),
            context: ErrorContext::new(),
        }
    }

    pub fn duplicate_label(label: impl Into<String>) -> Self {
        Self::DuplicateLabel {
            label: label.into(),
            context: ErrorContext::new(),
        }
    }

    /// Wrap a crop core failure for the named target.
    ///
    /// Core precondition violations surface as [`ResizeError::InvalidArgument`].
    pub fn crop(target: impl Into<String>, source: CropError) -> Self {
        let target = target.into();
        match source {
            CropError::InvalidArgument { field, reason } => {
                Self::invalid_argument(field, reason).with_context(format!("target {target}"))
            }
            empty @ CropError::EmptyCrop { .. } => {
                Self::invalid_argument("source", empty.to_string())
                    .with_context(format!("target {target}"))
            }
            source => Self::Crop {
                target,
                source,
                context: ErrorContext::new(),
            },
        }
    }

    pub fn decode(path: impl Into<String>, source: image::ImageError) -> Self {
        Self::Decode {
            path: path.into(),
            source,
            context: ErrorContext::new(),
        }
    }

    pub fn encode(label: impl Into<String>, source: image::ImageError) -> Self {
        Self::Encode {
            label: label.into(),
            source,
            context: ErrorContext::new(),
        }
    }

    pub fn archive(entry: impl Into<String>, source: zip::result::ZipError) -> Self {
        Self::Archive {
            entry: entry.into(),
            source,
            context: ErrorContext::new(),
        }
    }

    /// Create an I/O error
    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            path: None,
            source,
            context: ErrorContext::new(),
        }
    }

    /// Attach the path an I/O error refers to; no-op for other variants.
    pub fn with_path(mut self, p: impl Into<PathBuf>) -> Self {
        if let Self::Io { path, .. } = &mut self {
            *path = Some(p.into());
        }
        self
    }

    /// Add context to the error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context_mut().context = Some(context.into());
        self
    }

    /// Add operation context
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.context_mut().operation = Some(operation.into());
        self
    }

    /// Add recovery suggestion
    pub fn with_recovery_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.context_mut().recovery_suggestion = Some(suggestion.into());
        self
    }

    pub fn recovery_suggestion(&self) -> Option<&str> {
        self.context().recovery_suggestion.as_deref()
    }

    /// Get the error context
    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::Config { context, .. } => context,
            Self::InvalidArgument { context, .. } => context,
            Self::DuplicateLabel { context, .. } => context,
            Self::Crop { context, .. } => context,
            Self::Decode { context, .. } => context,
            Self::Encode { context, .. } => context,
            Self::Archive { context, .. } => context,
            Self::Io { context, .. } => context,
        }
    }

    fn context_mut(&mut self) -> &mut ErrorContext {
        match self {
            Self::Config { context, .. } => context,
            Self::InvalidArgument { context, .. } => context,
            Self::DuplicateLabel { context, .. } => context,
            Self::Crop { context, .. } => context,
            Self::Decode { context, .. } => context,
            Self::Encode { context, .. } => context,
            Self::Archive { context, .. } => context,
            Self::Io { context, .. } => context,
        }
    }

    /// Stable category name for logging.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config { .. } => "config",
            Self::InvalidArgument { .. } => "invalid_argument",
            Self::DuplicateLabel { .. } => "duplicate_label",
            Self::Crop { .. } => "crop",
            Self::Decode { .. } => "decode",
            Self::Encode { .. } => "encode",
            Self::Archive { .. } => "archive",
            Self::Io { .. } => "io",
        }
    }
}

pub type ResizeResult<T> = Result<T, ResizeError>;

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" ({})", p.display()))
        .unwrap_or_default()
}

impl From<std::io::Error> for ResizeError {
    fn from(error: std::io::Error) -> Self {
        Self::io("unknown", error)
    }
}
