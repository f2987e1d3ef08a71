/// Convenience result type used across Pollock.
pub type PollockResult<T> = Result<T, PollockError>;

/// Top-level error taxonomy used by ingestion, rendering and export.
#[derive(thiserror::Error, Debug)]
pub enum PollockError {
    /// The selected file's type does not match the accepted raster types.
    #[error("invalid file type: '{mime}' (expected {accepted})")]
    InvalidFileType {
        /// Declared MIME type (or file name when no type was declared).
        mime: String,
        /// Human description of what the accept policy allows.
        accepted: &'static str,
    },

    /// The selected file reaches the configured size cap (compared at four decimals).
    #[error("file too large: {size} bytes (limit {limit} bytes)")]
    FileTooLarge {
        /// Declared file size in bytes.
        size: u64,
        /// Configured cap in bytes.
        limit: u64,
    },

    /// Export was requested without a drawing surface, or export is disabled.
    #[error("export unavailable: {0}")]
    ExportUnavailable(String),

    /// File bytes could not be decoded into a raster.
    #[error("decode error: {0}")]
    Decode(String),

    /// Invalid configuration or dimensions.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PollockError {
    /// Build a [`PollockError::ExportUnavailable`] value.
    pub fn export_unavailable(msg: impl Into<String>) -> Self {
        Self::ExportUnavailable(msg.into())
    }

    /// Build a [`PollockError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`PollockError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Short text suitable for showing next to the file picker.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidFileType { accepted, .. } => format!("Please choose {accepted}"),
            Self::FileTooLarge { limit, .. } => {
                format!("Image must be smaller than {}", human_size(*limit))
            }
            Self::ExportUnavailable(_) => "Nothing to download yet".to_owned(),
            Self::Decode(_) => "That image could not be read".to_owned(),
            Self::Validation(msg) => msg.clone(),
            Self::Other(e) => e.to_string(),
        }
    }
}

fn human_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;
    if bytes >= MB && bytes % MB == 0 {
        format!("{}MB", bytes / MB)
    } else if bytes >= MB {
        format!("{:.1}MB", bytes as f64 / MB as f64)
    } else if bytes >= KB && bytes % KB == 0 {
        format!("{}KB", bytes / KB)
    } else {
        format!("{bytes} bytes")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
