use std::path::Path;

use anyhow::Context;

use crate::config::{AcceptPolicy, IngestPolicy};
use crate::foundation::error::{PollockError, PollockResult};

const OCTET_STREAM: &str = "application/octet-stream";
const RASTER_MIME_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png"];
const RASTER_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// What the file picker reports about a file before any bytes are read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedFile {
    /// File name as shown by the picker.
    pub name: String,
    /// Declared MIME type; empty when the platform could not tell.
    pub mime: String,
    /// Declared size in bytes.
    pub size: u64,
}

impl SelectedFile {
    /// Metadata as reported by a picker.
    pub fn new(name: impl Into<String>, mime: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            size,
        }
    }

    /// Describe a file on disk, guessing its MIME type from the extension.
    pub fn from_path(path: &Path) -> PollockResult<Self> {
        let meta = std::fs::metadata(path)
            .with_context(|| format!("stat input '{}'", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self {
            name,
            mime: guess_mime(path).to_owned(),
            size: meta.len(),
        })
    }

    fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
    }

    fn mime_lower(&self) -> String {
        self.mime.trim().to_ascii_lowercase()
    }
}

/// Raw file bytes plus their declared type, consumed by decoding.
#[derive(Clone, Debug)]
pub struct SourceImage {
    /// Encoded file contents.
    pub bytes: Vec<u8>,
    /// MIME type carried over from the selection.
    pub mime: String,
}

impl SourceImage {
    /// Wrap bytes read for a selection.
    pub fn new(bytes: Vec<u8>, mime: impl Into<String>) -> Self {
        Self {
            bytes,
            mime: mime.into(),
        }
    }
}

/// Check a selection against the accept policy and size cap, in that order.
pub fn validate_selection(file: &SelectedFile, policy: &IngestPolicy) -> PollockResult<()> {
    if !type_accepted(file, policy.accept) {
        let mime = if file.mime.trim().is_empty() {
            file.name.clone()
        } else {
            file.mime.clone()
        };
        return Err(PollockError::InvalidFileType {
            mime,
            accepted: policy.accept.describe(),
        });
    }
    if let Some(limit) = policy.max_file_bytes
        && exceeds_cap(file.size, limit)
    {
        return Err(PollockError::FileTooLarge {
            size: file.size,
            limit,
        });
    }
    Ok(())
}

/// True when `size / limit`, rounded to four decimals, reaches 1.
///
/// Sizes within 0.00005 of the cap already count as over it: with a 1 MiB cap,
/// 1_048_524 bytes shows as "1.0000 MB" and is rejected.
fn exceeds_cap(size: u64, limit: u64) -> bool {
    u128::from(size) * 20_000 >= u128::from(limit) * 19_999
}

fn type_accepted(file: &SelectedFile, accept: AcceptPolicy) -> bool {
    let mime = file.mime_lower();
    match accept {
        AcceptPolicy::RasterExtensions => {
            RASTER_MIME_TYPES.contains(&mime.as_str())
                || file
                    .extension()
                    .is_some_and(|ext| RASTER_EXTENSIONS.contains(&ext.as_str()))
        }
        AcceptPolicy::AnyImage => mime
            .strip_prefix("image/")
            .is_some_and(|subtype| !subtype.is_empty()),
    }
}

fn guess_mime(path: &Path) -> &'static str {
    image::ImageFormat::from_path(path)
        .map(|f| f.to_mime_type())
        .unwrap_or(OCTET_STREAM)
}

#[cfg(test)]
#[path = "../../tests/unit/ingest/source.rs"]
mod tests;
