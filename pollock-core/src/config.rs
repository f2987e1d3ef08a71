use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::foundation::core::{MAX_SURFACE_EDGE, Rgba8};
use crate::foundation::error::{PollockError, PollockResult};

/// One mebibyte, the size cap of the strict variant.
pub const DEFAULT_MAX_FILE_BYTES: u64 = 1024 * 1024;
/// Longer-edge bound applied during normalization.
pub const DEFAULT_MAX_EDGE: u32 = 600;
/// Quality used when re-encoding the normalized image (canvas `toDataURL` default).
pub const DEFAULT_JPEG_QUALITY: u8 = 92;
/// File name of the downloaded artwork.
pub const DEFAULT_EXPORT_FILENAME: &str = "pollock.png";

/// Which file types the picker accepts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcceptPolicy {
    /// `.jpg`/`.png` only (by MIME type or file extension).
    #[default]
    RasterExtensions,
    /// Any MIME type matching `image/*`.
    AnyImage,
}

impl AcceptPolicy {
    /// Text completing "Please choose ..." in rejection messages.
    pub fn describe(self) -> &'static str {
        match self {
            Self::RasterExtensions => "a .jpg or .png image",
            Self::AnyImage => "an image file",
        }
    }
}

/// Validation and normalization rules applied to a selected file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IngestPolicy {
    /// File types the picker accepts.
    pub accept: AcceptPolicy,
    /// Files whose size, as a fraction of this cap rounded to four decimals, reaches 1
    /// are rejected; `None` disables the cap.
    pub max_file_bytes: Option<u64>,
    /// Longer-edge bound for the normalized image.
    pub max_edge: u32,
    /// JPEG quality of the re-encoded image, `1..=100`.
    pub jpeg_quality: u8,
}

impl Default for IngestPolicy {
    fn default() -> Self {
        Self {
            accept: AcceptPolicy::RasterExtensions,
            max_file_bytes: Some(DEFAULT_MAX_FILE_BYTES),
            max_edge: DEFAULT_MAX_EDGE,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// Settings for the generative renderer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSettings {
    /// Color the surface is cleared to before any mark is drawn.
    pub background: Rgba8,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            background: Rgba8::WHITE,
        }
    }
}

/// Whether and under which name the drawing can be downloaded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportPolicy {
    /// `false` makes every export fail with `ExportUnavailable`.
    pub enabled: bool,
    /// Bare file name of the PNG.
    pub filename: String,
}

impl Default for ExportPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            filename: DEFAULT_EXPORT_FILENAME.to_owned(),
        }
    }
}

/// Complete configuration of one Pollock session.
///
/// The two page variants differ in validation strictness and export support;
/// [`PollockConfig::strict`] and [`PollockConfig::lenient`] reproduce them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PollockConfig {
    /// Selection checks and normalization.
    pub ingest: IngestPolicy,
    /// Renderer settings.
    pub render: RenderSettings,
    /// Download settings.
    pub export: ExportPolicy,
}

impl PollockConfig {
    /// `.jpg`/`.png` only, 1 MiB cap, download enabled.
    pub fn strict() -> Self {
        Self::default()
    }

    /// Any `image/*` type, no size cap, no download.
    pub fn lenient() -> Self {
        Self {
            ingest: IngestPolicy {
                accept: AcceptPolicy::AnyImage,
                max_file_bytes: None,
                ..IngestPolicy::default()
            },
            render: RenderSettings::default(),
            export: ExportPolicy {
                enabled: false,
                ..ExportPolicy::default()
            },
        }
    }

    /// Parse a complete config; missing keys take their defaults.
    pub fn from_json_str(s: &str) -> PollockResult<Self> {
        let cfg: Self = serde_json::from_str(s).context("parse config JSON")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Apply a partial JSON document on top of `self`; keys absent from `s` keep their value.
    pub fn overlay_json_str(self, s: &str) -> PollockResult<Self> {
        fn merge(dst: &mut serde_json::Value, src: serde_json::Value) {
            match (dst, src) {
                (serde_json::Value::Object(d), serde_json::Value::Object(s)) => {
                    for (k, v) in s {
                        merge(d.entry(k).or_insert(serde_json::Value::Null), v);
                    }
                }
                (d, s) => *d = s,
            }
        }

        let mut value = serde_json::to_value(&self).context("serialize base config")?;
        let overlay: serde_json::Value = serde_json::from_str(s).context("parse config JSON")?;
        merge(&mut value, overlay);
        let cfg: Self = serde_json::from_value(value).context("apply config JSON")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// [`PollockConfig::overlay_json_str`] on the contents of `path`.
    pub fn overlay_json_file(self, path: &Path) -> PollockResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        self.overlay_json_str(&s)
    }

    /// Reject values no session can work with.
    pub fn validate(&self) -> PollockResult<()> {
        let ingest = &self.ingest;
        if ingest.max_edge == 0 {
            return Err(PollockError::validation("ingest.max_edge must be > 0"));
        }
        if ingest.max_edge > MAX_SURFACE_EDGE {
            return Err(PollockError::validation(format!(
                "ingest.max_edge must be <= {MAX_SURFACE_EDGE}, got {}",
                ingest.max_edge
            )));
        }
        if ingest.max_file_bytes == Some(0) {
            return Err(PollockError::validation(
                "ingest.max_file_bytes must be > 0 (use null to disable the cap)",
            ));
        }
        if !(1..=100).contains(&ingest.jpeg_quality) {
            return Err(PollockError::validation(format!(
                "ingest.jpeg_quality must be in 1..=100, got {}",
                ingest.jpeg_quality
            )));
        }
        let name = self.export.filename.trim();
        if name.is_empty() || name.contains(['/', '\\']) {
            return Err(PollockError::validation(format!(
                "export.filename must be a bare file name, got '{}'",
                self.export.filename
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
