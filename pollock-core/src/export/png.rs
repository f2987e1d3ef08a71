use std::io::Cursor;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::{PollockError, PollockResult};
use crate::render::surface::DrawingSurface;

/// MIME type of every exported artwork.
pub const PNG_MIME: &str = "image/png";

/// An encoded snapshot of a drawing surface, created per download request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportArtifact {
    /// Download name, `pollock.png` unless configured otherwise.
    pub filename: String,
    /// Always [`PNG_MIME`].
    pub mime: &'static str,
    /// Encoded PNG data.
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    /// Write the artifact into `dir` under its file name, creating `dir` if needed.
    pub fn write_into(&self, dir: &Path) -> PollockResult<PathBuf> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create output dir '{}'", dir.display()))?;
        let path = dir.join(&self.filename);
        std::fs::write(&path, &self.bytes)
            .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(path)
    }
}

/// Encode the surface as PNG.
#[tracing::instrument(skip(surface), fields(size = %surface.size()))]
pub fn export_png(surface: &DrawingSurface, filename: &str) -> PollockResult<ExportArtifact> {
    if filename.trim().is_empty() {
        return Err(PollockError::export_unavailable("export file name is empty"));
    }
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(surface.to_rgba_image())
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .context("encode surface as png")?;
    tracing::info!(filename, bytes = bytes.len(), "exported drawing");
    Ok(ExportArtifact {
        filename: filename.to_owned(),
        mime: PNG_MIME,
        bytes,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/export/png.rs"]
mod tests;
