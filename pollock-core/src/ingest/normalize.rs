use anyhow::Context;
use base64::{Engine as _, engine::general_purpose};
use image::{ExtendedColorType, ImageEncoder, RgbImage, RgbaImage, imageops::FilterType};

use crate::config::IngestPolicy;
use crate::foundation::core::{Rgba8, Size};
use crate::foundation::error::{PollockError, PollockResult};
use crate::ingest::source::SourceImage;

/// A color read from the normalized image at an integer coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelSample {
    /// Column in the normalized image.
    pub x: u32,
    /// Row in the normalized image.
    pub y: u32,
    /// Straight-alpha color at `(x, y)`.
    pub color: Rgba8,
}

/// Decoded, size-bounded image: the only input the renderer accepts.
///
/// Holds straight RGBA8 pixels for sampling and the lossy re-encoding used as
/// the image's portable form (see [`NormalizedImage::to_data_url`]).
#[derive(Clone, Debug)]
pub struct NormalizedImage {
    size: Size,
    pixels: RgbaImage,
    jpeg: Vec<u8>,
}

impl NormalizedImage {
    /// Dimensions after normalization.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.size.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.size.height
    }

    /// Straight RGBA8 pixels the renderer samples from.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Read the color at `(x, y)`, or `None` outside the image.
    pub fn sample(&self, x: u32, y: u32) -> Option<PixelSample> {
        let px = self.pixels.get_pixel_checked(x, y)?;
        Some(PixelSample {
            x,
            y,
            color: Rgba8::from_array(px.0),
        })
    }

    /// JPEG bytes of the normalized image.
    pub fn encoded(&self) -> &[u8] {
        &self.jpeg
    }

    /// `data:image/jpeg;base64,...` form of [`NormalizedImage::encoded`].
    pub fn to_data_url(&self) -> String {
        format!(
            "data:image/jpeg;base64,{}",
            general_purpose::STANDARD.encode(&self.jpeg)
        )
    }
}

/// Decode, bound and re-encode a source image in one step.
#[tracing::instrument(skip(source, policy), fields(bytes = source.bytes.len(), mime = %source.mime))]
pub fn ingest(source: SourceImage, policy: &IngestPolicy) -> PollockResult<NormalizedImage> {
    let decoded = decode_source(&source)?;
    normalize(decoded, policy)
}

/// Decode encoded bytes into straight RGBA8 pixels.
pub fn decode_source(source: &SourceImage) -> PollockResult<RgbaImage> {
    if source.bytes.is_empty() {
        return Err(PollockError::decode("file is empty"));
    }
    let dyn_img = image::load_from_memory(&source.bytes)
        .map_err(|e| PollockError::decode(format!("'{}': {e}", source.mime)))?;
    Ok(dyn_img.to_rgba8())
}

/// Shrink `pixels` so its longer edge fits `policy.max_edge`, then re-encode.
pub fn normalize(pixels: RgbaImage, policy: &IngestPolicy) -> PollockResult<NormalizedImage> {
    let (w, h) = pixels.dimensions();
    let original = Size::new(w, h)?;
    let size = original.fit_within(policy.max_edge);

    let pixels = if size == original {
        pixels
    } else {
        image::imageops::resize(&pixels, size.width, size.height, FilterType::Triangle)
    };
    tracing::debug!(%original, normalized = %size, "normalized image");

    let jpeg = encode_jpeg(&pixels, policy.jpeg_quality)?;
    Ok(NormalizedImage { size, pixels, jpeg })
}

/// Flatten onto white (JPEG has no alpha) and encode.
fn encode_jpeg(pixels: &RgbaImage, quality: u8) -> PollockResult<Vec<u8>> {
    let flat = flatten_onto(pixels, Rgba8::WHITE);
    let mut buf = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, quality)
        .write_image(
            flat.as_raw(),
            flat.width(),
            flat.height(),
            ExtendedColorType::Rgb8,
        )
        .context("encode normalized image as jpeg")?;
    Ok(buf)
}

fn flatten_onto(pixels: &RgbaImage, bg: Rgba8) -> RgbImage {
    RgbImage::from_fn(pixels.width(), pixels.height(), |x, y| {
        let [r, g, b, a] = pixels.get_pixel(x, y).0;
        let a = u16::from(a);
        let over = |c: u8, under: u8| -> u8 {
            ((u16::from(c) * a + u16::from(under) * (255 - a) + 127) / 255) as u8
        };
        image::Rgb([over(r, bg.r), over(g, bg.g), over(b, bg.b)])
    })
}

#[cfg(test)]
#[path = "../../tests/unit/ingest/normalize.rs"]
mod tests;
