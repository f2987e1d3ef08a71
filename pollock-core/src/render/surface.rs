use image::RgbaImage;

use crate::foundation::core::{Rgba8, Size};

/// The raster a render pass draws into.
///
/// Sized once from the normalized image and never resized; pixels are stored
/// premultiplied, as `vello_cpu` produces them.
pub struct DrawingSurface {
    pixmap: vello_cpu::Pixmap,
}

impl DrawingSurface {
    pub(crate) fn from_pixmap(pixmap: vello_cpu::Pixmap) -> Self {
        Self { pixmap }
    }

    /// Surface dimensions; equal to the image it was drawn from.
    pub fn size(&self) -> Size {
        Size {
            width: self.width(),
            height: self.height(),
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        u32::from(self.pixmap.width())
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        u32::from(self.pixmap.height())
    }

    /// Straight-alpha color at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let i = ((y as usize) * (self.width() as usize) + (x as usize)) * 4;
        let px = &self.pixmap.data_as_u8_slice()[i..i + 4];
        Some(Rgba8::from_array(unpremultiply([px[0], px[1], px[2], px[3]])))
    }

    /// Straight-alpha copy of the surface, ready for encoding.
    pub fn to_rgba_image(&self) -> RgbaImage {
        let mut data = self.pixmap.data_as_u8_slice().to_vec();
        for px in data.chunks_exact_mut(4) {
            let out = unpremultiply([px[0], px[1], px[2], px[3]]);
            px.copy_from_slice(&out);
        }
        // Buffer length is width * height * 4 by construction.
        RgbaImage::from_raw(self.width(), self.height(), data)
            .unwrap_or_else(|| RgbaImage::new(self.width(), self.height()))
    }
}

impl std::fmt::Debug for DrawingSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawingSurface")
            .field("size", &self.size())
            .finish_non_exhaustive()
    }
}

fn unpremultiply([r, g, b, a]: [u8; 4]) -> [u8; 4] {
    if a == 0 {
        return [0, 0, 0, 0];
    }
    if a == 255 {
        return [r, g, b, a];
    }
    let a16 = u16::from(a);
    let un = |c: u8| -> u8 { ((u16::from(c) * 255 + a16 / 2) / a16).min(255) as u8 };
    [un(r), un(g), un(b), a]
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
