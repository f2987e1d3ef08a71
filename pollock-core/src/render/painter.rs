use crate::config::RenderSettings;
use crate::foundation::core::{Affine, BezPath, Rgba8};
use crate::foundation::error::{PollockError, PollockResult};
use crate::ingest::normalize::NormalizedImage;
use crate::render::geometry::Mark;
use crate::render::grid::grid_points;
use crate::render::random::RandomSource;
use crate::render::surface::DrawingSurface;

/// Counters collected while drawing one surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Grid points visited (one mark each).
    pub grid_points: u64,
    /// Dots with a non-zero weight.
    pub dots: u64,
    /// Curves with a non-zero weight.
    pub curves: u64,
}

/// Draw the generative pattern for `image` onto a fresh surface of the same size.
///
/// This is the primary one-shot rendering API: there is no long-lived renderer, a
/// new image simply means calling `render` again.
pub fn render<R: RandomSource + ?Sized>(
    image: &NormalizedImage,
    settings: &RenderSettings,
    rng: &mut R,
) -> PollockResult<DrawingSurface> {
    render_with_stats(image, settings, rng).map(|(surface, _)| surface)
}

#[tracing::instrument(skip_all, fields(size = %image.size()))]
/// Like [`render`], also returning the counters of the pass.
pub fn render_with_stats<R: RandomSource + ?Sized>(
    image: &NormalizedImage,
    settings: &RenderSettings,
    rng: &mut R,
) -> PollockResult<(DrawingSurface, RenderStats)> {
    let (width, height) = preload(image)?;

    let mut ctx = vello_cpu::RenderContext::new(width, height);
    clear(&mut ctx, settings.background, width, height);

    let mut stats = RenderStats::default();
    for (col, row) in grid_points(image.size()) {
        let Some(sample) = image.sample(col, row) else {
            continue;
        };
        let mark = Mark::generate(col, row, rng);
        draw_mark(&mut ctx, &mark, sample.color, &mut stats);
        stats.grid_points += 1;
    }

    ctx.flush();
    let mut pixmap = vello_cpu::Pixmap::new(width, height);
    ctx.render_to_pixmap(&mut pixmap);
    tracing::debug!(
        grid_points = stats.grid_points,
        dots = stats.dots,
        curves = stats.curves,
        "render finished"
    );

    Ok((DrawingSurface::from_pixmap(pixmap), stats))
}

/// Check the image is addressable by the raster engine before any surface exists.
fn preload(image: &NormalizedImage) -> PollockResult<(u16, u16)> {
    let (pw, ph) = image.pixels().dimensions();
    if (pw, ph) != (image.width(), image.height()) {
        return Err(PollockError::validation(format!(
            "pixel buffer is {pw}x{ph} but image reports {}",
            image.size()
        )));
    }
    image.size().to_u16()
}

fn clear(ctx: &mut vello_cpu::RenderContext, bg: Rgba8, width: u16, height: u16) {
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(to_cpu_color(bg));
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        0.0,
        0.0,
        f64::from(width),
        f64::from(height),
    ));
}

fn draw_mark(
    ctx: &mut vello_cpu::RenderContext,
    mark: &Mark,
    color: Rgba8,
    stats: &mut RenderStats,
) {
    ctx.set_transform(affine_to_cpu(mark.transform()));
    ctx.set_paint(to_cpu_color(color));

    if mark.dot_weight > 0.0 {
        ctx.fill_path(&bezpath_to_cpu(&mark.dot_path()));
        stats.dots += 1;
    }

    if mark.curve_weight > 0.0 {
        ctx.set_stroke(
            vello_cpu::kurbo::Stroke::new(mark.curve_weight)
                .with_caps(vello_cpu::kurbo::Cap::Round),
        );
        ctx.stroke_path(&bezpath_to_cpu(&mark.curve_path()));
        stats.curves += 1;
    }
}

fn to_cpu_color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/painter.rs"]
mod tests;
