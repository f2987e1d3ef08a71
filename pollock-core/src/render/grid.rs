use crate::foundation::core::Size;

/// Distance in pixels between neighbouring sample points, on both axes.
pub const GRID_STEP: u32 = 5;

/// Sample coordinates in drawing order: columns outer, rows inner.
///
/// A size that is not a multiple of [`GRID_STEP`] leaves a partial final row/column.
pub fn grid_points(size: Size) -> impl Iterator<Item = (u32, u32)> {
    let step = GRID_STEP as usize;
    (0..size.width)
        .step_by(step)
        .flat_map(move |col| (0..size.height).step_by(step).map(move |row| (col, row)))
}

/// `ceil(width / step) * ceil(height / step)`.
pub fn grid_point_count(size: Size) -> u64 {
    u64::from(size.width.div_ceil(GRID_STEP)) * u64::from(size.height.div_ceil(GRID_STEP))
}

#[cfg(test)]
#[path = "../../tests/unit/render/grid.rs"]
mod tests;
