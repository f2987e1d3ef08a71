use kurbo::{Circle, CubicBez, Shape};

use crate::foundation::core::{Affine, BezPath, Point, Vec2};
use crate::render::random::RandomSource;

const PATH_TOLERANCE: f64 = 0.1;

/// Everything needed to draw one grid mark, in local (translated + rotated) space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mark {
    /// Grid column in pixels (x of the mark's origin).
    pub col: u32,
    /// Grid row in pixels (y of the mark's origin).
    pub row: u32,
    /// Rotation applied after translating to the grid point, in degrees.
    pub angle_deg: f64,
    /// Diameter of the dot at the local origin.
    pub dot_weight: f64,
    /// Stroke width of the curve.
    pub curve_weight: f64,
    /// Catmull-Rom control points; the visible span runs `controls[1] -> controls[2]`.
    pub controls: [Point; 4],
}

impl Mark {
    /// Draw the random quantities of one mark, always in the same order:
    /// angle, dot weight, curve weight, then the six curve factors.
    pub fn generate<R: RandomSource + ?Sized>(col: u32, row: u32, rng: &mut R) -> Self {
        let angle_deg = rng.upto(360.0);
        let dot_weight = rng.upto(5.0);
        let curve_weight = rng.upto(3.0);

        let x = f64::from(col);
        let y = f64::from(row);
        let sx = x.sin();
        let cy_sx = y.cos() * sx;

        let p2 = Point::new(sx * rng.upto(60.0), cy_sx * rng.upto(90.0));
        let p3 = Point::new(rng.upto(10.0), rng.upto(80.0));
        let p4 = Point::new(cy_sx * rng.upto(100.0), cy_sx * rng.upto(50.0));

        Self {
            col,
            row,
            angle_deg,
            dot_weight,
            curve_weight,
            controls: [Point::new(x, y), p2, p3, p4],
        }
    }

    /// Translate to the grid point, then rotate. Built from identity for every mark.
    pub fn transform(&self) -> Affine {
        Affine::translate(Vec2::new(f64::from(self.col), f64::from(self.row)))
            * Affine::rotate(self.angle_deg.to_radians())
    }

    /// Filled circle in local space.
    pub fn dot_path(&self) -> BezPath {
        Circle::new(Point::ORIGIN, self.dot_weight / 2.0).to_path(PATH_TOLERANCE)
    }

    /// Stroked span in local space.
    pub fn curve_path(&self) -> BezPath {
        let [p0, p1, p2, p3] = self.controls;
        catmull_rom_segment(p0, p1, p2, p3).to_path(PATH_TOLERANCE)
    }
}

/// Cubic Bézier equivalent of the Catmull-Rom span `p1 -> p2` (tension 0).
pub fn catmull_rom_segment(p0: Point, p1: Point, p2: Point, p3: Point) -> CubicBez {
    let c1 = p1 + (p2 - p0) / 6.0;
    let c2 = p2 - (p3 - p1) / 6.0;
    CubicBez::new(p1, c1, c2, p2)
}

#[cfg(test)]
#[path = "../../tests/unit/render/geometry.rs"]
mod tests;
