pub(crate) mod geometry;
pub(crate) mod grid;
pub(crate) mod painter;
pub(crate) mod random;
pub(crate) mod surface;
