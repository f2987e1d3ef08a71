//! Pollock turns a photo into generative stroke art.
//!
//! The pipeline is three steps, threaded by value:
//!
//! 1. **Ingest**: `SelectedFile` metadata is validated (type, size), the bytes are decoded and
//!    the image is shrunk to a bounded edge and re-encoded (`NormalizedImage`).
//! 2. **Render**: `render(NormalizedImage, RandomSource) -> DrawingSurface` walks a 5px grid,
//!    samples the image color and draws a rotated dot plus a random curve per grid point.
//! 3. **Export**: the surface is encoded as PNG (`ExportArtifact`, `pollock.png`).
//!
//! [`Session`] wraps the pipeline in the `Empty -> Loading -> Ready -> Empty` lifecycle of the
//! upload page, including stale-load handling and user-facing error messages.
//!
//! Randomness always flows through [`RandomSource`], so a seeded source reproduces a render.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod export;
mod foundation;
mod ingest;
mod render;
mod session;

pub use config::{
    AcceptPolicy, DEFAULT_EXPORT_FILENAME, DEFAULT_JPEG_QUALITY, DEFAULT_MAX_EDGE,
    DEFAULT_MAX_FILE_BYTES, ExportPolicy, IngestPolicy, PollockConfig, RenderSettings,
};
pub use export::png::{ExportArtifact, PNG_MIME, export_png};
pub use foundation::core::{MAX_SURFACE_EDGE, Rgba8, Size};
pub use foundation::error::{PollockError, PollockResult};
pub use ingest::normalize::{NormalizedImage, PixelSample, decode_source, ingest, normalize};
pub use ingest::source::{SelectedFile, SourceImage, validate_selection};
pub use render::geometry::{Mark, catmull_rom_segment};
pub use render::grid::{GRID_STEP, grid_point_count, grid_points};
pub use render::painter::{RenderStats, render, render_with_stats};
pub use render::random::{RandomSource, RngSource};
pub use render::surface::DrawingSurface;
pub use session::machine::{LoadOutcome, LoadTicket, Phase, Session};
