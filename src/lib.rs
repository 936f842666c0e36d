//! Anti-aliased scanline coverage rasterizer
//!
//! Turns vector outlines into runs of per pixel coverage. Output is a
//! stream of horizontal spans, each carrying one coverage byte, handed to
//! a callback; blending them into pixels is up to the caller.
//!
//! # How does this work
//!
//! ```text
//!     path  = Path()              -- f64 user space
//!     outline = Outline::from_path(path, matrix)
//!                                 -- 26.6 fixed point, tagged points
//!     render(outline, params, callback)
//!       validate()                -- contours, tags, flags, clip box
//!       pixel_bounds() ∩ clip     -- cells outside are dropped
//!       decompose()               -- move / line / conic / cubic
//!         render_conic()
//!         render_cubic()          -- flatten into chords
//!           render_line()         -- walk rows
//!             render_scanline()   -- walk columns
//!               set_cell()
//!                 record_cell()   -- area and cover per pixel
//!       sweep()                   -- rows of cells into spans
//!         hline()                 -- fill rule, merge, batch
//!           callback(&[Span])
//! ```
//!
//! Coordinates inside the rasterizer use 8 fractional bits, see [`math`].

pub mod math;
pub mod error;
pub mod clip;
pub mod matrix;
pub mod path;
pub mod outline;
pub mod decompose;
pub mod curve;
pub mod cell;
pub mod raster;
pub mod scan;
pub mod render;
pub mod rle;
pub mod buffer;
#[cfg(feature = "freetype")]
pub mod ft;

pub use crate::error::*;
pub use crate::clip::*;
pub use crate::matrix::*;
pub use crate::path::*;
pub use crate::outline::*;
pub use crate::decompose::*;
pub use crate::curve::LineSink;
pub use crate::cell::*;
pub use crate::raster::*;
pub use crate::scan::*;
pub use crate::render::*;
pub use crate::rle::*;
pub use crate::buffer::*;
