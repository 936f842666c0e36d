//! Render driver
//!
//! Validates the request, clips the outline's pixel bounds, then runs
//! decomposition, accumulation and the sweep. Spans reach the caller
//! through a callback, in ascending rows and left to right within a row.

use crate::cell::CellStore;
use crate::clip::{ClipBox, Rect};
use crate::decompose::decompose;
use crate::error::{RasterError, Result};
use crate::outline::Outline;
use crate::raster::Worker;
use crate::scan::{sweep, Span, SpanBuffer};

use bitflags::bitflags;
use log::debug;

bitflags! {
    /// Rendering mode
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RasterFlags: u32 {
        /// Anti-aliased coverage, required
        const AA = 1 << 0;
        /// Spans go straight to the callback, required
        const DIRECT = 1 << 1;
        /// Restrict output to `RasterParams::clip_box`
        const CLIP = 1 << 2;
    }
}

/// Render parameters
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RasterParams {
    pub flags: RasterFlags,
    /// Only used with [`RasterFlags::CLIP`]
    pub clip_box: ClipBox,
}

impl Default for RasterParams {
    fn default() -> Self {
        Self::new()
    }
}

impl RasterParams {
    /// Anti-aliased direct rendering without a clip box
    pub fn new() -> Self {
        Self { flags: RasterFlags::AA | RasterFlags::DIRECT, clip_box: ClipBox::unbounded() }
    }
    /// Anti-aliased direct rendering clipped to `clip_box`
    pub fn with_clip(clip_box: ClipBox) -> Self {
        let mut p = Self::new();
        p.clip(clip_box);
        p
    }
    /// Set the clip box
    pub fn clip(&mut self, clip_box: ClipBox) {
        self.clip_box = clip_box;
        self.flags |= RasterFlags::CLIP;
    }
    /// Box output is restricted to
    ///
    /// Without [`RasterFlags::CLIP`] this is the full coordinate range.
    pub fn effective_clip(&self) -> Result<ClipBox> {
        if self.flags.contains(RasterFlags::CLIP) {
            self.clip_box.validate()?;
            Ok(self.clip_box)
        } else {
            Ok(ClipBox::unbounded())
        }
    }
}

/// Scanline rasterizer
///
/// Keeps its cell storage between calls; no other state survives a call.
#[derive(Debug, Default)]
pub struct Rasterizer {
    cells: CellStore,
}

impl Rasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rasterize `outline`, passing batches of spans to `callback`
    ///
    /// Returns the bounding rectangle of all emitted spans, or a zero
    /// rectangle if nothing was covered. Errors are reported before any
    /// span is emitted. The outline is checked first, then the flags and
    /// the clip box, so a bad configuration fails even for an empty
    /// outline.
    pub fn render<F>(&mut self, outline: &Outline, params: &RasterParams, callback: F) -> Result<Rect>
        where F: FnMut(&[Span])
    {
        outline.validate()?;
        if !params.flags.contains(RasterFlags::AA | RasterFlags::DIRECT) {
            return Err(RasterError::InvalidMode);
        }
        let clip = params.effective_clip()?;

        if outline.n_points() == 0 {
            debug!("empty outline");
            return Ok(Rect::zero());
        }
        let cbox = outline.pixel_bounds();
        let bounds = match cbox.intersect(&clip) {
            Some(b) => b,
            None => {
                debug!("outline {:?} outside clip {:?}", cbox, clip);
                return Ok(Rect::zero());
            }
        };
        debug!("render {} points, {} contours, bounds {:?}",
               outline.n_points(), outline.n_contours(), bounds);

        let mut worker = Worker::new(&bounds, std::mem::take(&mut self.cells));
        let decomposed = decompose(outline, &mut worker);
        worker.finish();

        let result = decomposed.map(|()| {
            let mut out = SpanBuffer::new(bounds.x_min, bounds.y_min, outline.fill_rule, callback);
            sweep(worker.cells(), worker.count_ex, &mut out);
            out.flush();
            let rect = out.bounds();
            debug!("{} cells, {} spans in {} batches, rect {:?}",
                   worker.cells().num_cells(), out.emitted(), out.flushes(), rect);
            rect
        });
        self.cells = worker.into_cells();
        result
    }
}

/// Rasterize `outline` with a fresh [`Rasterizer`]
///
///     use grayscan::{render, Outline, RasterParams, Rect, Vector};
///
///     // 10 x 10 pixel square, outline units are 1/64 pixel
///     let mut square = Outline::new();
///     square.move_to(Vector::new(0, 0));
///     square.line_to(Vector::new(640, 0));
///     square.line_to(Vector::new(640, 640));
///     square.line_to(Vector::new(0, 640));
///     square.end_contour();
///
///     let mut total = 0;
///     let rect = render(&square, &RasterParams::new(), |spans| {
///         for s in spans {
///             total += s.len * s.coverage as i64;
///         }
///     }).unwrap();
///     assert_eq!(total, 255 * 100);
///     assert_eq!(rect, Rect::new(0, 0, 10, 10));
///
pub fn render<F>(outline: &Outline, params: &RasterParams, callback: F) -> Result<Rect>
    where F: FnMut(&[Span])
{
    Rasterizer::new().render(outline, params, callback)
}
