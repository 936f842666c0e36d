//! Coverage mask buffer

use crate::error::Result;
use crate::scan::Span;

use std::ops::{Index, IndexMut};
use std::path::Path;

use log::debug;

/// Single channel 8 bit mask
///
/// Data is stored as row-major order (C-format)
#[derive(Debug, Default, Clone, PartialEq)]
pub struct GrayBuffer {
    /// Coverage values, one byte per pixel
    pub data: Vec<u8>,
    /// Width in pixels
    pub width: usize,
    /// Height in pixels
    pub height: usize,
}

impl GrayBuffer {
    /// Create a new, empty mask of `width` x `height`
    pub fn new(width: usize, height: usize) -> Self {
        GrayBuffer { width, height, data: vec![0u8; width * height] }
    }
    /// Size of the underlying data
    pub fn len(&self) -> usize {
        self.data.len()
    }
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
    /// Pixels of row `y`
    pub fn row(&self, y: usize) -> &[u8] {
        let i = y * self.width;
        &self.data[i..i + self.width]
    }
    /// Reset every pixel to zero coverage
    pub fn clear(&mut self) {
        self.data.iter_mut().for_each(|v| *v = 0);
    }

    /// Add the coverage of `spans`, saturating at 255
    ///
    /// Parts of spans outside the mask are ignored.
    ///
    ///     use grayscan::{GrayBuffer, Span};
    ///     let mut m = GrayBuffer::new(4, 1);
    ///     m.blend_spans(&[Span::new(-1, 3, 0, 200), Span::new(1, 9, 0, 100)]);
    ///     assert_eq!(m.row(0), &[200, 255, 100, 100]);
    ///
    pub fn blend_spans(&mut self, spans: &[Span]) {
        for s in spans {
            if s.y < 0 || s.y >= self.height as i64 {
                continue;
            }
            let x0 = s.x.max(0);
            let x1 = s.end().min(self.width as i64);
            if x0 >= x1 {
                continue;
            }
            let row = s.y as usize * self.width;
            for v in &mut self.data[row + x0 as usize..row + x1 as usize] {
                *v = v.saturating_add(s.coverage);
            }
        }
    }

    /// Write the mask as a grayscale image, format taken from the extension
    pub fn to_file<P: AsRef<Path>>(&self, filename: P) -> Result<()> {
        image::save_buffer(filename, &self.data, self.width as u32, self.height as u32,
                           image::ColorType::L8)?;
        Ok(())
    }
    /// Read an image as a mask, converting it to 8 bit grayscale
    pub fn from_file<P: AsRef<Path>>(filename: P) -> Result<Self> {
        let img = image::open(filename)?.to_luma8();
        let (w, h) = img.dimensions();
        Ok(GrayBuffer { width: w as usize, height: h as usize, data: img.into_raw() })
    }
}

impl Index<(usize, usize)> for GrayBuffer {
    type Output = u8;
    fn index(&self, index: (usize, usize)) -> &u8 {
        assert!(index.0 < self.width, "request {} >= {} width :: index", index.0, self.width);
        assert!(index.1 < self.height, "request {} >= {} height :: index", index.1, self.height);
        &self.data[index.1 * self.width + index.0]
    }
}
impl IndexMut<(usize, usize)> for GrayBuffer {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut u8 {
        assert!(index.0 < self.width, "request {} >= {} width :: index_mut", index.0, self.width);
        assert!(index.1 < self.height, "request {} >= {} height :: index_mut", index.1, self.height);
        &mut self.data[index.1 * self.width + index.0]
    }
}

/// Compare two mask images pixel by pixel
///
/// Differences are logged at debug level.
pub fn img_diff<P: AsRef<Path>>(f1: P, f2: P) -> Result<bool> {
    let a = GrayBuffer::from_file(f1)?;
    let b = GrayBuffer::from_file(f2)?;
    if a.width != b.width || a.height != b.height {
        debug!("size differs: {}x{} vs {}x{}", a.width, a.height, b.width, b.height);
        return Ok(false);
    }
    let mut same = true;
    for (i, (v1, v2)) in a.data.iter().zip(b.data.iter()).enumerate() {
        if v1 != v2 {
            debug!("[{},{}]: {} {}", i % a.width, i / a.width, v1, v2);
            same = false;
        }
    }
    Ok(same)
}
