//! A mutable raster of colors sized for SIXEL output.
//!
//! The physical height is always a multiple of six so the buffer splits into
//! whole bands. Terminals often draw pixels that are not square; a
//! [`PixelRatioCorrection`] stretches one axis by an integer ratio so callers
//! can keep drawing in logical coordinates.

use std::collections::HashSet;
use std::ops::Range;

use log::trace;

use crate::color::Color;
use crate::constants::SIXEL_HEIGHT;
use crate::range::{check_bounds, Bound, Span, SpanRange};
use crate::{Result, SixelError};

/// Which axis, if any, is stretched by the pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PixelRatioCorrection {
    /// Coordinates are used as given.
    #[default]
    None,
    /// Width and every column coordinate are multiplied by the ratio.
    AdjustWidth,
    /// Height and every row coordinate are multiplied by the ratio.
    AdjustHeight,
}

/// A `height x width` grid of colors, stored row-major.
///
/// Reads and writes take logical coordinates, either a single index or a
/// [`SpanRange`] per axis. On a corrected axis a single index `i` is the one
/// physical pixel `i * ratio`, while a range `a..b` covers
/// `a * ratio..b * ratio`.
///
/// Drawing needs `&mut self`; share a buffer between threads only behind
/// a lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: Vec<Color>,
    height: usize,
    width: usize,
    logical_height: usize,
    logical_width: usize,
    correction: PixelRatioCorrection,
    ratio: usize,
}

impl PixelBuffer {
    /// Creates an all-black buffer.
    ///
    /// The corrected height is rounded up to the next multiple of six.
    /// Fails when a dimension is zero, when `ratio` is zero, or when the
    /// corrected size overflows.
    pub fn new(
        height: usize,
        width: usize,
        correction: PixelRatioCorrection,
        ratio: usize,
    ) -> Result<Self> {
        if height == 0 || width == 0 {
            return Err(SixelError::InvalidDimensions { height, width });
        }
        if ratio < 1 {
            return Err(SixelError::InvalidRatio(ratio));
        }

        let (corrected_height, corrected_width) = match correction {
            PixelRatioCorrection::None => (Some(height), Some(width)),
            PixelRatioCorrection::AdjustWidth => (Some(height), width.checked_mul(ratio)),
            PixelRatioCorrection::AdjustHeight => (height.checked_mul(ratio), Some(width)),
        };
        let physical_height = corrected_height
            .and_then(|h| h.checked_next_multiple_of(SIXEL_HEIGHT))
            .ok_or(SixelError::DimensionOverflow)?;
        let physical_width = corrected_width.ok_or(SixelError::DimensionOverflow)?;
        let len = physical_height
            .checked_mul(physical_width)
            .ok_or(SixelError::DimensionOverflow)?;

        Ok(Self {
            pixels: vec![Color::BLACK; len],
            height: physical_height,
            width: physical_width,
            logical_height: height,
            logical_width: width,
            correction,
            ratio,
        })
    }

    /// A buffer without pixel ratio correction.
    pub fn uncorrected(height: usize, width: usize) -> Result<Self> {
        Self::new(height, width, PixelRatioCorrection::None, 1)
    }

    /// A `size x size` buffer.
    pub fn square(size: usize, correction: PixelRatioCorrection, ratio: usize) -> Result<Self> {
        Self::new(size, size, correction, ratio)
    }

    /// Physical height in pixels, a multiple of six.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Physical width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// The height requested at construction.
    #[inline]
    pub fn logical_height(&self) -> usize {
        self.logical_height
    }

    /// The width requested at construction.
    #[inline]
    pub fn logical_width(&self) -> usize {
        self.logical_width
    }

    #[inline]
    pub fn correction(&self) -> PixelRatioCorrection {
        self.correction
    }

    #[inline]
    pub fn ratio(&self) -> usize {
        self.ratio
    }

    /// Number of six pixel bands.
    #[inline]
    pub fn bands(&self) -> usize {
        self.height / SIXEL_HEIGHT
    }

    /// Colors in the targeted rows and columns, row-major.
    pub fn get(
        &self,
        rows: impl Into<Span>,
        cols: impl Into<Span>,
    ) -> Result<Vec<Color>> {
        let (rows, cols) = self.locate(rows.into(), cols.into())?;
        let mut colors = Vec::with_capacity(rows.len() * cols.len());
        for y in rows {
            colors.extend_from_slice(&self.row(y)[cols.clone()]);
        }
        Ok(colors)
    }

    /// Color at a single logical coordinate.
    pub fn get_pixel(&self, row: usize, col: usize) -> Result<Color> {
        let (rows, cols) = self.locate(row.into(), col.into())?;
        Ok(self.pixels[rows.start * self.width + cols.start])
    }

    /// Paints every targeted pixel. Nothing is written unless both ranges
    /// are valid.
    pub fn set(
        &mut self,
        rows: impl Into<Span>,
        cols: impl Into<Span>,
        color: Color,
    ) -> Result<()> {
        let (rows, cols) = self.locate(rows.into(), cols.into())?;
        for y in rows {
            let offset = y * self.width;
            self.pixels[offset + cols.start..offset + cols.end].fill(color);
        }
        Ok(())
    }

    /// Paints a single logical coordinate.
    pub fn set_pixel(&mut self, row: usize, col: usize, color: Color) -> Result<()> {
        self.set(row, col, color)
    }

    /// Distinct colors in first-seen order, scanning rows top to bottom.
    pub fn unique_colors(&self) -> Vec<Color> {
        let mut seen = HashSet::new();
        self.pixels
            .iter()
            .copied()
            .filter(|color| seen.insert(*color))
            .collect()
    }

    /// Physical rows, top to bottom, without ratio correction.
    pub fn rows(&self) -> std::slice::ChunksExact<'_, Color> {
        self.pixels.chunks_exact(self.width)
    }

    /// One line per physical row: `0` for black, `1` for anything else.
    pub fn to_bitmap_string(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.rows() {
            out.extend(row.iter().map(|c| if c.is_black() { '0' } else { '1' }));
            out.push('\n');
        }
        out
    }

    #[inline]
    pub(crate) fn row(&self, y: usize) -> &[Color] {
        &self.pixels[y * self.width..(y + 1) * self.width]
    }

    /// Maps logical row/column spans to physical index ranges.
    fn locate(&self, rows: Span, cols: Span) -> Result<(Range<usize>, Range<usize>)> {
        let (row_start, row_end) = self.correct(
            rows,
            self.height,
            self.correction == PixelRatioCorrection::AdjustHeight,
        )?;
        let (col_start, col_end) = self.correct(
            cols,
            self.width,
            self.correction == PixelRatioCorrection::AdjustWidth,
        )?;
        trace!("{rows} x {cols} -> {row_start}..{row_end} x {col_start}..{col_end}");
        Ok((row_start..row_end, col_start..col_end))
    }

    /// Resolves a span on one axis, multiplying its from-start ends by the
    /// ratio when the axis is corrected. From-end ends stay where they
    /// resolve so borders drawn against the far edge stay on it. A point is
    /// scaled as an index and then widened to one pixel.
    fn correct(&self, span: Span, length: usize, scaled: bool) -> Result<(usize, usize)> {
        if !scaled || self.ratio == 1 {
            return span.resolve(length);
        }
        match span {
            Span::Point(index) => {
                let index = self.scale(Bound::Start(index), length)?;
                SpanRange::point(index).resolve(length)
            }
            Span::Range(range) => {
                let start = self.scale(range.start, length)?;
                let end = self.scale(range.end, length)?;
                check_bounds(start, end, length)
            }
        }
    }

    fn scale(&self, bound: Bound, length: usize) -> Result<usize> {
        let index = bound.resolve(length)?;
        if bound.is_from_end() {
            return Ok(index);
        }
        index
            .checked_mul(self.ratio)
            .ok_or(SixelError::OutOfRange {
                index: isize::MAX,
                length,
            })
    }
}
