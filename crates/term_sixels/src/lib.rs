//! # term_sixels
//!
//! Paint into an in-memory pixel buffer and encode it as a SIXEL sequence.
//!
//! ## Overview
//!
//! - **PixelBuffer**: a mutable grid of colors addressed by point or range,
//!   with optional pixel aspect ratio correction on one axis
//! - **RegisterTable**: one color register per distinct color in a buffer
//! - **SixelImage**: the band/register/column cell matrix of a buffer and its
//!   run-length encoded serialization
//!
//! No palette reduction or dithering is done: every distinct color in the
//! buffer becomes its own register.
//!
//! ## Quick Start
//!
//! ```
//! use term_sixels::{sixel_encode, Color, PixelBuffer, PixelRatioCorrection};
//!
//! let mut buffer = PixelBuffer::new(12, 20, PixelRatioCorrection::None, 1)?;
//! buffer.set(2..10, 2..4, Color::WHITE)?;
//! buffer.set_pixel(0, 0, Color::new(255, 0, 0))?;
//!
//! let sixel = sixel_encode(&buffer);
//! assert!(sixel.starts_with("\x1bPq"));
//! print!("{}", sixel);
//! # Ok::<(), term_sixels::SixelError>(())
//! ```
//!
//! Ranges may count from the end of an axis, which keeps borders anchored to
//! the far edge:
//!
//! ```
//! use term_sixels::{Bound, Color, PixelBuffer, SpanRange};
//!
//! let mut buffer = PixelBuffer::uncorrected(12, 12)?;
//! // the last three rows
//! buffer.set(SpanRange::new(Bound::End(3), Bound::End(0)), .., Color::WHITE)?;
//! assert_eq!(buffer.get_pixel(9, 0)?, Color::WHITE);
//! assert_eq!(buffer.get_pixel(8, 0)?, Color::BLACK);
//! # Ok::<(), term_sixels::SixelError>(())
//! ```

use thiserror::Error;

pub mod buffer;
pub mod cell;
pub mod color;
pub mod constants;
pub mod image;
pub mod range;
pub mod register;
mod util;

pub use buffer::{PixelBuffer, PixelRatioCorrection};
pub use cell::{encode_cell, SixelCell};
pub use color::Color;
pub use image::{sixel_encode, sixel_encode_with, EncodeOptions, Runs, SixelImage};
pub use range::{Bound, Span, SpanRange};
pub use register::{ColorRegister, ColorSpace, RegisterTable};

/// Errors raised while building or addressing a pixel buffer.
///
/// Every variant is a caller error detected before any state changes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SixelError {
    /// Buffer height or width is zero
    #[error("invalid dimensions: {height}x{width}")]
    InvalidDimensions { height: usize, width: usize },

    /// Pixel ratio must be at least 1
    #[error("invalid pixel ratio: {0}")]
    InvalidRatio(usize),

    /// A sixel cell needs exactly six flags
    #[error("sixel cell must be exactly 6 bits long, got {0}")]
    InvalidCellLength(usize),

    /// Corrected dimensions don't fit in memory
    #[error("corrected dimensions overflow")]
    DimensionOverflow,

    /// A resolved index lies outside the axis
    #[error("index {index} out of range for length {length}")]
    OutOfRange { index: isize, length: usize },

    /// A resolved range ends before it starts
    #[error("range end {end} is before start {start}")]
    InvalidRange { start: usize, end: usize },
}

/// Coarse classification of [`SixelError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    OutOfRange,
    InvalidRange,
}

impl SixelError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SixelError::InvalidDimensions { .. }
            | SixelError::InvalidRatio(_)
            | SixelError::InvalidCellLength(_)
            | SixelError::DimensionOverflow => ErrorKind::InvalidArgument,
            SixelError::OutOfRange { .. } => ErrorKind::OutOfRange,
            SixelError::InvalidRange { .. } => ErrorKind::InvalidRange,
        }
    }
}

/// Result type for SIXEL operations.
pub type Result<T> = core::result::Result<T, SixelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            SixelError::InvalidDimensions {
                height: 0,
                width: 3
            }
            .kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(SixelError::InvalidRatio(0).kind(), ErrorKind::InvalidArgument);
        assert_eq!(
            SixelError::InvalidCellLength(5).kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            SixelError::OutOfRange {
                index: -1,
                length: 6
            }
            .kind(),
            ErrorKind::OutOfRange
        );
        assert_eq!(
            SixelError::InvalidRange { start: 5, end: 3 }.kind(),
            ErrorKind::InvalidRange
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SixelError::InvalidRange { start: 5, end: 3 }.to_string(),
            "range end 3 is before start 5"
        );
        assert_eq!(
            SixelError::OutOfRange {
                index: 13,
                length: 12
            }
            .to_string(),
            "index 13 out of range for length 12"
        );
    }
}
