//! Index ranges that may count from either end of an axis.
//!
//! A [`SpanRange`] is a pair of [`Bound`]s. Each bound is either an offset
//! from the start of the axis or an offset from its end, so `End(0)` is one
//! past the last element and `End(3)..End(0)` covers the last three. Every
//! pixel buffer access goes through [`SpanRange::resolve`].

use std::fmt;
use std::ops::{Range, RangeFrom, RangeFull, RangeInclusive, RangeTo, RangeToInclusive};

use crate::{Result, SixelError};

/// One end of a [`SpanRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bound {
    /// Offset from the first element.
    Start(usize),
    /// Offset back from the axis length.
    End(usize),
}

impl Bound {
    #[inline]
    pub fn is_from_end(self) -> bool {
        matches!(self, Bound::End(_))
    }

    /// The raw offset, without regard to which end it counts from.
    #[inline]
    pub fn offset(self) -> usize {
        match self {
            Bound::Start(offset) | Bound::End(offset) => offset,
        }
    }

    /// Absolute index on an axis of `length`.
    ///
    /// Fails when a from-end offset is larger than `length`. The upper bound
    /// is not checked here.
    pub fn resolve(self, length: usize) -> Result<usize> {
        match self {
            Bound::Start(index) => Ok(index),
            Bound::End(offset) => {
                length
                    .checked_sub(offset)
                    .ok_or_else(|| SixelError::OutOfRange {
                        index: isize::try_from(offset - length).map_or(isize::MIN, |d| -d),
                        length,
                    })
            }
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Start(index) => write!(f, "{index}"),
            Bound::End(offset) => write!(f, "^{offset}"),
        }
    }
}

/// A half-open range whose ends may count from either side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpanRange {
    pub start: Bound,
    pub end: Bound,
}

impl SpanRange {
    pub const fn new(start: Bound, end: Bound) -> Self {
        Self { start, end }
    }

    /// The one-element range `index..index + 1`.
    pub const fn point(index: usize) -> Self {
        Self::new(Bound::Start(index), Bound::Start(index.saturating_add(1)))
    }

    /// The whole axis, `0..^0`.
    pub const fn full() -> Self {
        Self::new(Bound::Start(0), Bound::End(0))
    }

    /// Resolves both ends against `length` into `(start, end)` with
    /// `0 <= start <= end <= length`.
    pub fn resolve(&self, length: usize) -> Result<(usize, usize)> {
        let start = self.start.resolve(length)?;
        let end = self.end.resolve(length)?;
        check_bounds(start, end, length)
    }
}

/// Validates an already absolute `(start, end)` pair against `length`.
///
/// An inverted range is reported before an out of range end, so `5..3` is an
/// invalid range on any axis.
pub fn check_bounds(start: usize, end: usize, length: usize) -> Result<(usize, usize)> {
    if end < start {
        return Err(SixelError::InvalidRange { start, end });
    }
    for index in [start, end] {
        if index > length {
            return Err(SixelError::OutOfRange {
                index: isize::try_from(index).unwrap_or(isize::MAX),
                length,
            });
        }
    }
    Ok((start, end))
}

impl fmt::Display for SpanRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// What a pixel buffer access targets on one axis: a single index or a range.
///
/// A point is scaled as an index before it becomes the one-element range, so
/// on a corrected axis it stays one physical pixel wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Span {
    Point(usize),
    Range(SpanRange),
}

impl Span {
    /// Resolves without any ratio correction.
    pub fn resolve(&self, length: usize) -> Result<(usize, usize)> {
        match self {
            Span::Point(index) => SpanRange::point(*index).resolve(length),
            Span::Range(range) => range.resolve(length),
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Span::Point(index) => write!(f, "{index}"),
            Span::Range(range) => range.fmt(f),
        }
    }
}

impl From<usize> for Span {
    fn from(index: usize) -> Self {
        Span::Point(index)
    }
}

macro_rules! span_from_range {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Span {
                fn from(range: $ty) -> Self {
                    Span::Range(range.into())
                }
            }
        )*
    };
}

span_from_range!(
    SpanRange,
    Range<usize>,
    RangeInclusive<usize>,
    RangeFrom<usize>,
    RangeTo<usize>,
    RangeToInclusive<usize>,
    RangeFull,
    (Bound, Bound),
);

impl From<Range<usize>> for SpanRange {
    fn from(range: Range<usize>) -> Self {
        SpanRange::new(Bound::Start(range.start), Bound::Start(range.end))
    }
}

impl From<RangeInclusive<usize>> for SpanRange {
    fn from(range: RangeInclusive<usize>) -> Self {
        let (start, end) = range.into_inner();
        SpanRange::new(Bound::Start(start), Bound::Start(end.saturating_add(1)))
    }
}

impl From<RangeFrom<usize>> for SpanRange {
    fn from(range: RangeFrom<usize>) -> Self {
        SpanRange::new(Bound::Start(range.start), Bound::End(0))
    }
}

impl From<RangeTo<usize>> for SpanRange {
    fn from(range: RangeTo<usize>) -> Self {
        SpanRange::new(Bound::Start(0), Bound::Start(range.end))
    }
}

impl From<RangeToInclusive<usize>> for SpanRange {
    fn from(range: RangeToInclusive<usize>) -> Self {
        SpanRange::new(Bound::Start(0), Bound::Start(range.end.saturating_add(1)))
    }
}

impl From<RangeFull> for SpanRange {
    fn from(_: RangeFull) -> Self {
        SpanRange::full()
    }
}

impl From<(Bound, Bound)> for SpanRange {
    fn from((start, end): (Bound, Bound)) -> Self {
        SpanRange::new(start, end)
    }
}
