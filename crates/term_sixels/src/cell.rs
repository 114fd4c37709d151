//! Packing six vertical pixels into one printable character.
//!
//! Bit 0 is the top pixel of the band. The character is the mask plus 63,
//! so an empty cell is `?` and a full one is `~`.

use crate::constants::{SIXEL_CHAR_OFFSET, SIXEL_HEIGHT, SIXEL_MASK_MAX};
use crate::{Result, SixelError};

/// Six vertically stacked on/off pixels of one color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SixelCell(u8);

impl SixelCell {
    pub const EMPTY: SixelCell = SixelCell(0);
    pub const FULL: SixelCell = SixelCell(SIXEL_MASK_MAX);

    /// Keeps the low six bits of `bits`.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        SixelCell(bits & SIXEL_MASK_MAX)
    }

    /// Builds a cell from six flags, top pixel first.
    pub fn from_array(flags: [bool; SIXEL_HEIGHT]) -> Self {
        let bits = flags
            .iter()
            .enumerate()
            .fold(0u8, |bits, (i, &on)| bits | (u8::from(on) << i));
        SixelCell(bits)
    }

    /// Like [`SixelCell::from_array`], but checks there are exactly six flags.
    pub fn from_flags(flags: &[bool]) -> Result<Self> {
        let flags: [bool; SIXEL_HEIGHT] = flags
            .try_into()
            .map_err(|_| SixelError::InvalidCellLength(flags.len()))?;
        Ok(Self::from_array(flags))
    }

    /// Inverse of [`SixelCell::to_char`]; `None` outside `'?'..='~'`.
    pub fn from_char(ch: char) -> Option<Self> {
        let code = u32::from(ch).checked_sub(u32::from(SIXEL_CHAR_OFFSET))?;
        if code > u32::from(SIXEL_MASK_MAX) {
            return None;
        }
        Some(SixelCell(code as u8))
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn to_char(self) -> char {
        (self.0 + SIXEL_CHAR_OFFSET) as char
    }

    /// The six flags, top pixel first.
    pub fn flags(self) -> [bool; SIXEL_HEIGHT] {
        std::array::from_fn(|i| self.0 & (1 << i) != 0)
    }
}

/// Encodes six flags, top pixel first, as a sixel character.
///
/// ```
/// use term_sixels::encode_cell;
///
/// assert_eq!(encode_cell(&[true, false, false, false, false, false])?, '@');
/// assert_eq!(encode_cell(&[false; 6])?, '?');
/// assert!(encode_cell(&[true; 5]).is_err());
/// # Ok::<(), term_sixels::SixelError>(())
/// ```
pub fn encode_cell(flags: &[bool]) -> Result<char> {
    SixelCell::from_flags(flags).map(SixelCell::to_char)
}
