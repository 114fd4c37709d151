//! Assembles a [`PixelBuffer`] into a SIXEL sequence.
//!
//! The buffer is cut into six pixel bands. Within a band every register gets
//! its own row of cells; the rows are drawn over each other with a graphics
//! carriage return between them, then a graphics new line moves to the next
//! band. Each row is run-length encoded.

use std::fmt;

use log::{debug, trace};

use crate::buffer::PixelBuffer;
use crate::cell::SixelCell;
use crate::color::Color;
use crate::constants::{
    CARRIAGE_RETURN, DCS_START, DCS_TERMINATOR, NEXT_LINE, REPEAT_INTRODUCER, SIXEL_HEIGHT,
};
use crate::register::{ColorSpace, RegisterTable};
use crate::util::write_number;

/// Options for serializing a [`SixelImage`].
#[derive(Clone, Debug, Default)]
pub struct EncodeOptions {
    /// Color space of the register definitions.
    pub color_space: ColorSpace,

    /// Put a line feed after the header, the register definitions and every
    /// `$` and `-`. Terminals skip these inside SIXEL data, which keeps dumps
    /// readable.
    pub line_breaks: bool,
}

/// An immutable snapshot of a buffer as SIXEL cells.
///
/// Cells are laid out `[band][register][column]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SixelImage {
    registers: RegisterTable,
    cells: Vec<SixelCell>,
    bands: usize,
    width: usize,
}

impl SixelImage {
    pub fn new(buffer: &PixelBuffer) -> Self {
        let registers = RegisterTable::from_buffer(buffer);
        let bands = buffer.bands();
        let width = buffer.width();
        let count = registers.len();

        debug!("sixel map: {bands} bands, {count} registers, width {width}");

        let mut cells = vec![SixelCell::EMPTY; bands * count * width];
        for band in 0..bands {
            let rows: [&[Color]; SIXEL_HEIGHT] =
                std::array::from_fn(|bit| buffer.row(band * SIXEL_HEIGHT + bit));
            for col in 0..width {
                // every buffer color has a register
                let column = rows.map(|row| registers.index_of(row[col]));
                for (bit, register) in column.iter().enumerate() {
                    let Some(register) = *register else { continue };
                    // one cell per register, built at its topmost pixel
                    if column[..bit].contains(&Some(register)) {
                        continue;
                    }
                    let flags = column.map(|other| other == Some(register));
                    cells[(band * count + register) * width + col] = SixelCell::from_array(flags);
                }
            }
        }

        Self {
            registers,
            cells,
            bands,
            width,
        }
    }

    #[inline]
    pub fn bands(&self) -> usize {
        self.bands
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn registers(&self) -> &RegisterTable {
        &self.registers
    }

    /// The cells of one register in one band, left to right.
    ///
    /// `None` if `band` or `register` is out of bounds.
    pub fn row(&self, band: usize, register: usize) -> Option<&[SixelCell]> {
        if band >= self.bands || register >= self.registers.len() {
            return None;
        }
        Some(self.row_unchecked(band, register))
    }

    /// Run-length encoded form of [`SixelImage::row`].
    pub fn runs(&self, band: usize, register: usize) -> Option<Runs<'_>> {
        self.row(band, register).map(Runs::new)
    }

    fn row_unchecked(&self, band: usize, register: usize) -> &[SixelCell] {
        let start = (band * self.registers.len() + register) * self.width;
        &self.cells[start..start + self.width]
    }

    /// The full sequence with default options.
    #[must_use = "this returns the encoded SIXEL string"]
    pub fn to_sixel_string(&self) -> String {
        self.encode(&EncodeOptions::default())
    }

    /// The full sequence, from `ESC P q` to the terminator.
    #[must_use = "this returns the encoded SIXEL string"]
    pub fn encode(&self, opts: &EncodeOptions) -> String {
        let eol = if opts.line_breaks { "\n" } else { "" };
        let mut out = String::with_capacity(
            16 + self.registers.len() * (18 + self.bands * (self.width + 8)),
        );

        out.push_str(DCS_START);
        out.push_str(eol);

        for register in &self.registers {
            register.write_definition(&mut out, opts.color_space);
        }
        out.push_str(eol);

        for band in 0..self.bands {
            for register in &self.registers {
                register.write_selection(&mut out);
                for (count, ch) in Runs::new(self.row_unchecked(band, register.index)) {
                    out.push(REPEAT_INTRODUCER);
                    write_number(&mut out, count);
                    out.push(ch);
                }
                out.push(CARRIAGE_RETURN);
                out.push_str(eol);
            }
            out.push(NEXT_LINE);
            out.push_str(eol);
        }

        out.push_str(DCS_TERMINATOR);

        trace!("sixel sequence: {} bytes", out.len());
        out
    }
}

impl fmt::Display for SixelImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sixel_string())
    }
}

/// Runs of identical cells as `(count, char)`, left to right.
#[derive(Clone, Debug)]
pub struct Runs<'a> {
    cells: &'a [SixelCell],
}

impl<'a> Runs<'a> {
    pub fn new(cells: &'a [SixelCell]) -> Self {
        Self { cells }
    }
}

impl Iterator for Runs<'_> {
    type Item = (usize, char);

    fn next(&mut self) -> Option<Self::Item> {
        let first = *self.cells.first()?;
        let len = self.cells.iter().take_while(|&&cell| cell == first).count();
        self.cells = &self.cells[len..];
        Some((len, first.to_char()))
    }
}

/// Encode a buffer with default options.
///
/// # Example
/// ```
/// use term_sixels::{sixel_encode, PixelBuffer};
///
/// let buffer = PixelBuffer::uncorrected(6, 3)?;
/// assert_eq!(sixel_encode(&buffer), "\x1bPq#0;2;0;0;0#0!3~$-\x1b");
/// # Ok::<(), term_sixels::SixelError>(())
/// ```
#[inline]
#[must_use = "this returns the encoded SIXEL string"]
pub fn sixel_encode(buffer: &PixelBuffer) -> String {
    SixelImage::new(buffer).to_sixel_string()
}

/// Encode a buffer into a SIXEL string.
#[must_use = "this returns the encoded SIXEL string"]
pub fn sixel_encode_with(buffer: &PixelBuffer, opts: &EncodeOptions) -> String {
    SixelImage::new(buffer).encode(opts)
}
