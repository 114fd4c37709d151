//! Color registers: the numbered palette slots a SIXEL stream draws with.

use std::collections::HashMap;

use crate::buffer::PixelBuffer;
use crate::color::Color;
use crate::constants::{COLOR_INTRODUCER, PARAM_SEPARATOR};
use crate::util::write_number;

/// Color coordinate system of a register definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorSpace {
    /// Hue, lightness, saturation
    Hls = 1,
    /// Red, green, blue as percentages
    #[default]
    Rgb = 2,
}

impl ColorSpace {
    /// Numeric id used in the register definition.
    #[inline]
    pub fn id(self) -> u8 {
        self as u8
    }
}

/// A palette slot holding one color of the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorRegister {
    pub index: usize,
    pub color: Color,
    /// Red, green and blue in percent (0-100).
    pub rgb_percent: (u8, u8, u8),
    /// Degrees, red at 0.
    pub hue: u16,
    pub lightness: u8,
    pub saturation: u8,
}

impl ColorRegister {
    pub fn new(index: usize, color: Color) -> Self {
        let (hue, lightness, saturation) = color.hls();
        Self {
            index,
            color,
            rgb_percent: color.rgb_percent(),
            hue,
            lightness,
            saturation,
        }
    }

    /// Appends the definition, `#<index>;<space>;<a>;<b>;<c>`.
    ///
    /// SIXEL puts blue at 0 degrees of the HLS wheel, so the hue is rotated
    /// by 120 degrees on output.
    pub fn write_definition(&self, out: &mut String, space: ColorSpace) {
        let (a, b, c) = match space {
            ColorSpace::Rgb => {
                let (r, g, b) = self.rgb_percent;
                (r as u16, g as u16, b as u16)
            }
            ColorSpace::Hls => (
                (self.hue + 120) % 360,
                self.lightness as u16,
                self.saturation as u16,
            ),
        };
        self.write_selection(out);
        for value in [space.id() as u16, a, b, c] {
            out.push(PARAM_SEPARATOR);
            write_number(out, value as usize);
        }
    }

    /// Appends the selection, `#<index>`.
    pub fn write_selection(&self, out: &mut String) {
        out.push(COLOR_INTRODUCER);
        write_number(out, self.index);
    }

    pub fn definition(&self, space: ColorSpace) -> String {
        let mut out = String::new();
        self.write_definition(&mut out, space);
        out
    }

    pub fn selection(&self) -> String {
        let mut out = String::new();
        self.write_selection(&mut out);
        out
    }
}

/// Registers for every distinct color of a buffer, numbered from 0.
///
/// Numbering follows the order the colors are first met, so it is stable for
/// one buffer but says nothing about which color gets which index in another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterTable {
    registers: Vec<ColorRegister>,
    lookup: HashMap<Color, usize>,
}

impl RegisterTable {
    pub fn from_buffer(buffer: &PixelBuffer) -> Self {
        Self::from_colors(buffer.unique_colors())
    }

    /// Repeated colors are skipped.
    pub fn from_colors(colors: impl IntoIterator<Item = Color>) -> Self {
        let mut table = Self::default();
        for color in colors {
            let next = table.registers.len();
            if let std::collections::hash_map::Entry::Vacant(slot) = table.lookup.entry(color) {
                slot.insert(next);
                table.registers.push(ColorRegister::new(next, color));
            }
        }
        table
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.registers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.registers.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ColorRegister> {
        self.registers.get(index)
    }

    pub fn index_of(&self, color: Color) -> Option<usize> {
        self.lookup.get(&color).copied()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColorRegister> {
        self.registers.iter()
    }

    pub fn as_slice(&self) -> &[ColorRegister] {
        &self.registers
    }
}

impl<'a> IntoIterator for &'a RegisterTable {
    type Item = &'a ColorRegister;
    type IntoIter = std::slice::Iter<'a, ColorRegister>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
