/// An opaque 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub fn is_black(self) -> bool {
        self == Color::BLACK
    }

    /// Channels as truncated percentages (0-100), as SIXEL RGB registers use.
    pub fn rgb_percent(self) -> (u8, u8, u8) {
        (
            channel_percent(self.r),
            channel_percent(self.g),
            channel_percent(self.b),
        )
    }

    /// Hue in degrees (0-359), lightness and saturation in percent (0-100).
    ///
    /// Standard HSL: red is at 0 degrees and grays have hue 0. Every value is
    /// truncated toward zero.
    pub fn hls(self) -> (u16, u8, u8) {
        let r = self.r as f32 / 255.0;
        let g = self.g as f32 / 255.0;
        let b = self.b as f32 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;
        let lightness = (max + min) / 2.0;

        if self.r == self.g && self.g == self.b {
            return (0, (lightness * 100.0) as u8, 0);
        }

        let mut hue = if self.r >= self.g && self.r >= self.b {
            (g - b) / delta
        } else if self.g >= self.b {
            2.0 + (b - r) / delta
        } else {
            4.0 + (r - g) / delta
        } * 60.0;
        if hue < 0.0 {
            hue += 360.0;
        }

        let saturation = if lightness <= 0.5 {
            delta / (max + min)
        } else {
            delta / (2.0 - max - min)
        };

        (
            (hue as u16).min(359),
            (lightness * 100.0) as u8,
            ((saturation * 100.0) as u8).min(100),
        )
    }
}

#[inline]
fn channel_percent(channel: u8) -> u8 {
    (channel as u32 * 100 / 255) as u8
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Color::new(r, g, b)
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Color::new(r, g, b)
    }
}
