//! Property-based invariant tests for the pixel buffer and sixel encoding.
//!
//! 1. Physical height is the smallest multiple of six above the corrected
//!    height.
//! 2. A point write is read back at the same logical coordinate.
//! 3. Range reads are row-major and scale by the ratio; a point stays one
//!    physical pixel.
//! 4. Resolving an absolute range is idempotent, and from-end ranges land
//!    where they would on an uncorrected buffer of the same physical size.
//! 5. Cell encoding is a bijection onto `'?'..='~'`.
//! 6. Run-length runs expand back to the cells of their row.

use proptest::prelude::*;
use term_sixels::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn correction_strategy() -> impl Strategy<Value = PixelRatioCorrection> {
    prop_oneof![
        Just(PixelRatioCorrection::None),
        Just(PixelRatioCorrection::AdjustWidth),
        Just(PixelRatioCorrection::AdjustHeight),
    ]
}

fn color_strategy() -> impl Strategy<Value = Color> {
    // few distinct values so regions actually share colors
    (0u8..3, 0u8..3, 0u8..3).prop_map(|(r, g, b)| Color::new(r * 120, g * 120, b * 120))
}

fn buffer_strategy() -> impl Strategy<Value = PixelBuffer> {
    (1usize..=20, 1usize..=20, correction_strategy(), 1usize..=3)
        .prop_map(|(h, w, c, ratio)| PixelBuffer::new(h, w, c, ratio).unwrap())
}

fn painted_buffer_strategy() -> impl Strategy<Value = PixelBuffer> {
    (
        1usize..=24,
        1usize..=24,
        correction_strategy(),
        1usize..=3,
        prop::collection::vec((any::<usize>(), any::<usize>(), color_strategy()), 0..40),
    )
        .prop_map(|(h, w, correction, ratio, points)| {
            let mut buffer = PixelBuffer::new(h, w, correction, ratio).unwrap();
            for (y, x, color) in points {
                buffer.set_pixel(y % h, x % w, color).unwrap();
            }
            buffer
        })
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Height rounding
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn height_is_next_band_multiple(
        h in 1usize..=200,
        w in 1usize..=50,
        correction in correction_strategy(),
        ratio in 1usize..=4,
    ) {
        let buffer = PixelBuffer::new(h, w, correction, ratio).unwrap();
        let corrected = if correction == PixelRatioCorrection::AdjustHeight { h * ratio } else { h };
        prop_assert_eq!(buffer.height() % 6, 0);
        prop_assert!(buffer.height() >= corrected);
        prop_assert!(buffer.height() < corrected + 6);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Set then get
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn set_then_get_point(
        mut buffer in buffer_strategy(),
        y in any::<usize>(),
        x in any::<usize>(),
        color in color_strategy(),
    ) {
        let y = y % buffer.logical_height();
        let x = x % buffer.logical_width();
        buffer.set_pixel(y, x, color).unwrap();
        prop_assert_eq!(buffer.get_pixel(y, x).unwrap(), color);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Range reads agree with point reads
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn range_read_is_row_major(
        buffer in painted_buffer_strategy(),
        a in any::<usize>(),
        b in any::<usize>(),
        c in any::<usize>(),
        d in any::<usize>(),
    ) {
        let (h, w) = (buffer.logical_height(), buffer.logical_width());
        let (r0, r1) = { let (p, q) = (a % (h + 1), b % (h + 1)); (p.min(q), p.max(q)) };
        let (c0, c1) = { let (p, q) = (c % (w + 1), d % (w + 1)); (p.min(q), p.max(q)) };
        let (ry, rx) = axis_ratios(&buffer);

        let colors = buffer.get(r0..r1, c0..c1).unwrap();
        let expected: Vec<Color> = buffer
            .rows()
            .skip(r0 * ry)
            .take((r1 - r0) * ry)
            .flat_map(|row| row[c0 * rx..c1 * rx].iter().copied())
            .collect();
        prop_assert_eq!(colors, expected);
    }

    #[test]
    fn point_read_is_one_physical_pixel(
        buffer in painted_buffer_strategy(),
        y in any::<usize>(),
        x in any::<usize>(),
    ) {
        let y = y % buffer.logical_height();
        let x = x % buffer.logical_width();
        let (ry, rx) = axis_ratios(&buffer);

        let colors = buffer.get(y, x).unwrap();
        prop_assert_eq!(colors.len(), 1);
        prop_assert_eq!(colors[0], buffer.get_pixel(y, x).unwrap());
        let physical = buffer.rows().nth(y * ry).unwrap()[x * rx];
        prop_assert_eq!(colors[0], physical);
    }
}

/// Row and column scale factors of a buffer.
fn axis_ratios(buffer: &PixelBuffer) -> (usize, usize) {
    match buffer.correction() {
        PixelRatioCorrection::None => (1, 1),
        PixelRatioCorrection::AdjustWidth => (1, buffer.ratio()),
        PixelRatioCorrection::AdjustHeight => (buffer.ratio(), 1),
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Resolution idempotence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn resolve_is_idempotent(length in 0usize..1000, a in any::<usize>(), b in any::<usize>()) {
        let (p, q) = (a % (length + 1), b % (length + 1));
        let (start, end) = (p.min(q), p.max(q));
        let resolved = SpanRange::from(start..end).resolve(length).unwrap();
        prop_assert_eq!(resolved, (start, end));
        prop_assert_eq!(SpanRange::from(resolved.0..resolved.1).resolve(length).unwrap(), resolved);
    }

    #[test]
    fn from_end_spans_ignore_ratio(
        h in 1usize..=20,
        w in 1usize..=20,
        correction in prop_oneof![
            Just(PixelRatioCorrection::AdjustWidth),
            Just(PixelRatioCorrection::AdjustHeight),
        ],
        ratio in 1usize..=3,
        a in 0usize..=64,
        b in 0usize..=64,
        color in color_strategy(),
    ) {
        let mut corrected = PixelBuffer::new(h, w, correction, ratio).unwrap();
        let mut plain = PixelBuffer::uncorrected(corrected.height(), corrected.width()).unwrap();
        let span = SpanRange::new(Bound::End(a), Bound::End(b));

        let (got, want) = if correction == PixelRatioCorrection::AdjustHeight {
            (corrected.set(span, .., color), plain.set(span, .., color))
        } else {
            (corrected.set(.., span, color), plain.set(.., span, color))
        };
        prop_assert_eq!(got, want);
        prop_assert!(corrected.rows().eq(plain.rows()));
    }

    #[test]
    fn from_end_resolves_against_length(length in 0usize..1000, offset in 0usize..1000) {
        let span = SpanRange::new(Bound::End(offset), Bound::End(0));
        match span.resolve(length) {
            Ok((start, end)) => {
                prop_assert_eq!(start, length - offset);
                prop_assert_eq!(end, length);
            }
            Err(err) => {
                prop_assert!(offset > length);
                prop_assert_eq!(err.kind(), ErrorKind::OutOfRange);
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Cell encoding bijection
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn cell_round_trip(flags in prop::array::uniform6(any::<bool>())) {
        let ch = encode_cell(&flags).unwrap();
        prop_assert!(('?'..='~').contains(&ch));
        prop_assert_eq!(SixelCell::from_char(ch).unwrap().flags(), flags);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Runs expand to cells
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn runs_expand_to_row(buffer in painted_buffer_strategy()) {
        let image = SixelImage::new(&buffer);
        for band in 0..image.bands() {
            for register in 0..image.registers().len() {
                let expected: String = image
                    .row(band, register)
                    .unwrap()
                    .iter()
                    .map(|c| c.to_char())
                    .collect();
                let mut expanded = String::new();
                let mut previous = None;
                for (count, ch) in image.runs(band, register).unwrap() {
                    prop_assert!(count > 0);
                    prop_assert_ne!(Some(ch), previous, "adjacent runs must differ");
                    previous = Some(ch);
                    expanded.extend(std::iter::repeat(ch).take(count));
                }
                prop_assert_eq!(expanded, expected);
            }
        }
    }

    #[test]
    fn every_pixel_lands_in_exactly_one_register(buffer in painted_buffer_strategy()) {
        let image = SixelImage::new(&buffer);
        for band in 0..image.bands() {
            for x in 0..image.width() {
                let mut union = 0u8;
                for register in 0..image.registers().len() {
                    let bits = image.row(band, register).unwrap()[x].bits();
                    prop_assert_eq!(union & bits, 0);
                    union |= bits;
                }
                prop_assert_eq!(union, 0b11_1111);
            }
        }
    }
}
