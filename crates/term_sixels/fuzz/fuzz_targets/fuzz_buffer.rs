#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use term_sixels::{
    sixel_encode, Bound, Color, PixelBuffer, PixelRatioCorrection, SpanRange,
};

#[derive(Arbitrary, Debug)]
enum FuzzBound {
    Start(u8),
    End(u8),
}

impl From<FuzzBound> for Bound {
    fn from(bound: FuzzBound) -> Self {
        match bound {
            FuzzBound::Start(i) => Bound::Start(i as usize),
            FuzzBound::End(i) => Bound::End(i as usize),
        }
    }
}

#[derive(Arbitrary, Debug)]
struct Paint {
    rows: (FuzzBound, FuzzBound),
    cols: (FuzzBound, FuzzBound),
    rgb: [u8; 3],
}

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    height: u8,
    width: u8,
    correction: u8,
    ratio: u8,
    paints: Vec<Paint>,
}

fuzz_target!(|input: FuzzInput| {
    let correction = match input.correction % 3 {
        0 => PixelRatioCorrection::None,
        1 => PixelRatioCorrection::AdjustWidth,
        _ => PixelRatioCorrection::AdjustHeight,
    };

    // Invalid dimensions and ratios must be rejected, not panic
    let Ok(mut buffer) = PixelBuffer::new(
        input.height as usize,
        input.width as usize,
        correction,
        (input.ratio % 5) as usize,
    ) else {
        return;
    };

    for paint in input.paints.into_iter().take(32) {
        let rows = SpanRange::new(paint.rows.0.into(), paint.rows.1.into());
        let cols = SpanRange::new(paint.cols.0.into(), paint.cols.1.into());
        let before = buffer.clone();
        if buffer.set(rows, cols, Color::from(paint.rgb)).is_err() {
            assert_eq!(buffer, before, "failed writes must not touch the buffer");
        }
    }

    let sixel = sixel_encode(&buffer);
    assert!(sixel.starts_with("\x1bPq"));
    assert!(sixel.ends_with('\x1b'));
});
