#![no_main]

use libfuzzer_sys::fuzz_target;
use term_sixels::{Runs, SixelCell};

fuzz_target!(|data: &[u8]| {
    let cells: Vec<SixelCell> = data.iter().map(|&b| SixelCell::from_bits(b)).collect();

    let mut expanded = Vec::with_capacity(cells.len());
    for (count, ch) in Runs::new(&cells) {
        assert!(count > 0);
        let cell = SixelCell::from_char(ch).expect("runs only yield sixel characters");
        expanded.extend(std::iter::repeat(cell).take(count));
    }

    assert_eq!(expanded, cells);
});
