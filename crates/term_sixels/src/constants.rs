//! Control sequences and fixed values of the SIXEL wire format.

/// DCS introducer followed by the SIXEL command: `ESC P q`.
pub const DCS_START: &str = "\x1bPq";

/// Ends the SIXEL data stream.
pub const DCS_TERMINATOR: &str = "\x1b";

/// Graphics carriage return: back to column 0 of the current band.
pub const CARRIAGE_RETURN: char = '$';

/// Graphics new line: down to the next band.
pub const NEXT_LINE: char = '-';

/// Introduces a color register definition or selection.
pub const COLOR_INTRODUCER: char = '#';

/// Introduces a repeat count.
pub const REPEAT_INTRODUCER: char = '!';

/// Separates numeric parameters.
pub const PARAM_SEPARATOR: char = ';';

/// Added to a 6-bit mask to get a printable sixel character.
pub const SIXEL_CHAR_OFFSET: u8 = 63;

/// Pixels per sixel, and the height of one band.
pub const SIXEL_HEIGHT: usize = 6;

/// Largest 6-bit mask.
pub const SIXEL_MASK_MAX: u8 = 0b11_1111;
