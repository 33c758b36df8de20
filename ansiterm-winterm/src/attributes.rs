//! SGR parameter folding into console attribute words.
//!
//! Console attributes pack the foreground colour into the low nibble and the
//! background colour into the next one, with red and blue bits swapped
//! relative to the ANSI colour indices. Reverse video is not an attribute
//! bit at all; it is tracked as a flag and applied by exchanging the two
//! nibbles when the word is written.

pub const FOREGROUND_BLUE: u16 = 0x0001;
pub const FOREGROUND_GREEN: u16 = 0x0002;
pub const FOREGROUND_RED: u16 = 0x0004;
pub const FOREGROUND_INTENSITY: u16 = 0x0008;
pub const BACKGROUND_BLUE: u16 = 0x0010;
pub const BACKGROUND_GREEN: u16 = 0x0020;
pub const BACKGROUND_RED: u16 = 0x0040;
pub const BACKGROUND_INTENSITY: u16 = 0x0080;
pub const COMMON_LVB_UNDERSCORE: u16 = 0x8000;

const FOREGROUND_MASK: u16 = 0x000f;
const BACKGROUND_MASK: u16 = 0x00f0;
const COMMON_LVB_MASK: u16 = 0xff00;
const FOREGROUND_COLOR_MASK: u16 =
    FOREGROUND_RED | FOREGROUND_GREEN | FOREGROUND_BLUE;
const BACKGROUND_COLOR_MASK: u16 =
    BACKGROUND_RED | BACKGROUND_GREEN | BACKGROUND_BLUE;

/// ANSI colour index (black, red, green, yellow, blue, magenta, cyan, white)
/// to foreground bits.
const ANSI_FOREGROUND: [u16; 8] = [
    0,
    FOREGROUND_RED,
    FOREGROUND_GREEN,
    FOREGROUND_RED | FOREGROUND_GREEN,
    FOREGROUND_BLUE,
    FOREGROUND_RED | FOREGROUND_BLUE,
    FOREGROUND_GREEN | FOREGROUND_BLUE,
    FOREGROUND_RED | FOREGROUND_GREEN | FOREGROUND_BLUE,
];

/// The same table shifted into the background nibble.
const ANSI_BACKGROUND: [u16; 8] = [
    0,
    BACKGROUND_RED,
    BACKGROUND_GREEN,
    BACKGROUND_RED | BACKGROUND_GREEN,
    BACKGROUND_BLUE,
    BACKGROUND_RED | BACKGROUND_BLUE,
    BACKGROUND_GREEN | BACKGROUND_BLUE,
    BACKGROUND_RED | BACKGROUND_GREEN | BACKGROUND_BLUE,
];

/// Fold one SGR parameter into `attributes`, returning the updated word and
/// reverse-video flag. `defaults` supplies the colours restored by 39 and
/// 49. Parameter 0 is a full reset and is handled by the caller; anything
/// unrecognised passes through unchanged.
pub fn ansi_to_windows(
    mut attributes: u16,
    mut inverted: bool,
    defaults: u16,
    param: i64,
) -> (u16, bool) {
    match param {
        1 => attributes |= FOREGROUND_INTENSITY,
        2 | 22 => attributes &= !FOREGROUND_INTENSITY,
        4 => attributes |= COMMON_LVB_UNDERSCORE,
        24 => attributes &= !COMMON_LVB_UNDERSCORE,
        7 => inverted = true,
        27 => inverted = false,
        30..=37 => {
            attributes = (attributes & !FOREGROUND_COLOR_MASK)
                | ANSI_FOREGROUND[(param - 30) as usize];
        },
        39 => {
            attributes = (attributes & !FOREGROUND_MASK)
                | (defaults & FOREGROUND_MASK);
        },
        40..=47 => {
            attributes = (attributes & !BACKGROUND_COLOR_MASK)
                | ANSI_BACKGROUND[(param - 40) as usize];
        },
        49 => {
            attributes = (attributes & !BACKGROUND_MASK)
                | (defaults & BACKGROUND_MASK);
        },
        90..=97 => {
            attributes = (attributes & !FOREGROUND_COLOR_MASK)
                | FOREGROUND_INTENSITY
                | ANSI_FOREGROUND[(param - 90) as usize];
        },
        100..=107 => {
            attributes = (attributes & !BACKGROUND_COLOR_MASK)
                | BACKGROUND_INTENSITY
                | ANSI_BACKGROUND[(param - 100) as usize];
        },
        _ => {},
    }

    (attributes, inverted)
}

/// Exchange the foreground and background nibbles, keeping the LVB bits.
pub fn invert_attributes(attributes: u16) -> u16 {
    (attributes & COMMON_LVB_MASK)
        | ((attributes & FOREGROUND_MASK) << 4)
        | ((attributes & BACKGROUND_MASK) >> 4)
}
