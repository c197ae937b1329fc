//! Character generator for text mode.
//!
//! 64 glyphs in the order of the machine's character ROM: `@`, `A-Z`, `[\]^_`,
//! space, punctuation, `0-9`, `:;<=>?`. Each glyph is 5 pixels wide and 7
//! lines tall; bit 4 of a line is the leftmost pixel. On screen a glyph
//! occupies the top-left of a 7x8 cell, the rest of the cell is background.

/// Glyph width in pixels.
pub const GLYPH_WIDTH: usize = 5;

/// Glyph height in lines.
pub const GLYPH_HEIGHT: usize = 7;

/// The character ROM.
pub static GLYPHS: [[u8; GLYPH_HEIGHT]; 64] = [
    [0b01110, 0b10001, 0b10111, 0b10101, 0b10110, 0b10000, 0b01111], // 00 @
    [0b00100, 0b01010, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001], // 01 A
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110], // 02 B
    [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110], // 03 C
    [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110], // 04 D
    [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111], // 05 E
    [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000], // 06 F
    [0b01111, 0b10000, 0b10000, 0b10011, 0b10001, 0b10001, 0b01111], // 07 G
    [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001], // 08 H
    [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110], // 09 I
    [0b00001, 0b00001, 0b00001, 0b00001, 0b00001, 0b10001, 0b01110], // 0A J
    [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001], // 0B K
    [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111], // 0C L
    [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001], // 0D M
    [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001], // 0E N
    [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110], // 0F O
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000], // 10 P
    [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101], // 11 Q
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001], // 12 R
    [0b01110, 0b10001, 0b10000, 0b01110, 0b00001, 0b10001, 0b01110], // 13 S
    [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100], // 14 T
    [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110], // 15 U
    [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100], // 16 V
    [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b11011, 0b10001], // 17 W
    [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001], // 18 X
    [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100], // 19 Y
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111], // 1A Z
    [0b11111, 0b11000, 0b11000, 0b11000, 0b11000, 0b11000, 0b11111], // 1B [
    [0b00000, 0b10000, 0b01000, 0b00100, 0b00010, 0b00001, 0b00000], // 1C \
    [0b11111, 0b00011, 0b00011, 0b00011, 0b00011, 0b00011, 0b11111], // 1D ]
    [0b00000, 0b00000, 0b00100, 0b01010, 0b10001, 0b00000, 0b00000], // 1E ^
    [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b11111], // 1F _
    [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000], // 20 space
    [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100], // 21 !
    [0b01010, 0b01010, 0b01010, 0b00000, 0b00000, 0b00000, 0b00000], // 22 "
    [0b01010, 0b01010, 0b11111, 0b01010, 0b11111, 0b01010, 0b01010], // 23 #
    [0b00100, 0b01111, 0b10100, 0b01110, 0b00101, 0b11110, 0b00100], // 24 $
    [0b11000, 0b11001, 0b00010, 0b00100, 0b01000, 0b10011, 0b00011], // 25 %
    [0b01000, 0b10100, 0b10100, 0b01000, 0b10101, 0b10010, 0b01101], // 26 &
    [0b00100, 0b00100, 0b00100, 0b00000, 0b00000, 0b00000, 0b00000], // 27 '
    [0b00100, 0b01000, 0b10000, 0b10000, 0b10000, 0b01000, 0b00100], // 28 (
    [0b00100, 0b00010, 0b00001, 0b00001, 0b00001, 0b00010, 0b00100], // 29 )
    [0b00100, 0b10101, 0b01110, 0b00100, 0b01110, 0b10101, 0b00100], // 2A *
    [0b00000, 0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0b00000], // 2B +
    [0b00000, 0b00000, 0b00000, 0b00000, 0b00100, 0b00100, 0b01000], // 2C ,
    [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000], // 2D -
    [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00100], // 2E .
    [0b00000, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b00000], // 2F /
    [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110], // 30 0
    [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110], // 31 1
    [0b01110, 0b10001, 0b00001, 0b00110, 0b01000, 0b10000, 0b11111], // 32 2
    [0b11111, 0b00001, 0b00010, 0b00110, 0b00001, 0b10001, 0b01110], // 33 3
    [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010], // 34 4
    [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110], // 35 5
    [0b00111, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110], // 36 6
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000], // 37 7
    [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110], // 38 8
    [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b11100], // 39 9
    [0b00000, 0b00000, 0b00100, 0b00000, 0b00100, 0b00000, 0b00000], // 3A :
    [0b00000, 0b00000, 0b00100, 0b00000, 0b00100, 0b00100, 0b01000], // 3B ;
    [0b00010, 0b00100, 0b01000, 0b10000, 0b01000, 0b00100, 0b00010], // 3C <
    [0b00000, 0b00000, 0b11111, 0b00000, 0b11111, 0b00000, 0b00000], // 3D =
    [0b01000, 0b00100, 0b00010, 0b00001, 0b00010, 0b00100, 0b01000], // 3E >
    [0b01110, 0b10001, 0b00010, 0b00100, 0b00100, 0b00000, 0b00100], // 3F ?
];

/// Glyph for a screen code. The top two bits (inverse and flash on real
/// hardware) are ignored.
pub fn glyph(code: u8) -> &'static [u8; GLYPH_HEIGHT] {
    &GLYPHS[(code & 0x3F) as usize]
}

/// True if pixel (`line`, `column`) of the glyph for `code` is lit.
///
/// Positions outside the 5x7 glyph are never lit.
pub fn is_lit(code: u8, line: usize, column: usize) -> bool {
    if line >= GLYPH_HEIGHT || column >= GLYPH_WIDTH {
        return false;
    }
    (glyph(code)[line] >> (GLYPH_WIDTH - 1 - column)) & 1 != 0
}

/// Screen code for an ASCII character, as the monitor ROM stores it
/// (normal video, bit 7 set). Lower case folds to upper case.
pub fn screen_code(ch: char) -> Option<u8> {
    let upper = ch.to_ascii_uppercase();
    match upper {
        ' '..='_' => Some(upper as u8 | 0x80),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_bits_ignored() {
        assert_eq!(glyph(0x01), glyph(0xC1));
        assert_eq!(glyph(0x41), glyph(0x81));
    }

    #[test]
    fn test_space_is_blank() {
        assert!(glyph(0x20).iter().all(|line| *line == 0));
    }

    #[test]
    fn test_glyphs_fit_five_columns() {
        for glyph in GLYPHS.iter() {
            assert!(glyph.iter().all(|line| *line < 0b10_0000));
        }
    }

    #[test]
    fn test_is_lit() {
        // 'T' has a full top bar and a single centre stem
        let t = screen_code('T').unwrap();
        assert!((0..5).all(|col| is_lit(t, 0, col)));
        assert!(is_lit(t, 6, 2));
        assert!(!is_lit(t, 6, 0));
        assert!(!is_lit(t, 0, 5));
        assert!(!is_lit(t, 7, 2));
    }

    #[test]
    fn test_screen_code() {
        assert_eq!(screen_code('A'), Some(0xC1));
        assert_eq!(screen_code('a'), Some(0xC1));
        assert_eq!(screen_code('@'), Some(0xC0));
        assert_eq!(screen_code(' '), Some(0xA0));
        assert_eq!(screen_code('0'), Some(0xB0));
        assert_eq!(screen_code('~'), None);
    }
}
