//! The 20-colour palette: the 16 lo-res colours followed by the four hi-res
//! artifact colours.

/// An RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

pub const BLACK: u8 = 0;
pub const WHITE: u8 = 15;
pub const GREEN: u8 = 16;
pub const ORANGE: u8 = 17;
pub const VIOLET: u8 = 18;
pub const BLUE: u8 = 19;

/// Palette indexed by the colour values stored in a `FrameBuffer`.
pub static PALETTE: [Rgb; 20] = [
    Rgb::new(0, 0, 0),       // black
    Rgb::new(178, 0, 98),    // magenta
    Rgb::new(2, 28, 237),    // dark blue
    Rgb::new(201, 0, 238),   // purple
    Rgb::new(34, 155, 2),    // dark green
    Rgb::new(103, 114, 120), // grey 1
    Rgb::new(21, 177, 234),  // medium blue
    Rgb::new(133, 135, 236), // light blue
    Rgb::new(84, 88, 1),     // brown
    Rgb::new(225, 51, 0),    // orange
    Rgb::new(111, 109, 112), // grey 2
    Rgb::new(224, 69, 231),  // pink
    Rgb::new(68, 246, 0),    // light green
    Rgb::new(209, 216, 0),   // yellow
    Rgb::new(72, 254, 117),  // aquamarine
    Rgb::new(238, 231, 238), // white
    Rgb::new(32, 192, 0),    // hi-res green
    Rgb::new(240, 80, 0),    // hi-res orange
    Rgb::new(160, 0, 255),   // hi-res violet
    Rgb::new(0, 128, 255),   // hi-res blue
];

/// Looks up a colour index; out-of-range indices render black.
pub fn color(index: u8) -> Rgb {
    PALETTE
        .get(index as usize)
        .copied()
        .unwrap_or(PALETTE[BLACK as usize])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_indices() {
        assert_eq!(color(BLACK), Rgb::new(0, 0, 0));
        assert_eq!(color(WHITE), Rgb::new(238, 231, 238));
        assert_eq!(color(GREEN), Rgb::new(32, 192, 0));
        assert_eq!(color(BLUE), Rgb::new(0, 128, 255));
    }

    #[test]
    fn test_out_of_range_is_black() {
        assert_eq!(color(20), Rgb::default());
        assert_eq!(color(0xFF), Rgb::default());
    }
}
