//! # Display Compositor
//!
//! Turns video memory into a 280x192 buffer of palette indices. The screen is
//! 40x24 character cells of 7x8 pixels.
//!
//! ## Memory layout
//!
//! Text and lo-res share a page at `0x0400` (page 2 at `0x0800`). Memory row
//! `m` starts at `base + m*40 + (m/3)*8` and is shown on screen row
//! `8*(m%3) + m/3`, so consecutive memory rows are spread over three bands.
//!
//! Hi-res uses `0x2000` (page 2 at `0x4000`). Line `l` of screen row `r`
//! starts at `base + (r%8)*128 + (r/8)*40 + l*1024`. Bytes are drawn in pairs:
//! 14 dots, each byte's bit 7 choosing the colour palette for its half.
//!
//! In split-screen graphics the bottom four text rows (20-23) stay in text
//! mode.
//!
//! ## Rendering
//!
//! `render()` only redraws when the bus reports a dirty screen. Otherwise it
//! returns `false` and the previous frame is kept.

use crate::RaquetteBus;

pub mod font;
pub mod palette;

pub use palette::{Rgb, PALETTE};

/// Screen width in pixels.
pub const SCREEN_WIDTH: usize = 280;

/// Screen height in pixels.
pub const SCREEN_HEIGHT: usize = 192;

/// Character cell width in pixels.
pub const CELL_WIDTH: usize = 7;

/// Character cell height in pixels.
pub const CELL_HEIGHT: usize = 8;

/// Character columns.
pub const TEXT_COLUMNS: usize = 40;

/// Character rows.
pub const TEXT_ROWS: usize = 24;

/// First screen row kept in text mode when the screen is split.
pub const SPLIT_TEXT_ROW: usize = 20;

const TEXT_PAGE_ONE: usize = 0x0400;
const TEXT_PAGE_TWO: usize = 0x0800;
const HIRES_PAGE_ONE: usize = 0x2000;
const HIRES_PAGE_TWO: usize = 0x4000;

/// A frame of palette indices, row-major, `SCREEN_HEIGHT` x `SCREEN_WIDTH`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: Vec<u8>,
}

impl FrameBuffer {
    /// An all-black frame.
    pub fn new() -> Self {
        Self {
            pixels: vec![palette::BLACK; SCREEN_WIDTH * SCREEN_HEIGHT],
        }
    }

    /// Palette index at (`row`, `col`), or `None` off screen.
    pub fn pixel(&self, row: usize, col: usize) -> Option<u8> {
        if row >= SCREEN_HEIGHT || col >= SCREEN_WIDTH {
            return None;
        }
        self.pixels.get(row * SCREEN_WIDTH + col).copied()
    }

    /// One scan line, or `None` off screen.
    pub fn row(&self, row: usize) -> Option<&[u8]> {
        let start = row.checked_mul(SCREEN_WIDTH)?;
        let end = start.checked_add(SCREEN_WIDTH)?;
        self.pixels.get(start..end)
    }

    /// All pixels, row-major.
    pub fn as_slice(&self) -> &[u8] {
        &self.pixels
    }

    /// Expands the frame to RGBA bytes (alpha always 255).
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut rgba = Vec::with_capacity(self.pixels.len() * 4);
        for index in &self.pixels {
            let Rgb { r, g, b } = palette::color(*index);
            rgba.extend_from_slice(&[r, g, b, 0xFF]);
        }
        rgba
    }

    fn set(&mut self, row: usize, col: usize, value: u8) {
        if row < SCREEN_HEIGHT && col < SCREEN_WIDTH {
            self.pixels[row * SCREEN_WIDTH + col] = value;
        }
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders video memory into a `FrameBuffer` on demand.
///
/// # Examples
///
/// ```
/// use raquette::{Compositor, RaquetteBus};
///
/// let mut bus = RaquetteBus::new(&[]).unwrap();
/// let mut compositor = Compositor::new();
///
/// assert!(compositor.render(&mut bus));
/// assert!(!compositor.render(&mut bus));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Compositor {
    frame: FrameBuffer,
}

impl Compositor {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last rendered frame.
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Redraws if the bus reports a dirty screen.
    ///
    /// Returns `true` if a new frame was produced.
    pub fn render(&mut self, bus: &mut RaquetteBus) -> bool {
        if !bus.take_dirty() {
            return false;
        }
        let switches = bus.switches();
        self.redraw(bus.memory().as_slice(), switches);
        true
    }

    /// Unconditionally redraws the whole screen from `memory`.
    pub fn redraw(&mut self, memory: &[u8], switches: crate::SoftSwitches) {
        let text_base = if switches.page_two {
            TEXT_PAGE_TWO
        } else {
            TEXT_PAGE_ONE
        };
        let hires_base = if switches.page_two {
            HIRES_PAGE_TWO
        } else {
            HIRES_PAGE_ONE
        };

        for memrow in 0..TEXT_ROWS {
            let row = 8 * (memrow % 3) + memrow / 3;
            let row_addr = text_base + memrow * 40 + (memrow / 3) * 8;

            for col in 0..TEXT_COLUMNS {
                let text_cell = !switches.graphics
                    || (!switches.full_screen && row >= SPLIT_TEXT_ROW);

                if text_cell {
                    self.draw_glyph(row, col, byte(memory, row_addr + col));
                } else if switches.hi_res {
                    // Hi-res draws two cells per byte pair
                    if col % 2 == 0 {
                        self.draw_hires_pair(memory, hires_base, row, col);
                    }
                } else {
                    self.draw_lores_cell(row, col, byte(memory, row_addr + col));
                }
            }
        }
    }

    fn draw_glyph(&mut self, row: usize, col: usize, code: u8) {
        for line in 0..CELL_HEIGHT {
            for x in 0..CELL_WIDTH {
                let value = if font::is_lit(code, line, x) {
                    palette::WHITE
                } else {
                    palette::BLACK
                };
                self.frame
                    .set(row * CELL_HEIGHT + line, col * CELL_WIDTH + x, value);
            }
        }
    }

    fn draw_lores_cell(&mut self, row: usize, col: usize, value: u8) {
        let bottom = value & 0x0F;
        let top = value >> 4;
        for line in 0..CELL_HEIGHT {
            // The low nibble fills the upper half of the cell
            let color = if line < 4 { bottom } else { top };
            for x in 0..CELL_WIDTH {
                self.frame
                    .set(row * CELL_HEIGHT + line, col * CELL_WIDTH + x, color);
            }
        }
    }

    fn draw_hires_pair(&mut self, memory: &[u8], base: usize, row: usize, col: usize) {
        let row_addr = base + (row % 8) * 128 + (row / 8) * 40;

        for line in 0..CELL_HEIGHT {
            let addr = row_addr + 1024 * line + col;
            let first = byte(memory, addr);
            let second = byte(memory, addr + 1);

            let mut dots = [false; 14];
            for i in 0..7 {
                dots[i] = (first >> i) & 1 != 0;
                dots[i + 7] = (second >> i) & 1 != 0;
            }
            let palette_first = first & 0x80 != 0;
            let palette_second = second & 0x80 != 0;

            for pair in 0..7 {
                let even = dots[pair * 2];
                let odd = dots[pair * 2 + 1];
                let (color_first, color_second) = match (even, odd) {
                    (true, true) => (palette::WHITE, palette::WHITE),
                    (false, true) => (
                        hires_color(palette_first, palette::ORANGE, palette::GREEN),
                        hires_color(palette_second, palette::ORANGE, palette::GREEN),
                    ),
                    (true, false) => (
                        hires_color(palette_first, palette::BLUE, palette::VIOLET),
                        hires_color(palette_second, palette::BLUE, palette::VIOLET),
                    ),
                    (false, false) => (palette::BLACK, palette::BLACK),
                };

                // The byte boundary falls inside pair 3
                let even_color = if pair > 3 { color_second } else { color_first };
                let odd_color = if pair > 2 { color_second } else { color_first };

                let y = row * CELL_HEIGHT + line;
                let x = col * CELL_WIDTH + pair * 2;
                self.frame
                    .set(y, x, if even { even_color } else { palette::BLACK });
                self.frame
                    .set(y, x + 1, if odd { odd_color } else { palette::BLACK });
            }
        }
    }
}

fn hires_color(palette_bit: bool, set: u8, clear: u8) -> u8 {
    if palette_bit {
        set
    } else {
        clear
    }
}

fn byte(memory: &[u8], addr: usize) -> u8 {
    memory.get(addr).copied().unwrap_or(0)
}
