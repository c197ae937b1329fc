//! Memory-mapped I/O for the Raquette machine.
//!
//! `RaquetteBus` wraps the 64 KiB backing store and intercepts the
//! program-visible paths of the `MemoryBus` trait:
//!
//! - **ROM**: stores at or above `0xC000` never reach memory
//! - **Video memory**: stores into the text/lo-res pages (`0x0400-0x0BFF`) or
//!   the hi-res pages (`0x2000-0x5FFF`) mark the screen dirty
//! - **Keyboard**: any access to `0xC001-0xC010` clears the key strobe
//! - **Soft switches**: any access to `0xC050-0xC057` changes the display mode
//!
//! Raw `read`/`write` have no side effects; they back stack traffic, image
//! loading and host-side inspection.
//!
//! # Example
//!
//! ```rust
//! use raquette::{MemoryBus, RaquetteBus};
//!
//! let mut bus = RaquetteBus::new(&[]).unwrap();
//! bus.take_dirty();
//!
//! // Switch to graphics mode; the stored value is irrelevant
//! bus.store(0xC050, 0x00).unwrap();
//! assert!(bus.switches().graphics);
//! assert!(bus.screen_dirty());
//! ```

use crate::{ConfigError, ExecutionError, Memory, MemoryBus, MEMORY_SIZE, ROM_BOUNDARY};

pub mod keyboard;
pub mod soft_switches;

pub use soft_switches::{SoftSwitch, SoftSwitches};

/// Text and lo-res pages 1 and 2.
pub const TEXT_PAGES: std::ops::RangeInclusive<u16> = 0x0400..=0x0BFF;

/// Hi-res pages 1 and 2.
pub const HIRES_PAGES: std::ops::RangeInclusive<u16> = 0x2000..=0x5FFF;

/// True if a store to `addr` changes what the compositor draws.
pub fn is_video_address(addr: u16) -> bool {
    TEXT_PAGES.contains(&addr) || HIRES_PAGES.contains(&addr)
}

/// The Raquette memory map: 64 KiB of memory plus display and keyboard state.
#[derive(Debug, Clone)]
pub struct RaquetteBus {
    memory: Memory,
    switches: SoftSwitches,
    screen_dirty: bool,
}

impl RaquetteBus {
    /// Creates the bus with `image` loaded at address 0.
    ///
    /// The screen starts dirty so the first render always draws.
    pub fn new(image: &[u8]) -> Result<Self, ConfigError> {
        Ok(Self {
            memory: Memory::with_image(MEMORY_SIZE, image)?,
            switches: SoftSwitches::default(),
            screen_dirty: true,
        })
    }

    /// Backing memory.
    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Mutable backing memory, for host-side loading.
    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    /// Current display mode.
    pub fn switches(&self) -> SoftSwitches {
        self.switches
    }

    /// True if the screen needs a redraw.
    pub fn screen_dirty(&self) -> bool {
        self.screen_dirty
    }

    /// Returns the dirty flag and clears it.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.screen_dirty, false)
    }

    /// Returns the display mode to power-on state and forces a redraw.
    pub fn reset_display(&mut self) {
        self.switches = SoftSwitches::default();
        self.screen_dirty = true;
    }
}

impl MemoryBus for RaquetteBus {
    fn read(&self, addr: u16) -> Result<u8, ExecutionError> {
        self.memory.get(addr as usize)
    }

    fn write(&mut self, addr: u16, value: u8) -> Result<(), ExecutionError> {
        self.memory.set(addr as usize, value)
    }

    fn access(&mut self, addr: u16) -> Result<(), ExecutionError> {
        if keyboard::in_strobe_window(addr) {
            return self.clear_strobe();
        }

        if let Some(switch) = SoftSwitch::from_address(addr) {
            log::debug!("Soft switch {:04X}: {:?}", addr, switch);
            self.switches.apply(switch);
            if switch.forces_redraw() {
                self.screen_dirty = true;
            }
        }

        Ok(())
    }

    fn store(&mut self, addr: u16, value: u8) -> Result<(), ExecutionError> {
        if addr < ROM_BOUNDARY {
            self.memory.set(addr as usize, value)?;
            if is_video_address(addr) {
                self.screen_dirty = true;
            }
        } else {
            log::debug!("Store of {:02X} to {:04X} suppressed", value, addr);
        }

        self.access(addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean_bus() -> RaquetteBus {
        let mut bus = RaquetteBus::new(&[]).unwrap();
        bus.take_dirty();
        bus
    }

    #[test]
    fn test_starts_dirty() {
        let mut bus = RaquetteBus::new(&[]).unwrap();
        assert!(bus.take_dirty());
        assert!(!bus.take_dirty());
    }

    #[test]
    fn test_rom_store_suppressed() {
        let mut bus = clean_bus();
        bus.write(0xD000, 0x11).unwrap();

        bus.store(0xD000, 0x22).unwrap();
        assert_eq!(bus.read(0xD000).unwrap(), 0x11);

        bus.store(0xBFFF, 0x33).unwrap();
        assert_eq!(bus.read(0xBFFF).unwrap(), 0x33);
    }

    #[test]
    fn test_video_windows_mark_dirty() {
        for addr in [0x0400, 0x0BFF, 0x2000, 0x5FFF] {
            let mut bus = clean_bus();
            bus.store(addr, 1).unwrap();
            assert!(bus.screen_dirty(), "{:04X} should mark dirty", addr);
        }

        for addr in [0x03FF, 0x0C00, 0x1FFF, 0x6000] {
            let mut bus = clean_bus();
            bus.store(addr, 1).unwrap();
            assert!(!bus.screen_dirty(), "{:04X} should not mark dirty", addr);
        }
    }

    #[test]
    fn test_raw_write_has_no_side_effects() {
        let mut bus = clean_bus();
        bus.write(0x0400, 0x41).unwrap();
        bus.write(0xC050, 0x00).unwrap();
        assert!(!bus.screen_dirty());
        assert!(!bus.switches().graphics);
    }

    #[test]
    fn test_only_text_graphics_switches_dirty() {
        let mut bus = clean_bus();

        for addr in [0xC052, 0xC053, 0xC054, 0xC055, 0xC056, 0xC057] {
            bus.access(addr).unwrap();
            assert!(!bus.screen_dirty(), "{:04X} should not mark dirty", addr);
        }

        bus.access(0xC051).unwrap();
        assert!(bus.take_dirty());
        bus.access(0xC050).unwrap();
        assert!(bus.take_dirty());
    }

    #[test]
    fn test_strobe_access_clears_bit_seven() {
        let mut bus = clean_bus();
        bus.press_key(b'Q').unwrap();

        bus.access(0xC000).unwrap();
        assert!(bus.key_pending().unwrap());

        bus.access(0xC010).unwrap();
        assert_eq!(bus.read(0xC000).unwrap(), b'Q');
    }

    #[test]
    fn test_reset_display() {
        let mut bus = clean_bus();
        bus.access(0xC050).unwrap();
        bus.access(0xC057).unwrap();
        bus.take_dirty();

        bus.reset_display();
        assert_eq!(bus.switches(), SoftSwitches::default());
        assert!(bus.screen_dirty());
    }
}
