//! Keyboard latch at `0xC000`.
//!
//! The host injects a key by storing its code with bit 7 set. The program
//! polls the latch and acknowledges the key by touching the strobe window
//! `0xC001..=0xC010`, which clears bit 7. Accessing `0xC000` itself does not
//! clear the strobe.

use super::RaquetteBus;
use crate::{ExecutionError, KEYBOARD_DATA, KEY_ENTER};

/// First address of the strobe-clear window (0xC000 itself is excluded).
pub const STROBE_FIRST: u16 = 0xC001;

/// Last address of the strobe-clear window.
pub const STROBE_LAST: u16 = 0xC010;

/// Bit 7 of the latch: a key is waiting.
pub const KEY_PENDING: u8 = 0b1000_0000;

/// True if an access to `addr` clears the keyboard strobe.
pub fn in_strobe_window(addr: u16) -> bool {
    (STROBE_FIRST..=STROBE_LAST).contains(&addr)
}

impl RaquetteBus {
    /// Raw latch contents.
    pub fn keyboard_latch(&self) -> Result<u8, ExecutionError> {
        self.memory.get(KEYBOARD_DATA as usize)
    }

    /// Injects a key press; the program sees `key | 0x80` at 0xC000.
    pub fn press_key(&mut self, key: u8) -> Result<(), ExecutionError> {
        log::debug!("Key {:02X} pressed", key);
        self.memory.set(KEYBOARD_DATA as usize, key | KEY_PENDING)
    }

    /// Injects Return (0x0D).
    pub fn press_enter(&mut self) -> Result<(), ExecutionError> {
        self.press_key(KEY_ENTER)
    }

    /// True while a pressed key has not been acknowledged.
    pub fn key_pending(&self) -> Result<bool, ExecutionError> {
        Ok(self.keyboard_latch()? & KEY_PENDING != 0)
    }

    /// Host-side "no keys down": zeroes the latch once the program has
    /// already acknowledged the key. A still-pending key is left alone.
    pub fn release_key(&mut self) -> Result<(), ExecutionError> {
        if !self.key_pending()? {
            self.memory.set(KEYBOARD_DATA as usize, 0)?;
        }
        Ok(())
    }

    /// Clears bit 7 of the latch.
    pub(crate) fn clear_strobe(&mut self) -> Result<(), ExecutionError> {
        let latch = self.keyboard_latch()?;
        if latch & KEY_PENDING != 0 {
            log::debug!("Keyboard strobe cleared ({:02X})", latch);
        }
        self.memory
            .set(KEYBOARD_DATA as usize, latch & !KEY_PENDING)
    }
}
