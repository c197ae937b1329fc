//! # Memory Bus Abstraction
//!
//! This module provides the `MemoryBus` trait that decouples the CPU from specific
//! memory implementations, and `Memory`, the bounds-checked backing store every
//! machine in this crate is built on.
//!
//! ## Design Principles
//!
//! - Every access is checked against the configured size; an address past the
//!   end is an `ExecutionError::AddressOutOfRange`, never a silent wrap
//! - `read`/`write` are raw accesses with no side effects
//! - `access`/`store` are the program-visible paths a memory-mapped dispatcher
//!   hooks into (soft switches, ROM write suppression, video dirtiness)

use crate::{ConfigError, ExecutionError};

/// Memory bus trait for CPU to read/write bytes.
///
/// Implementations of this trait provide the memory backend for the CPU.
/// The CPU accesses all memory (RAM, ROM, I/O) through this abstraction.
///
/// # Examples
///
/// ```
/// use raquette::{Memory, MemoryBus};
///
/// let mut mem = Memory::new(0x1_0000).unwrap();
///
/// mem.write(0x1234, 0x42).unwrap();
/// assert_eq!(mem.read(0x1234).unwrap(), 0x42);
/// ```
///
/// ## Implementing Custom Memory
///
/// ```
/// use raquette::{ExecutionError, MemoryBus};
///
/// struct RomRamMemory {
///     ram: [u8; 0x8000],
///     rom: [u8; 0x8000],
/// }
///
/// impl MemoryBus for RomRamMemory {
///     fn read(&self, addr: u16) -> Result<u8, ExecutionError> {
///         if addr < 0x8000 {
///             Ok(self.ram[addr as usize])
///         } else {
///             Ok(self.rom[(addr - 0x8000) as usize])
///         }
///     }
///
///     fn write(&mut self, addr: u16, value: u8) -> Result<(), ExecutionError> {
///         if addr < 0x8000 {
///             self.ram[addr as usize] = value;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait MemoryBus {
    /// Reads a byte from the specified 16-bit address.
    ///
    /// # Errors
    ///
    /// Returns `ExecutionError::AddressOutOfRange` if the address is not backed
    /// by memory.
    fn read(&self, addr: u16) -> Result<u8, ExecutionError>;

    /// Writes a byte to the specified 16-bit address, bypassing any device
    /// side effects.
    ///
    /// Used for stack pushes and for loading images.
    fn write(&mut self, addr: u16, value: u8) -> Result<(), ExecutionError>;

    /// Notifies the bus that an instruction resolved an effective address.
    ///
    /// Called once per memory-operand instruction, after the operand has been
    /// read. Devices that react to accesses (soft switches, strobes) hook in
    /// here. The default does nothing.
    fn access(&mut self, _addr: u16) -> Result<(), ExecutionError> {
        Ok(())
    }

    /// Program-visible store: write the byte then signal the access.
    ///
    /// Buses with read-only regions or memory-mapped devices override this.
    fn store(&mut self, addr: u16, value: u8) -> Result<(), ExecutionError> {
        self.write(addr, value)?;
        self.access(addr)
    }
}

/// Flat, bounds-checked byte memory.
///
/// The size is fixed at construction. Addresses are `usize` so the same store
/// backs both the 64 KiB Raquette address space and toy machines whose memory
/// is sized in multi-byte words.
///
/// # Examples
///
/// ```
/// use raquette::{Memory, MemoryBus};
///
/// // Reset vector 0x8000, program at 0x8000
/// let mut memory = Memory::new(0x1_0000).unwrap();
/// memory.load(0xFFFC, &[0x00, 0x80]).unwrap();
/// memory.load(0x8000, &[0xEA]).unwrap();
///
/// assert_eq!(memory.read(0x8000).unwrap(), 0xEA);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory {
    data: Vec<u8>,
}

impl Memory {
    /// Creates zeroed memory of `size` bytes.
    ///
    /// # Errors
    ///
    /// `ConfigError::ZeroSize` if `size` is 0.
    pub fn new(size: usize) -> Result<Self, ConfigError> {
        if size == 0 {
            return Err(ConfigError::ZeroSize);
        }
        Ok(Self {
            data: vec![0; size],
        })
    }

    /// Creates zeroed memory of `size` bytes with `image` copied in at address 0.
    ///
    /// # Errors
    ///
    /// `ConfigError::ImageTooLarge` if the image is longer than the memory.
    pub fn with_image(size: usize, image: &[u8]) -> Result<Self, ConfigError> {
        let mut memory = Self::new(size)?;
        memory.load(0, image)?;
        Ok(memory)
    }

    /// Copies `bytes` into memory starting at `base`.
    ///
    /// # Errors
    ///
    /// `ConfigError::ImageTooLarge` if `base` lies past the end of memory or
    /// the bytes do not fit between `base` and the end. Memory is left
    /// untouched in that case.
    pub fn load(&mut self, base: usize, bytes: &[u8]) -> Result<(), ConfigError> {
        let capacity = self.data.len().saturating_sub(base);
        let slot = base
            .checked_add(bytes.len())
            .and_then(|end| self.data.get_mut(base..end))
            .ok_or(ConfigError::ImageTooLarge {
                len: bytes.len(),
                capacity,
            })?;
        slot.copy_from_slice(bytes);
        Ok(())
    }

    /// Size of the memory in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false; zero-sized memory cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Reads the byte at `addr`.
    pub fn get(&self, addr: usize) -> Result<u8, ExecutionError> {
        self.data
            .get(addr)
            .copied()
            .ok_or_else(|| self.out_of_range(addr))
    }

    /// Writes the byte at `addr`.
    pub fn set(&mut self, addr: usize, value: u8) -> Result<(), ExecutionError> {
        let size = self.data.len();
        match self.data.get_mut(addr) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(ExecutionError::AddressOutOfRange {
                address: addr,
                size,
            }),
        }
    }

    /// Borrows `len` bytes starting at `start`.
    pub fn slice(&self, start: usize, len: usize) -> Result<&[u8], ExecutionError> {
        let end = start
            .checked_add(len)
            .filter(|end| *end <= self.data.len())
            .ok_or_else(|| self.out_of_range(start.saturating_add(len).saturating_sub(1)))?;
        Ok(&self.data[start..end])
    }

    /// The whole backing store.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Copies `len` bytes starting at `start`.
    pub fn dump(&self, start: usize, len: usize) -> Result<Vec<u8>, ExecutionError> {
        self.slice(start, len).map(|bytes| bytes.to_vec())
    }

    /// Formats `len` bytes starting at `start` as 16-byte hex rows.
    ///
    /// ```
    /// use raquette::Memory;
    ///
    /// let memory = Memory::with_image(32, &[0xA9, 0x42]).unwrap();
    /// let text = memory.hex_dump(0, 4).unwrap();
    /// assert_eq!(text, "0000: A9 42 00 00\n");
    /// ```
    pub fn hex_dump(&self, start: usize, len: usize) -> Result<String, ExecutionError> {
        let bytes = self.slice(start, len)?;
        let mut out = String::new();
        for (row, chunk) in bytes.chunks(16).enumerate() {
            let cells: Vec<String> = chunk.iter().map(|b| format!("{:02X}", b)).collect();
            out.push_str(&format!("{:04X}: {}\n", start + row * 16, cells.join(" ")));
        }
        Ok(out)
    }

    fn out_of_range(&self, addr: usize) -> ExecutionError {
        ExecutionError::AddressOutOfRange {
            address: addr,
            size: self.data.len(),
        }
    }
}

impl MemoryBus for Memory {
    fn read(&self, addr: u16) -> Result<u8, ExecutionError> {
        self.get(addr as usize)
    }

    fn write(&mut self, addr: u16, value: u8) -> Result<(), ExecutionError> {
        self.set(addr as usize, value)
    }
}
