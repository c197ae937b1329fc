//! # Raquette Emulator Core
//!
//! A 6502-inspired microcomputer emulator: a table-driven CPU core, a
//! memory-mapped I/O layer (soft switches, keyboard latch, video memory) and a
//! display compositor that turns video memory into a 280x192 pixel buffer.
//!
//! ## Quick Start
//!
//! ```rust
//! use raquette::{CpuCore, Raquette, RaquetteConfig, StepOutcome};
//!
//! // SEC; LDA $08; ADC $09; STA $0A; BRK
//! let image = [0x38, 0xA5, 0x08, 0x65, 0x09, 0x85, 0x0A, 0x00, 0xD0, 0x90, 0x00];
//!
//! // Reset vector is zero, so execution starts at 0x0000
//! let mut machine = Raquette::new(&image, RaquetteConfig::default()).unwrap();
//!
//! for _ in 0..4 {
//!     assert_eq!(machine.step(false).unwrap(), StepOutcome::Continue);
//! }
//! assert_eq!(machine.dump_memory(0x0A, 1).unwrap(), vec![0x61]);
//! ```
//!
//! ## Architecture
//!
//! - **Memory**: `Memory` is a bounds-checked byte array behind the `MemoryBus` trait
//! - **CPU**: `CPU<M>` owns the register file and the bus; `step()` runs one instruction
//! - **Dispatcher**: `RaquetteBus` intercepts soft switches, the keyboard strobe,
//!   video-memory writes and ROM writes
//! - **Compositor**: `Compositor` renders text, lo-res and hi-res memory on demand
//! - **Machines**: `Raquette` (the 6502-like machine) and `ToyComputer` both
//!   implement the `CpuCore` capability
//!
//! ## Modules
//!
//! - `cpu` - CPU state, effective-address resolution and the execution loop
//! - `memory` - MemoryBus trait and the backing store
//! - `opcodes` - Opcode table
//! - `addressing` - Addressing mode enumeration and decoding
//! - `devices` - Memory-mapped I/O dispatcher
//! - `display` - Display compositor, font and palette
//! - `machine` - The assembled Raquette machine
//! - `toy` - The minimal configurable toy machine

pub mod addressing;
pub mod cpu;
pub mod devices;
pub mod display;
pub mod machine;
pub mod memory;
pub mod opcodes;
pub mod toy;

#[cfg(feature = "wasm")]
pub mod wasm;

// Internal instruction implementations (not part of public API)
mod instructions;

pub use addressing::AddressingMode;
pub use cpu::{Registers, CPU};
pub use devices::{RaquetteBus, SoftSwitches};
pub use display::{Compositor, FrameBuffer, Rgb, PALETTE, SCREEN_HEIGHT, SCREEN_WIDTH};
pub use machine::{Raquette, RaquetteConfig};
pub use memory::{Memory, MemoryBus};
pub use opcodes::{Mnemonic, OpcodeMetadata, OPCODE_TABLE};
pub use toy::{ToyComputer, ToyConfig, ToyRegisters};

/// Size of the Raquette address space.
pub const MEMORY_SIZE: usize = 0x1_0000;

/// Stores at or above this address never reach backing memory.
pub const ROM_BOUNDARY: u16 = 0xC000;

/// Little-endian reset vector read at construction.
pub const RESET_VECTOR: u16 = 0xFFFC;

/// Little-endian interrupt vector loaded by BRK.
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Base of the hardware stack page.
pub const STACK_PAGE: u16 = 0x0100;

/// Keyboard data latch; bit 7 set means a new key is waiting.
pub const KEYBOARD_DATA: u16 = 0xC000;

/// Key code the machine expects for Return.
pub const KEY_ENTER: u8 = 0x0D;

/// Errors that can occur during CPU execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    /// The byte at `address` is not an instruction of this machine.
    ///
    /// Machine state is left untouched; the program counter still points at
    /// the offending byte.
    UndefinedOpcode {
        /// The opcode byte that could not be decoded
        opcode: u8,
        /// Address the opcode was fetched from
        address: u16,
    },

    /// An access fell outside the configured memory.
    AddressOutOfRange {
        /// The address that was requested
        address: usize,
        /// Size of the memory in bytes
        size: usize,
    },
}

impl std::fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ExecutionError::UndefinedOpcode { opcode, address } => {
                write!(
                    f,
                    "Undefined instruction 0x{:02X} at address 0x{:04X}",
                    opcode, address
                )
            }
            ExecutionError::AddressOutOfRange { address, size } => {
                write!(
                    f,
                    "Address 0x{:X} is outside memory of {} bytes",
                    address, size
                )
            }
        }
    }
}

impl std::error::Error for ExecutionError {}

/// Errors returned when a machine is constructed with malformed arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Memory must contain at least one byte.
    ZeroSize,

    /// The initial image does not fit in memory.
    ImageTooLarge {
        /// Length of the supplied image
        len: usize,
        /// Bytes available from the load address
        capacity: usize,
    },

    /// Word width (in bytes) outside 1..=8.
    WordWidthOutOfRange(usize),

    /// More registers than the toy machine can address.
    TooManyRegisters(usize),

    /// Word count times word width does not fit in the address space.
    MemoryTooLarge {
        /// Requested number of words
        words: usize,
        /// Bytes per word
        word_width: usize,
    },

    /// Instruction rate must be finite and positive.
    InvalidRate(f64),

    /// Memory is too small to hold the reset vector.
    ResetVectorOutOfRange {
        /// Size of the memory in bytes
        size: usize,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ConfigError::ZeroSize => write!(f, "Memory size must be non-zero"),
            ConfigError::ImageTooLarge { len, capacity } => write!(
                f,
                "Initial image of {} bytes does not fit in {} bytes of memory",
                len, capacity
            ),
            ConfigError::WordWidthOutOfRange(width) => {
                write!(f, "Word width of {} bytes is outside 1..=8", width)
            }
            ConfigError::TooManyRegisters(count) => {
                write!(f, "{} registers requested, at most 256 supported", count)
            }
            ConfigError::MemoryTooLarge { words, word_width } => write!(
                f,
                "{} words of {} bytes exceed the addressable memory",
                words, word_width
            ),
            ConfigError::InvalidRate(rate) => {
                write!(f, "Instruction rate {} must be finite and positive", rate)
            }
            ConfigError::ResetVectorOutOfRange { size } => write!(
                f,
                "Reset vector at 0x{:04X} is outside memory of {} bytes",
                RESET_VECTOR, size
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Why a machine stopped executing without faulting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltReason {
    /// The program counter left the configured memory.
    ProgramCounterOutOfRange {
        /// Program counter after the last instruction
        pc: usize,
    },

    /// A halt instruction was executed.
    Halt {
        /// Opcode that stopped the machine
        opcode: u8,
        /// Address of the opcode
        address: usize,
    },
}

/// Result of a single successful `step()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The instruction completed; the machine can keep running.
    Continue,
    /// The machine stopped on its own.
    Halted(HaltReason),
    /// The program counter reached the configured breakpoint.
    Breakpoint,
}

/// Capability shared by every machine variant.
///
/// Each variant keeps its own register layout; `Registers` is a snapshot type
/// suitable for display and comparison.
pub trait CpuCore {
    /// Register snapshot type for this machine.
    type Registers: std::fmt::Debug + Clone + PartialEq;

    /// Executes exactly one instruction.
    fn step(&mut self, verbose: bool) -> Result<StepOutcome, ExecutionError>;

    /// Returns a read-only snapshot of registers, flags and program counter.
    fn registers(&self) -> Self::Registers;

    /// Returns registers to their power-on state, keeping memory.
    fn reset(&mut self) -> Result<(), ExecutionError>;

    /// Copies `len` bytes of memory starting at `start`.
    fn dump_memory(&self, start: usize, len: usize) -> Result<Vec<u8>, ExecutionError>;
}
