//! The toy computer: a minimal word-addressed machine with a configurable word
//! width, memory size and register count.
//!
//! Only the first byte of each word is decoded. Opcodes `0..=4` are defined
//! (and currently have no effect beyond advancing PC); any other opcode halts
//! the machine. Running off the end of memory also halts it.

use crate::{ConfigError, CpuCore, ExecutionError, HaltReason, Memory, StepOutcome};

/// Highest defined toy opcode.
pub const LAST_OPCODE: u8 = 4;

/// Shape of a toy machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToyConfig {
    /// Bytes per word and per register (1..=8)
    pub word_width: usize,

    /// Number of words of memory
    pub words: usize,

    /// Number of registers (at most 256)
    pub registers: usize,
}

impl Default for ToyConfig {
    fn default() -> Self {
        Self {
            word_width: 1,
            words: 64,
            registers: 2,
        }
    }
}

impl ToyConfig {
    /// Checks the shape and returns the memory size in bytes.
    pub fn validate(&self) -> Result<usize, ConfigError> {
        if !(1..=8).contains(&self.word_width) {
            return Err(ConfigError::WordWidthOutOfRange(self.word_width));
        }
        if self.words == 0 {
            return Err(ConfigError::ZeroSize);
        }
        if self.registers > 256 {
            return Err(ConfigError::TooManyRegisters(self.registers));
        }
        self.words
            .checked_mul(self.word_width)
            .ok_or(ConfigError::MemoryTooLarge {
                words: self.words,
                word_width: self.word_width,
            })
    }
}

/// Register snapshot of a toy machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToyRegisters {
    /// Program counter, in words
    pub pc: usize,

    /// Bytes per register
    pub word_width: usize,

    /// Register contents, `word_width` bytes each
    pub bytes: Vec<u8>,
}

impl ToyRegisters {
    /// Bytes of register `index`.
    pub fn register(&self, index: usize) -> Option<&[u8]> {
        let start = index.checked_mul(self.word_width)?;
        let end = start.checked_add(self.word_width)?;
        self.bytes.get(start..end)
    }

    /// Number of registers.
    pub fn count(&self) -> usize {
        self.bytes.len() / self.word_width.max(1)
    }
}

impl std::fmt::Display for ToyRegisters {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "pc: {} regs: ", self.pc)?;
        for register in self.bytes.chunks(self.word_width.max(1)) {
            write!(f, "(")?;
            for byte in register {
                write!(f, "{},", byte)?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

/// A toy machine instance.
///
/// # Examples
///
/// ```
/// use raquette::{CpuCore, HaltReason, StepOutcome, ToyComputer, ToyConfig};
///
/// let config = ToyConfig { word_width: 1, words: 4, registers: 1 };
/// let mut toy = ToyComputer::new(config, &[0, 1, 9]).unwrap();
///
/// assert_eq!(toy.step(false).unwrap(), StepOutcome::Continue);
/// assert_eq!(toy.step(false).unwrap(), StepOutcome::Continue);
/// assert_eq!(
///     toy.step(false).unwrap(),
///     StepOutcome::Halted(HaltReason::Halt { opcode: 9, address: 2 })
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ToyComputer {
    config: ToyConfig,
    memory: Memory,
    registers: Vec<u8>,
    pc: usize,
}

impl ToyComputer {
    /// Builds a toy machine with `image` copied to the start of memory. A
    /// short image is zero padded.
    pub fn new(config: ToyConfig, image: &[u8]) -> Result<Self, ConfigError> {
        let size = config.validate()?;
        Ok(Self {
            config,
            memory: Memory::with_image(size, image)?,
            registers: vec![0; config.registers * config.word_width],
            pc: 0,
        })
    }

    pub fn config(&self) -> &ToyConfig {
        &self.config
    }

    pub fn pc(&self) -> usize {
        self.pc
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Memory as one line per word, bytes separated by commas.
    pub fn word_dump(&self) -> String {
        let mut out = String::new();
        for word in self.memory.as_slice().chunks(self.config.word_width) {
            for byte in word {
                out.push_str(&format!("{},", byte));
            }
            out.push('\n');
        }
        out
    }
}

impl CpuCore for ToyComputer {
    type Registers = ToyRegisters;

    fn step(&mut self, verbose: bool) -> Result<StepOutcome, ExecutionError> {
        let width = self.config.word_width;
        let address = match self.pc.checked_mul(width) {
            Some(address) if address < self.memory.len() => address,
            _ => {
                return Ok(StepOutcome::Halted(HaltReason::ProgramCounterOutOfRange {
                    pc: self.pc,
                }))
            }
        };

        let opcode = self.memory.get(address)?;
        if opcode > LAST_OPCODE {
            log::info!("instr ? HALT ({:02X} at word {})", opcode, self.pc);
            return Ok(StepOutcome::Halted(HaltReason::Halt { opcode, address }));
        }

        if verbose {
            log::info!("instr {}", opcode);
        } else {
            log::trace!("instr {}", opcode);
        }

        self.pc += 1;
        if self.pc >= self.config.words {
            return Ok(StepOutcome::Halted(HaltReason::ProgramCounterOutOfRange {
                pc: self.pc,
            }));
        }
        Ok(StepOutcome::Continue)
    }

    fn registers(&self) -> ToyRegisters {
        ToyRegisters {
            pc: self.pc,
            word_width: self.config.word_width,
            bytes: self.registers.clone(),
        }
    }

    fn reset(&mut self) -> Result<(), ExecutionError> {
        self.registers.iter_mut().for_each(|b| *b = 0);
        self.pc = 0;
        Ok(())
    }

    fn dump_memory(&self, start: usize, len: usize) -> Result<Vec<u8>, ExecutionError> {
        self.memory.dump(start, len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        let bad_width = ToyConfig {
            word_width: 9,
            ..ToyConfig::default()
        };
        assert_eq!(bad_width.validate(), Err(ConfigError::WordWidthOutOfRange(9)));

        let no_words = ToyConfig {
            words: 0,
            ..ToyConfig::default()
        };
        assert_eq!(no_words.validate(), Err(ConfigError::ZeroSize));

        let too_many = ToyConfig {
            registers: 257,
            ..ToyConfig::default()
        };
        assert_eq!(too_many.validate(), Err(ConfigError::TooManyRegisters(257)));

        let huge = ToyConfig {
            word_width: 8,
            words: usize::MAX,
            registers: 0,
        };
        assert_eq!(
            huge.validate(),
            Err(ConfigError::MemoryTooLarge {
                words: usize::MAX,
                word_width: 8
            })
        );

        assert_eq!(ToyConfig::default().validate(), Ok(64));
    }

    #[test]
    fn test_register_display() {
        let config = ToyConfig {
            word_width: 2,
            words: 4,
            registers: 2,
        };
        let toy = ToyComputer::new(config, &[]).unwrap();
        assert_eq!(toy.registers().to_string(), "pc: 0 regs: (0,0,)(0,0,)");
        assert_eq!(toy.registers().count(), 2);
        assert_eq!(toy.registers().register(1), Some(&[0u8, 0][..]));
        assert_eq!(toy.registers().register(2), None);
        assert_eq!(toy.registers().register(usize::MAX / 2), None);
    }

    #[test]
    fn test_word_dump() {
        let config = ToyConfig {
            word_width: 2,
            words: 2,
            registers: 0,
        };
        let toy = ToyComputer::new(config, &[1, 2, 3]).unwrap();
        assert_eq!(toy.word_dump(), "1,2,\n3,0,\n");
    }

    #[test]
    fn test_image_too_large() {
        let config = ToyConfig {
            word_width: 1,
            words: 2,
            registers: 0,
        };
        assert!(matches!(
            ToyComputer::new(config, &[0, 0, 0]),
            Err(ConfigError::ImageTooLarge { .. })
        ));
    }
}
