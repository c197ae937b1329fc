//! The assembled Raquette machine.
//!
//! `Raquette` wires the CPU to the memory-mapped `RaquetteBus` and owns the
//! display compositor. A host drives it by calling `step()` or `run_for()`
//! and, on its own cadence, `render()`.

use crate::display::{Compositor, FrameBuffer};
use crate::{
    ConfigError, CpuCore, ExecutionError, RaquetteBus, Registers, SoftSwitches, StepOutcome, CPU,
};

/// Construction-time settings for `Raquette`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaquetteConfig {
    /// Program counter value at which stepping pauses
    pub breakpoint: Option<u16>,

    /// Average instructions executed per microsecond, used by `run_for`
    pub instructions_per_microsecond: f64,
}

impl Default for RaquetteConfig {
    fn default() -> Self {
        Self {
            breakpoint: None,
            // ~2.3 cycles per instruction at 1 MHz
            instructions_per_microsecond: 0.43,
        }
    }
}

impl RaquetteConfig {
    /// Checks the settings.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidRate` if the instruction rate is not finite and
    /// positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rate = self.instructions_per_microsecond;
        if !rate.is_finite() || rate <= 0.0 {
            return Err(ConfigError::InvalidRate(rate));
        }
        Ok(())
    }
}

/// The Raquette microcomputer: 64 KiB address space, ROM above `0xC000`,
/// soft-switch display modes and a keyboard latch.
///
/// # Examples
///
/// ```
/// use raquette::{Raquette, RaquetteConfig, StepOutcome};
///
/// // Monitor-style ROM at 0xF000 with the reset vector pointing into it
/// let mut rom = vec![0xEA; 0x1000];
/// rom[0xFFC] = 0x00;
/// rom[0xFFD] = 0xF0;
///
/// let mut machine = Raquette::with_rom(&rom, 0xF000, RaquetteConfig::default()).unwrap();
/// assert_eq!(machine.registers().pc, 0xF000);
///
/// assert_eq!(machine.step(false).unwrap(), StepOutcome::Continue);
/// assert_eq!(machine.registers().pc, 0xF001);
/// ```
pub struct Raquette {
    cpu: CPU<RaquetteBus>,
    compositor: Compositor,
    config: RaquetteConfig,
}

impl Raquette {
    /// Builds a machine with `image` loaded at address 0.
    ///
    /// The reset vector is read from the image, so an image shorter than
    /// `0xFFFE` bytes starts at address 0.
    pub fn new(image: &[u8], config: RaquetteConfig) -> Result<Self, ConfigError> {
        Self::build(RaquetteBus::new(image)?, config)
    }

    /// Builds a machine with `rom` loaded at `base` and the rest of memory
    /// zeroed.
    pub fn with_rom(rom: &[u8], base: u16, config: RaquetteConfig) -> Result<Self, ConfigError> {
        let mut bus = RaquetteBus::new(&[])?;
        bus.memory_mut().load(base as usize, rom)?;
        Self::build(bus, config)
    }

    fn build(bus: RaquetteBus, config: RaquetteConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let size = bus.memory().len();
        let mut cpu =
            CPU::new(bus).map_err(|_| ConfigError::ResetVectorOutOfRange { size })?;
        cpu.set_breakpoint(config.breakpoint);

        log::info!(
            "Raquette ready, reset vector {:04X}, breakpoint {:?}",
            cpu.pc(),
            config.breakpoint
        );

        Ok(Self {
            cpu,
            compositor: Compositor::new(),
            config,
        })
    }

    /// Executes one instruction.
    pub fn step(&mut self, verbose: bool) -> Result<StepOutcome, ExecutionError> {
        self.cpu.step(verbose)
    }

    /// Executes roughly as many instructions as fit in `microseconds` at the
    /// configured rate, stopping early on a breakpoint.
    pub fn run_for(&mut self, microseconds: u64) -> Result<StepOutcome, ExecutionError> {
        let count = (microseconds as f64 * self.config.instructions_per_microsecond) as u64;
        self.cpu.run(count)
    }

    /// Redraws the frame if video memory or the display mode changed.
    pub fn render(&mut self) -> bool {
        self.compositor.render(self.cpu.memory_mut())
    }

    /// The last rendered frame.
    pub fn frame(&self) -> &FrameBuffer {
        self.compositor.frame()
    }

    /// Register snapshot.
    pub fn registers(&self) -> Registers {
        self.cpu.registers()
    }

    /// Current display mode.
    pub fn switches(&self) -> SoftSwitches {
        self.cpu.memory().switches()
    }

    /// Injects a key press into the keyboard latch.
    pub fn press_key(&mut self, key: u8) -> Result<(), ExecutionError> {
        self.cpu.memory_mut().press_key(key)
    }

    /// Injects Return.
    pub fn press_enter(&mut self) -> Result<(), ExecutionError> {
        self.cpu.memory_mut().press_enter()
    }

    /// Clears an already-consumed key from the latch.
    pub fn release_key(&mut self) -> Result<(), ExecutionError> {
        self.cpu.memory_mut().release_key()
    }

    pub fn cpu(&self) -> &CPU<RaquetteBus> {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut CPU<RaquetteBus> {
        &mut self.cpu
    }

    pub fn bus(&self) -> &RaquetteBus {
        self.cpu.memory()
    }

    pub fn config(&self) -> &RaquetteConfig {
        &self.config
    }
}

impl CpuCore for Raquette {
    type Registers = Registers;

    fn step(&mut self, verbose: bool) -> Result<StepOutcome, ExecutionError> {
        Raquette::step(self, verbose)
    }

    fn registers(&self) -> Registers {
        Raquette::registers(self)
    }

    /// Resets the CPU and the display mode; memory is kept.
    fn reset(&mut self) -> Result<(), ExecutionError> {
        self.cpu.memory_mut().reset_display();
        self.cpu.reset()
    }

    fn dump_memory(&self, start: usize, len: usize) -> Result<Vec<u8>, ExecutionError> {
        self.cpu.dump_memory(start, len)
    }
}
