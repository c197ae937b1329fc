//! # CPU State and Execution
//!
//! This module contains the CPU struct representing the Raquette processor state,
//! the effective-address resolver and the fetch-decode-execute loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: Accumulator (A), index registers (X, Y)
//! - **Program counter** (PC): 16-bit address of next instruction
//! - **Stack pointer** (SP): 8-bit offset into stack page (0x0100-0x01FF)
//! - **Status flags**: N, V, B, D, I, Z, C (individual bool fields)
//! - **Instruction counter**: number of instructions completed
//!
//! ## Execution Model
//!
//! - `step()`: Execute exactly one instruction
//! - `run()`: Execute up to N instructions, stopping early on a breakpoint
//!
//! `step()` always runs an instruction to completion; there is no
//! mid-instruction suspension point.

use crate::instructions::{
    alu, branches, control, flags, inc_dec, load_store, shifts, stack, transfer,
};
use crate::opcodes::{lookup, Mnemonic, OpcodeMetadata};
use crate::{
    AddressingMode, CpuCore, ExecutionError, MemoryBus, StepOutcome, IRQ_VECTOR, MEMORY_SIZE,
    RESET_VECTOR, STACK_PAGE,
};

/// Raquette CPU state and execution context.
///
/// Generic over the memory implementation via the `MemoryBus` trait, so the same
/// core runs over plain `Memory` in tests and over the memory-mapped
/// `RaquetteBus` in the full machine.
///
/// # Examples
///
/// ```
/// use raquette::{CPU, Memory};
///
/// let mut memory = Memory::new(0x1_0000).unwrap();
/// memory.load(0xFFFC, &[0x00, 0x80]).unwrap();
///
/// let cpu = CPU::new(memory).unwrap();
/// assert_eq!(cpu.pc(), 0x8000);
/// assert_eq!(cpu.sp(), 0xFF);
/// assert!(!cpu.flag_i());
/// ```
pub struct CPU<M: MemoryBus> {
    /// Accumulator register
    pub(crate) a: u8,

    /// X index register
    pub(crate) x: u8,

    /// Y index register
    pub(crate) y: u8,

    /// Program counter (address of next instruction)
    pub(crate) pc: u16,

    /// Stack pointer (0x0100 + sp gives full stack address)
    pub(crate) sp: u8,

    pub(crate) flag_n: bool,
    pub(crate) flag_v: bool,
    pub(crate) flag_b: bool,
    pub(crate) flag_d: bool,
    pub(crate) flag_i: bool,
    pub(crate) flag_z: bool,
    pub(crate) flag_c: bool,

    /// Instructions completed since the last reset
    pub(crate) instructions: u64,

    /// PC value at which stepping stops
    pub(crate) breakpoint: Option<u16>,

    /// Set once a breakpoint has been reported, so the next step resumes
    paused_at: Option<u16>,

    /// Memory bus implementation
    pub(crate) memory: M,
}

/// Read-only snapshot of the register file.
///
/// Formats the way a debugger prints it:
///
/// ```
/// use raquette::Registers;
///
/// let regs = Registers { pc: 0x8000, sp: 0xFF, ..Registers::default() };
/// assert_eq!(
///     regs.to_string(),
///     "pc:8000  acc:0  x:0  y:0  sp:ff\nStatus flags: C0 Z0 I0 D0 B0 V0 N0"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Registers {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub carry: bool,
    pub zero: bool,
    pub interrupt_disable: bool,
    pub decimal: bool,
    pub break_flag: bool,
    pub overflow: bool,
    pub negative: bool,
}

impl std::fmt::Display for Registers {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(
            f,
            "pc:{:x}  acc:{:x}  x:{:x}  y:{:x}  sp:{:x}",
            self.pc, self.a, self.x, self.y, self.sp
        )?;
        write!(
            f,
            "Status flags: C{} Z{} I{} D{} B{} V{} N{}",
            self.carry as u8,
            self.zero as u8,
            self.interrupt_disable as u8,
            self.decimal as u8,
            self.break_flag as u8,
            self.overflow as u8,
            self.negative as u8
        )
    }
}

impl<M: MemoryBus> CPU<M> {
    /// Creates a new CPU with the given memory bus.
    ///
    /// Power-on state:
    /// - A, X, Y are zero and every flag is clear
    /// - SP is 0xFF, so the first push lands on 0x01FF
    /// - PC is read from the little-endian reset vector at 0xFFFC/0xFFFD
    ///
    /// # Errors
    ///
    /// Fails if the bus does not back the reset vector.
    pub fn new(memory: M) -> Result<Self, ExecutionError> {
        let mut cpu = Self {
            a: 0,
            x: 0,
            y: 0,
            pc: 0,
            sp: 0xFF,
            flag_n: false,
            flag_v: false,
            flag_b: false,
            flag_d: false,
            flag_i: false,
            flag_z: false,
            flag_c: false,
            instructions: 0,
            breakpoint: None,
            paused_at: None,
            memory,
        };
        cpu.reset()?;
        Ok(cpu)
    }

    /// Returns registers and flags to their power-on state and reloads PC from
    /// the reset vector. Memory and the breakpoint are kept.
    pub fn reset(&mut self) -> Result<(), ExecutionError> {
        let pc = self.read_word(RESET_VECTOR)?;

        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.sp = 0xFF;
        self.set_status(0);
        self.pc = pc;
        self.instructions = 0;
        self.paused_at = None;
        Ok(())
    }

    /// Executes one instruction and advances the CPU state.
    ///
    /// 1. If PC sits on the breakpoint, report `Breakpoint` without executing.
    ///    The following call executes the instruction normally.
    /// 2. Fetch the opcode and look it up in the opcode table.
    /// 3. Dispatch to the instruction family.
    ///
    /// With `verbose` set every decoded instruction is logged at `info` level;
    /// otherwise the same line goes to `trace`.
    ///
    /// # Errors
    ///
    /// - `UndefinedOpcode` if the byte at PC is not an instruction. No state
    ///   changes; PC still points at the byte.
    /// - `AddressOutOfRange` if the bus rejects an access.
    ///
    /// # Examples
    ///
    /// ```
    /// use raquette::{CPU, Memory, StepOutcome};
    ///
    /// let mut mem = Memory::new(0x1_0000).unwrap();
    /// mem.load(0xFFFC, &[0x00, 0x80]).unwrap();
    /// mem.load(0x8000, &[0xA9, 0x42]).unwrap(); // LDA #$42
    ///
    /// let mut cpu = CPU::new(mem).unwrap();
    /// assert_eq!(cpu.step(false).unwrap(), StepOutcome::Continue);
    /// assert_eq!(cpu.a(), 0x42);
    /// assert_eq!(cpu.pc(), 0x8002);
    /// ```
    pub fn step(&mut self, verbose: bool) -> Result<StepOutcome, ExecutionError> {
        if self.breakpoint == Some(self.pc) && self.paused_at != Some(self.pc) {
            log::info!("Breakpoint hit at {:04X}", self.pc);
            self.paused_at = Some(self.pc);
            return Ok(StepOutcome::Breakpoint);
        }
        self.paused_at = None;

        let opcode = self.memory.read(self.pc)?;
        let metadata = match lookup(opcode) {
            Some(metadata) => metadata,
            None => {
                log::warn!("Undefined instruction {:02X} at {:04X}", opcode, self.pc);
                return Err(ExecutionError::UndefinedOpcode {
                    opcode,
                    address: self.pc,
                });
            }
        };

        if verbose {
            log::info!(
                "{:04X}  {}  {:?}  pc+={}",
                self.pc,
                metadata.mnemonic,
                metadata.addressing_mode,
                metadata.size_bytes
            );
        } else {
            log::trace!(
                "{:04X}  {}  {:?}  pc+={}",
                self.pc,
                metadata.mnemonic,
                metadata.addressing_mode,
                metadata.size_bytes
            );
        }

        self.execute(metadata)?;
        self.instructions += 1;

        Ok(StepOutcome::Continue)
    }

    /// Runs up to `count` instructions.
    ///
    /// Stops early and returns the outcome if a step does not `Continue`.
    pub fn run(&mut self, count: u64) -> Result<StepOutcome, ExecutionError> {
        for _ in 0..count {
            match self.step(false)? {
                StepOutcome::Continue => {}
                outcome => return Ok(outcome),
            }
        }
        Ok(StepOutcome::Continue)
    }

    fn execute(&mut self, metadata: &OpcodeMetadata) -> Result<(), ExecutionError> {
        use Mnemonic::*;

        match metadata.mnemonic {
            Lda => load_store::execute_lda(self, metadata),
            Ldx => load_store::execute_ldx(self, metadata),
            Ldy => load_store::execute_ldy(self, metadata),
            Sta => load_store::execute_sta(self, metadata),
            Stx => load_store::execute_stx(self, metadata),
            Sty => load_store::execute_sty(self, metadata),

            Adc => alu::execute_adc(self, metadata),
            Sbc => alu::execute_sbc(self, metadata),
            And => alu::execute_and(self, metadata),
            Ora => alu::execute_ora(self, metadata),
            Eor => alu::execute_eor(self, metadata),
            Cmp => alu::execute_cmp(self, metadata),
            Cpx => alu::execute_cpx(self, metadata),
            Cpy => alu::execute_cpy(self, metadata),
            Bit => alu::execute_bit(self, metadata),

            Asl => shifts::execute_asl(self, metadata),
            Lsr => shifts::execute_lsr(self, metadata),
            Rol => shifts::execute_rol(self, metadata),
            Ror => shifts::execute_ror(self, metadata),

            Inc => inc_dec::execute_inc(self, metadata),
            Dec => inc_dec::execute_dec(self, metadata),
            Inx => inc_dec::execute_inx(self, metadata),
            Iny => inc_dec::execute_iny(self, metadata),
            Dex => inc_dec::execute_dex(self, metadata),
            Dey => inc_dec::execute_dey(self, metadata),

            Tax => transfer::execute_tax(self, metadata),
            Tay => transfer::execute_tay(self, metadata),
            Txa => transfer::execute_txa(self, metadata),
            Tya => transfer::execute_tya(self, metadata),
            Tsx => transfer::execute_tsx(self, metadata),
            Txs => transfer::execute_txs(self, metadata),

            Pha => stack::execute_pha(self, metadata),
            Php => stack::execute_php(self, metadata),
            Pla => stack::execute_pla(self, metadata),
            Plp => stack::execute_plp(self, metadata),

            Brk => control::execute_brk(self, metadata),
            Jmp => control::execute_jmp(self, metadata),
            Jsr => control::execute_jsr(self, metadata),
            Rts => control::execute_rts(self, metadata),
            Rti => control::execute_rti(self, metadata),
            Nop => control::execute_nop(self, metadata),

            Bcc | Bcs | Beq | Bne | Bmi | Bpl | Bvs | Bvc => {
                branches::execute_branch(self, metadata)
            }

            Clc => flags::execute_clc(self, metadata),
            Sec => flags::execute_sec(self, metadata),
            Cli => flags::execute_cli(self, metadata),
            Sei => flags::execute_sei(self, metadata),
            Cld => flags::execute_cld(self, metadata),
            Sed => flags::execute_sed(self, metadata),
            Clv => flags::execute_clv(self, metadata),
        }
    }

    // ========== Effective Address Resolution ==========

    /// Resolves the effective address of an instruction at the current PC.
    ///
    /// Returns `None` for modes that do not address memory (implicit,
    /// accumulator, relative).
    ///
    /// Wrap rules:
    /// - Zero page indexed modes stay in page 0
    /// - Absolute indexed modes wrap modulo 65536
    /// - The indirect pointer's high byte is read from pointer + 1
    ///
    /// ```
    /// use raquette::{AddressingMode, CPU, Memory};
    ///
    /// let mut mem = Memory::new(0x1_0000).unwrap();
    /// mem.load(0x0000, &[0xB5, 0xFF]).unwrap(); // LDA $FF,X
    ///
    /// let mut cpu = CPU::new(mem).unwrap();
    /// cpu.set_x(0x02);
    /// assert_eq!(cpu.resolve(AddressingMode::ZeroPageX).unwrap(), Some(0x0001));
    /// ```
    pub fn resolve(&self, mode: AddressingMode) -> Result<Option<u16>, ExecutionError> {
        let address = match mode {
            AddressingMode::Implicit | AddressingMode::Accumulator | AddressingMode::Relative => {
                return Ok(None)
            }
            AddressingMode::Immediate => self.pc.wrapping_add(1),
            AddressingMode::ZeroPage => self.operand_byte()? as u16,
            AddressingMode::ZeroPageX => self.operand_byte()?.wrapping_add(self.x) as u16,
            AddressingMode::ZeroPageY => self.operand_byte()?.wrapping_add(self.y) as u16,
            AddressingMode::Absolute => self.operand_word()?,
            AddressingMode::AbsoluteX => self.operand_word()?.wrapping_add(self.x as u16),
            AddressingMode::AbsoluteY => self.operand_word()?.wrapping_add(self.y as u16),
            AddressingMode::Indirect => {
                let pointer = self.operand_word()?;
                self.read_word(pointer)?
            }
            AddressingMode::IndirectX => {
                let pointer = self.operand_byte()?.wrapping_add(self.x) as u16;
                self.read_word(pointer)?
            }
            AddressingMode::IndirectY => {
                let pointer = self.operand_byte()? as u16;
                self.read_word(pointer)?.wrapping_add(self.y as u16)
            }
        };
        Ok(Some(address))
    }

    /// Effective address for a mode the opcode table guarantees addresses memory.
    pub(crate) fn effective_address(&self, mode: AddressingMode) -> Result<u16, ExecutionError> {
        match self.resolve(mode)? {
            Some(address) => Ok(address),
            None => unreachable!("{:?} does not address memory", mode),
        }
    }

    /// Resolves the operand of a read instruction: `(address, value)`.
    pub(crate) fn read_operand(&self, mode: AddressingMode) -> Result<(u16, u8), ExecutionError> {
        let address = self.effective_address(mode)?;
        let value = self.memory.read(address)?;
        Ok((address, value))
    }

    /// Reads the operand of a read instruction and signals the access to the bus.
    pub(crate) fn fetch_operand(&mut self, mode: AddressingMode) -> Result<u8, ExecutionError> {
        let (address, value) = self.read_operand(mode)?;
        self.memory.access(address)?;
        Ok(value)
    }

    fn operand_byte(&self) -> Result<u8, ExecutionError> {
        self.memory.read(self.pc.wrapping_add(1))
    }

    fn operand_word(&self) -> Result<u16, ExecutionError> {
        self.read_word(self.pc.wrapping_add(1))
    }

    /// Reads a little-endian word; the high byte comes from `address + 1`.
    pub(crate) fn read_word(&self, address: u16) -> Result<u16, ExecutionError> {
        let low = self.memory.read(address)? as u16;
        let high = self.memory.read(address.wrapping_add(1))? as u16;
        Ok((high << 8) | low)
    }

    // ========== Internal Helpers ==========

    pub(crate) fn advance(&mut self, metadata: &OpcodeMetadata) {
        self.pc = self.pc.wrapping_add(metadata.size_bytes as u16);
    }

    pub(crate) fn set_zn(&mut self, value: u8) {
        self.flag_z = value == 0;
        self.flag_n = (value & 0x80) != 0;
    }

    /// Pushes a byte; SP decrements after the write and wraps within page 1.
    pub(crate) fn push(&mut self, value: u8) -> Result<(), ExecutionError> {
        self.memory.write(STACK_PAGE | self.sp as u16, value)?;
        self.sp = self.sp.wrapping_sub(1);
        Ok(())
    }

    /// Pulls a byte; SP increments before the read and wraps within page 1.
    pub(crate) fn pull(&mut self) -> Result<u8, ExecutionError> {
        let sp = self.sp.wrapping_add(1);
        let value = self.memory.read(STACK_PAGE | sp as u16)?;
        self.sp = sp;
        Ok(value)
    }

    /// Status byte as pushed by PHP and BRK: break bit and bit 5 forced to 1.
    pub(crate) fn pushed_status(&self) -> u8 {
        self.status() | 0b0011_0000
    }

    pub(crate) fn irq_vector(&self) -> Result<u16, ExecutionError> {
        self.read_word(IRQ_VECTOR)
    }

    // ========== Register Getters ==========

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Returns the stack pointer value.
    ///
    /// The full stack address is 0x0100 + SP. The stack grows downward from 0x01FF.
    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// Returns the status register as a packed byte.
    ///
    /// Bit layout (NV-BDIZC):
    /// - Bit 7: N (Negative)
    /// - Bit 6: V (Overflow)
    /// - Bit 5: (unused, always 1)
    /// - Bit 4: B (Break)
    /// - Bit 3: D (Decimal)
    /// - Bit 2: I (Interrupt Disable)
    /// - Bit 1: Z (Zero)
    /// - Bit 0: C (Carry)
    pub fn status(&self) -> u8 {
        let mut status: u8 = 0b0010_0000;

        if self.flag_n {
            status |= 0b1000_0000;
        }
        if self.flag_v {
            status |= 0b0100_0000;
        }
        if self.flag_b {
            status |= 0b0001_0000;
        }
        if self.flag_d {
            status |= 0b0000_1000;
        }
        if self.flag_i {
            status |= 0b0000_0100;
        }
        if self.flag_z {
            status |= 0b0000_0010;
        }
        if self.flag_c {
            status |= 0b0000_0001;
        }

        status
    }

    /// Restores all seven flags from a packed status byte. Bit 5 is ignored.
    pub fn set_status(&mut self, status: u8) {
        self.flag_c = (status & 0b0000_0001) != 0;
        self.flag_z = (status & 0b0000_0010) != 0;
        self.flag_i = (status & 0b0000_0100) != 0;
        self.flag_d = (status & 0b0000_1000) != 0;
        self.flag_b = (status & 0b0001_0000) != 0;
        self.flag_v = (status & 0b0100_0000) != 0;
        self.flag_n = (status & 0b1000_0000) != 0;
    }

    /// Number of instructions completed since the last reset.
    pub fn instruction_count(&self) -> u64 {
        self.instructions
    }

    /// Snapshot of registers, flags and program counter.
    pub fn registers(&self) -> Registers {
        Registers {
            a: self.a,
            x: self.x,
            y: self.y,
            sp: self.sp,
            pc: self.pc,
            carry: self.flag_c,
            zero: self.flag_z,
            interrupt_disable: self.flag_i,
            decimal: self.flag_d,
            break_flag: self.flag_b,
            overflow: self.flag_v,
            negative: self.flag_n,
        }
    }

    // ========== Status Flag Getters ==========

    /// Returns true if the Negative flag is set.
    pub fn flag_n(&self) -> bool {
        self.flag_n
    }

    /// Returns true if the Overflow flag is set.
    pub fn flag_v(&self) -> bool {
        self.flag_v
    }

    /// Returns true if the Break flag is set.
    pub fn flag_b(&self) -> bool {
        self.flag_b
    }

    /// Returns true if the Decimal mode flag is set.
    pub fn flag_d(&self) -> bool {
        self.flag_d
    }

    /// Returns true if the Interrupt Disable flag is set.
    pub fn flag_i(&self) -> bool {
        self.flag_i
    }

    /// Returns true if the Zero flag is set.
    pub fn flag_z(&self) -> bool {
        self.flag_z
    }

    /// Returns true if the Carry flag is set.
    pub fn flag_c(&self) -> bool {
        self.flag_c
    }

    // ========== Setters (debugging and tests) ==========

    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }

    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }

    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    pub fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }

    pub fn set_flag_n(&mut self, value: bool) {
        self.flag_n = value;
    }

    pub fn set_flag_v(&mut self, value: bool) {
        self.flag_v = value;
    }

    pub fn set_flag_b(&mut self, value: bool) {
        self.flag_b = value;
    }

    pub fn set_flag_d(&mut self, value: bool) {
        self.flag_d = value;
    }

    pub fn set_flag_i(&mut self, value: bool) {
        self.flag_i = value;
    }

    pub fn set_flag_z(&mut self, value: bool) {
        self.flag_z = value;
    }

    pub fn set_flag_c(&mut self, value: bool) {
        self.flag_c = value;
    }

    // ========== Breakpoint ==========

    /// Returns the configured breakpoint, if any.
    pub fn breakpoint(&self) -> Option<u16> {
        self.breakpoint
    }

    /// Sets or clears the PC value at which `step` reports `Breakpoint`.
    pub fn set_breakpoint(&mut self, breakpoint: Option<u16>) {
        self.breakpoint = breakpoint;
        self.paused_at = None;
    }

    // ========== Memory Access ==========

    /// Borrows the memory bus.
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Mutably borrows the memory bus.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }
}

impl<M: MemoryBus> CpuCore for CPU<M> {
    type Registers = Registers;

    fn step(&mut self, verbose: bool) -> Result<StepOutcome, ExecutionError> {
        CPU::step(self, verbose)
    }

    fn registers(&self) -> Registers {
        CPU::registers(self)
    }

    fn reset(&mut self) -> Result<(), ExecutionError> {
        CPU::reset(self)
    }

    fn dump_memory(&self, start: usize, len: usize) -> Result<Vec<u8>, ExecutionError> {
        (start..start.saturating_add(len))
            .map(|address| {
                if address >= MEMORY_SIZE {
                    Err(ExecutionError::AddressOutOfRange {
                        address,
                        size: MEMORY_SIZE,
                    })
                } else {
                    self.memory.read(address as u16)
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Memory;

    fn setup_cpu(program: &[u8]) -> CPU<Memory> {
        let mut mem = Memory::new(0x1_0000).unwrap();
        mem.load(0xFFFC, &[0x00, 0x80]).unwrap();
        mem.load(0x8000, program).unwrap();
        CPU::new(mem).unwrap()
    }

    #[test]
    fn test_cpu_initialization() {
        let cpu = setup_cpu(&[]);

        assert_eq!(cpu.pc(), 0x8000);
        assert_eq!(cpu.sp(), 0xFF);
        assert_eq!(cpu.a(), 0x00);
        assert_eq!(cpu.x(), 0x00);
        assert_eq!(cpu.y(), 0x00);
        assert_eq!(cpu.instruction_count(), 0);
        assert_eq!(cpu.status(), 0b0010_0000);
    }

    #[test]
    fn test_status_round_trip() {
        let mut cpu = setup_cpu(&[]);
        cpu.set_status(0b1101_1111);
        assert_eq!(cpu.status(), 0b1111_1111);
        assert!(cpu.flag_n() && cpu.flag_v() && cpu.flag_b() && cpu.flag_d());
        assert!(cpu.flag_i() && cpu.flag_z() && cpu.flag_c());
    }

    #[test]
    fn test_undefined_opcode_leaves_state() {
        let mut cpu = setup_cpu(&[0x02]);
        let before = cpu.registers();

        let result = cpu.step(false);
        assert_eq!(
            result,
            Err(ExecutionError::UndefinedOpcode {
                opcode: 0x02,
                address: 0x8000
            })
        );
        assert_eq!(cpu.registers(), before);
        assert_eq!(cpu.instruction_count(), 0);
    }

    #[test]
    fn test_breakpoint_reported_then_resumed() {
        let mut cpu = setup_cpu(&[0xEA, 0xEA, 0xEA]);
        cpu.set_breakpoint(Some(0x8001));

        assert_eq!(cpu.step(false).unwrap(), StepOutcome::Continue);
        assert_eq!(cpu.step(false).unwrap(), StepOutcome::Breakpoint);
        assert_eq!(cpu.pc(), 0x8001);

        // Resuming executes the instruction under the breakpoint
        assert_eq!(cpu.step(false).unwrap(), StepOutcome::Continue);
        assert_eq!(cpu.pc(), 0x8002);
    }

    #[test]
    fn test_run_stops_on_breakpoint() {
        let mut cpu = setup_cpu(&[0xEA; 16]);
        cpu.set_breakpoint(Some(0x8004));

        assert_eq!(cpu.run(10).unwrap(), StepOutcome::Breakpoint);
        assert_eq!(cpu.instruction_count(), 4);
    }

    #[test]
    fn test_reset_keeps_memory() {
        let mut cpu = setup_cpu(&[0xA9, 0x42]);
        cpu.step(false).unwrap();
        cpu.memory_mut().write(0x0200, 0x99).unwrap();

        cpu.reset().unwrap();
        assert_eq!(cpu.a(), 0);
        assert_eq!(cpu.pc(), 0x8000);
        assert_eq!(cpu.memory().read(0x0200).unwrap(), 0x99);
    }

    #[test]
    fn test_dump_memory_bounds() {
        let cpu = setup_cpu(&[1, 2, 3]);
        assert_eq!(cpu.dump_memory(0x8000, 3).unwrap(), vec![1, 2, 3]);
        assert!(cpu.dump_memory(0xFFFF, 2).is_err());
    }

    #[test]
    fn test_reset_vector_outside_small_memory() {
        let mem = Memory::new(0x100).unwrap();
        assert!(matches!(
            CPU::new(mem),
            Err(ExecutionError::AddressOutOfRange { .. })
        ));
    }
}
