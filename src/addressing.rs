//! # Addressing Modes
//!
//! This module defines the addressing modes understood by the Raquette CPU and
//! the bit-pattern decoder for the regular ("group one") instructions.
//!
//! Group-one opcodes follow the `aaabbbcc` layout: `aaa` and `cc` select the
//! operation, `bbb` selects the addressing mode.

/// Raquette addressing mode enumeration.
///
/// The addressing mode determines how the CPU interprets the operand bytes
/// that follow an opcode and how it calculates the effective memory address
/// for the operation.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implicit, Accumulator
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX, ZeroPageY, Relative, IndirectX, IndirectY
/// - **2 bytes**: Absolute, AbsoluteX, AbsoluteY, Indirect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    /// No operand, operation implied by instruction.
    ///
    /// Examples: CLC, RTS, NOP
    Implicit,

    /// Operates directly on the accumulator register.
    ///
    /// Examples: LSR A, ROL A
    Accumulator,

    /// The operand byte itself is the value; effective address is PC+1.
    Immediate,

    /// 8-bit address in zero page (0x00-0xFF).
    ZeroPage,

    /// Zero page address plus X, wrapping within zero page.
    ///
    /// Example: operand 0xFF with X = 0x02 addresses 0x0001.
    ZeroPageX,

    /// Zero page address plus Y, wrapping within zero page.
    ZeroPageY,

    /// Signed 8-bit displacement for branch instructions.
    Relative,

    /// Full little-endian 16-bit address.
    Absolute,

    /// 16-bit address plus X, wrapping modulo 65536.
    AbsoluteX,

    /// 16-bit address plus Y, wrapping modulo 65536.
    AbsoluteY,

    /// Jump through a 16-bit pointer. Only used by JMP.
    Indirect,

    /// Indexed indirect: pointer read from zero page at (operand + X) mod 256.
    IndirectX,

    /// Indirect indexed: pointer read from zero page at operand, then Y added.
    IndirectY,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    pub const fn operand_bytes(self) -> u8 {
        match self {
            AddressingMode::Implicit | AddressingMode::Accumulator => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::Relative
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
        }
    }

    /// Total instruction length (opcode plus operands).
    pub const fn instruction_length(self) -> u8 {
        self.operand_bytes() + 1
    }

    /// Decodes the `bbb` bits of a group-one opcode (ORA, AND, EOR, ADC, STA,
    /// LDA, CMP, SBC).
    ///
    /// ```
    /// use raquette::AddressingMode;
    ///
    /// assert_eq!(AddressingMode::decode_group_one(0xA9), AddressingMode::Immediate);
    /// assert_eq!(AddressingMode::decode_group_one(0x71), AddressingMode::IndirectY);
    /// ```
    pub const fn decode_group_one(opcode: u8) -> AddressingMode {
        match (opcode >> 2) & 0b111 {
            0b000 => AddressingMode::IndirectX,
            0b001 => AddressingMode::ZeroPage,
            0b010 => AddressingMode::Immediate,
            0b011 => AddressingMode::Absolute,
            0b100 => AddressingMode::IndirectY,
            0b101 => AddressingMode::ZeroPageX,
            0b110 => AddressingMode::AbsoluteY,
            0b111 => AddressingMode::AbsoluteX,
            _ => unreachable!(),
        }
    }

    /// True for modes that resolve to a memory address.
    pub const fn is_memory(self) -> bool {
        !matches!(
            self,
            AddressingMode::Implicit | AddressingMode::Accumulator | AddressingMode::Relative
        )
    }
}
