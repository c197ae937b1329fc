//! # Opcode Metadata Table
//!
//! This module contains the 256-entry opcode table that serves as the single
//! source of truth for instruction decoding. It is built once, at compile time,
//! from the regular group-one layout plus an explicit list of the irregular
//! opcodes.
//!
//! Each defined entry carries:
//! - Mnemonic
//! - Addressing mode
//! - Instruction size in bytes
//!
//! Undefined opcodes are `None`; executing one is an
//! `ExecutionError::UndefinedOpcode`.

use crate::addressing::AddressingMode;

/// Instruction mnemonics understood by the Raquette CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Mnemonic {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
}

impl Mnemonic {
    /// Three-letter assembler name.
    pub const fn name(self) -> &'static str {
        use Mnemonic::*;
        match self {
            Adc => "ADC",
            And => "AND",
            Asl => "ASL",
            Bcc => "BCC",
            Bcs => "BCS",
            Beq => "BEQ",
            Bit => "BIT",
            Bmi => "BMI",
            Bne => "BNE",
            Bpl => "BPL",
            Brk => "BRK",
            Bvc => "BVC",
            Bvs => "BVS",
            Clc => "CLC",
            Cld => "CLD",
            Cli => "CLI",
            Clv => "CLV",
            Cmp => "CMP",
            Cpx => "CPX",
            Cpy => "CPY",
            Dec => "DEC",
            Dex => "DEX",
            Dey => "DEY",
            Eor => "EOR",
            Inc => "INC",
            Inx => "INX",
            Iny => "INY",
            Jmp => "JMP",
            Jsr => "JSR",
            Lda => "LDA",
            Ldx => "LDX",
            Ldy => "LDY",
            Lsr => "LSR",
            Nop => "NOP",
            Ora => "ORA",
            Pha => "PHA",
            Php => "PHP",
            Pla => "PLA",
            Plp => "PLP",
            Rol => "ROL",
            Ror => "ROR",
            Rti => "RTI",
            Rts => "RTS",
            Sbc => "SBC",
            Sec => "SEC",
            Sed => "SED",
            Sei => "SEI",
            Sta => "STA",
            Stx => "STX",
            Sty => "STY",
            Tax => "TAX",
            Tay => "TAY",
            Tsx => "TSX",
            Txa => "TXA",
            Txs => "TXS",
            Tya => "TYA",
        }
    }
}

impl std::fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Metadata for a single defined opcode.
///
/// # Examples
///
/// ```
/// use raquette::{AddressingMode, Mnemonic, OPCODE_TABLE};
///
/// let lda_imm = OPCODE_TABLE[0xA9].unwrap();
/// assert_eq!(lda_imm.mnemonic, Mnemonic::Lda);
/// assert_eq!(lda_imm.addressing_mode, AddressingMode::Immediate);
/// assert_eq!(lda_imm.size_bytes, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeMetadata {
    /// Operation performed.
    pub mnemonic: Mnemonic,

    /// How the operand bytes are interpreted.
    pub addressing_mode: AddressingMode,

    /// Total instruction size in bytes (opcode + operands).
    ///
    /// Equal to the addressing mode's length except for BRK, which occupies
    /// two bytes with the second one ignored.
    pub size_bytes: u8,
}

const fn op(mnemonic: Mnemonic, addressing_mode: AddressingMode) -> Option<OpcodeMetadata> {
    Some(OpcodeMetadata {
        mnemonic,
        addressing_mode,
        size_bytes: addressing_mode.instruction_length(),
    })
}

const fn build_table() -> [Option<OpcodeMetadata>; 256] {
    use AddressingMode::*;
    use Mnemonic::*;

    let mut t: [Option<OpcodeMetadata>; 256] = [None; 256];

    // Group one: aaabbb01, every bbb defined except STA immediate
    let group_one = [
        (0x01usize, Ora),
        (0x21, And),
        (0x41, Eor),
        (0x61, Adc),
        (0x81, Sta),
        (0xA1, Lda),
        (0xC1, Cmp),
        (0xE1, Sbc),
    ];
    let mut i = 0;
    while i < group_one.len() {
        let (base, mnemonic) = group_one[i];
        let mut bbb = 0;
        while bbb < 8 {
            let opcode = base | (bbb << 2);
            if !(matches!(mnemonic, Sta) && bbb == 0b010) {
                t[opcode] = op(mnemonic, AddressingMode::decode_group_one(opcode as u8));
            }
            bbb += 1;
        }
        i += 1;
    }

    // Shifts and rotates
    t[0x0A] = op(Asl, Accumulator);
    t[0x06] = op(Asl, ZeroPage);
    t[0x16] = op(Asl, ZeroPageX);
    t[0x0E] = op(Asl, Absolute);
    t[0x1E] = op(Asl, AbsoluteX);
    t[0x4A] = op(Lsr, Accumulator);
    t[0x46] = op(Lsr, ZeroPage);
    t[0x56] = op(Lsr, ZeroPageX);
    t[0x4E] = op(Lsr, Absolute);
    t[0x5E] = op(Lsr, AbsoluteX);
    t[0x2A] = op(Rol, Accumulator);
    t[0x26] = op(Rol, ZeroPage);
    t[0x36] = op(Rol, ZeroPageX);
    t[0x2E] = op(Rol, Absolute);
    t[0x3E] = op(Rol, AbsoluteX);
    t[0x6A] = op(Ror, Accumulator);
    t[0x66] = op(Ror, ZeroPage);
    t[0x76] = op(Ror, ZeroPageX);
    t[0x6E] = op(Ror, Absolute);
    t[0x7E] = op(Ror, AbsoluteX);

    // Index register loads and stores
    t[0xA2] = op(Ldx, Immediate);
    t[0xA6] = op(Ldx, ZeroPage);
    t[0xB6] = op(Ldx, ZeroPageY);
    t[0xAE] = op(Ldx, Absolute);
    t[0xBE] = op(Ldx, AbsoluteY);
    t[0xA0] = op(Ldy, Immediate);
    t[0xA4] = op(Ldy, ZeroPage);
    t[0xB4] = op(Ldy, ZeroPageX);
    t[0xAC] = op(Ldy, Absolute);
    t[0xBC] = op(Ldy, AbsoluteX);
    t[0x86] = op(Stx, ZeroPage);
    t[0x96] = op(Stx, ZeroPageY);
    t[0x8E] = op(Stx, Absolute);
    t[0x84] = op(Sty, ZeroPage);
    t[0x94] = op(Sty, ZeroPageX);
    t[0x8C] = op(Sty, Absolute);

    // Increment / decrement
    t[0xE6] = op(Inc, ZeroPage);
    t[0xF6] = op(Inc, ZeroPageX);
    t[0xEE] = op(Inc, Absolute);
    t[0xFE] = op(Inc, AbsoluteX);
    t[0xC6] = op(Dec, ZeroPage);
    t[0xD6] = op(Dec, ZeroPageX);
    t[0xCE] = op(Dec, Absolute);
    t[0xDE] = op(Dec, AbsoluteX);
    t[0xE8] = op(Inx, Implicit);
    t[0xC8] = op(Iny, Implicit);
    t[0xCA] = op(Dex, Implicit);
    t[0x88] = op(Dey, Implicit);

    // Compare and bit test
    t[0xE0] = op(Cpx, Immediate);
    t[0xE4] = op(Cpx, ZeroPage);
    t[0xEC] = op(Cpx, Absolute);
    t[0xC0] = op(Cpy, Immediate);
    t[0xC4] = op(Cpy, ZeroPage);
    t[0xCC] = op(Cpy, Absolute);
    t[0x24] = op(Bit, ZeroPage);
    t[0x2C] = op(Bit, Absolute);

    // Transfers
    t[0xAA] = op(Tax, Implicit);
    t[0xA8] = op(Tay, Implicit);
    t[0x8A] = op(Txa, Implicit);
    t[0x98] = op(Tya, Implicit);
    t[0xBA] = op(Tsx, Implicit);
    t[0x9A] = op(Txs, Implicit);

    // Stack
    t[0x48] = op(Pha, Implicit);
    t[0x08] = op(Php, Implicit);
    t[0x68] = op(Pla, Implicit);
    t[0x28] = op(Plp, Implicit);

    // Control flow
    t[0x00] = Some(OpcodeMetadata {
        mnemonic: Brk,
        addressing_mode: Implicit,
        size_bytes: 2,
    });
    t[0x4C] = op(Jmp, Absolute);
    t[0x6C] = op(Jmp, Indirect);
    t[0x20] = op(Jsr, Absolute);
    t[0x60] = op(Rts, Implicit);
    t[0x40] = op(Rti, Implicit);
    t[0xEA] = op(Nop, Implicit);

    // Branches
    t[0x90] = op(Bcc, Relative);
    t[0xB0] = op(Bcs, Relative);
    t[0xF0] = op(Beq, Relative);
    t[0x30] = op(Bmi, Relative);
    t[0xD0] = op(Bne, Relative);
    t[0x10] = op(Bpl, Relative);
    t[0x50] = op(Bvc, Relative);
    t[0x70] = op(Bvs, Relative);

    // Flags
    t[0x18] = op(Clc, Implicit);
    t[0x38] = op(Sec, Implicit);
    t[0x58] = op(Cli, Implicit);
    t[0x78] = op(Sei, Implicit);
    t[0xB8] = op(Clv, Implicit);
    t[0xD8] = op(Cld, Implicit);
    t[0xF8] = op(Sed, Implicit);

    t
}

/// Complete 256-entry opcode table indexed by opcode byte value.
///
/// Undefined opcodes are `None`.
pub static OPCODE_TABLE: [Option<OpcodeMetadata>; 256] = build_table();

/// Looks up the metadata for `opcode`.
pub fn lookup(opcode: u8) -> Option<&'static OpcodeMetadata> {
    OPCODE_TABLE[opcode as usize].as_ref()
}
