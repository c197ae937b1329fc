//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! This module implements arithmetic and logical operations:
//! - ADC, SBC: binary and packed-BCD arithmetic
//! - AND, ORA, EOR: bitwise logic on the accumulator
//! - CMP, CPX, CPY: register/memory comparison
//! - BIT: bit test
//!
//! In decimal mode ADC and SBC only update Carry and Zero; Negative and
//! Overflow keep their previous values.

use crate::opcodes::OpcodeMetadata;
use crate::{ExecutionError, MemoryBus, CPU};

/// Executes the ADC (Add with Carry) instruction.
///
/// Binary mode adds the operand plus carry to the accumulator in a 9-bit
/// intermediate. Decimal mode treats both bytes as two packed BCD digits.
///
/// Flags affected:
/// - Binary: C, Z, V, N
/// - Decimal: C, Z
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU
/// * `metadata` - Decoded opcode
pub(crate) fn execute_adc<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let value = cpu.fetch_operand(metadata.addressing_mode)?;

    if cpu.flag_d {
        let (result, carry) = bcd_add(cpu.a, value, cpu.flag_c);
        cpu.a = result;
        cpu.flag_c = carry;
        cpu.flag_z = result == 0;
    } else {
        let a = cpu.a;
        let carry_in = cpu.flag_c as u16;
        let result16 = a as u16 + value as u16 + carry_in;
        let result = result16 as u8;

        cpu.flag_c = result16 > 0xFF;

        // Both operands share a sign the result does not have
        cpu.flag_v = ((a ^ result) & (value ^ result) & 0x80) != 0;

        cpu.a = result;
        cpu.set_zn(result);
    }

    cpu.advance(metadata);
    Ok(())
}

/// Executes the SBC (Subtract with Carry) instruction.
///
/// Computes A - M - (1 - C). Carry is set when no borrow occurred.
///
/// Flags affected:
/// - Binary: C, Z, V, N
/// - Decimal: C, Z
pub(crate) fn execute_sbc<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let value = cpu.fetch_operand(metadata.addressing_mode)?;

    if cpu.flag_d {
        let (result, carry) = bcd_sub(cpu.a, value, cpu.flag_c);
        cpu.a = result;
        cpu.flag_c = carry;
        cpu.flag_z = result == 0;
    } else {
        let a = cpu.a;
        let borrow = (!cpu.flag_c) as i16;
        let difference = a as i16 - value as i16 - borrow;
        let result = difference as u8;

        cpu.flag_c = difference >= 0;

        // Same test as ADC with the operand's sign inverted
        cpu.flag_v = ((a ^ result) & (!value ^ result) & 0x80) != 0;

        cpu.a = result;
        cpu.set_zn(result);
    }

    cpu.advance(metadata);
    Ok(())
}

/// Packed BCD addition: returns `(result, carry_out)`.
///
/// Each nibble is corrected by 10 once; nibbles that were not valid BCD to
/// begin with are not normalized further.
fn bcd_add(a: u8, value: u8, carry: bool) -> (u8, bool) {
    let mut low = (a & 0x0F) as u16 + (value & 0x0F) as u16 + carry as u16;
    let mut high = (a >> 4) as u16 + (value >> 4) as u16;
    let mut carry_out = false;

    if low > 9 {
        low -= 10;
        high += 1;
    }
    if high > 9 {
        high -= 10;
        carry_out = true;
    }

    (((high << 4) + low) as u8, carry_out)
}

/// Packed BCD subtraction: returns `(result, carry_out)`, carry meaning "no borrow".
fn bcd_sub(a: u8, value: u8, carry: bool) -> (u8, bool) {
    let mut low = (a & 0x0F) as i16 - (value & 0x0F) as i16;
    let mut high = (a >> 4) as i16 - (value >> 4) as i16;
    let mut carry_out = true;

    if !carry {
        low -= 1;
    }
    if low < 0 {
        low += 10;
        high -= 1;
    }
    if high < 0 {
        high += 10;
        carry_out = false;
    }

    ((((high & 0x0F) << 4) | (low & 0x0F)) as u8, carry_out)
}

/// Executes the AND (Logical AND) instruction.
///
/// Flags affected: Z, N
pub(crate) fn execute_and<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let value = cpu.fetch_operand(metadata.addressing_mode)?;
    cpu.a &= value;
    cpu.set_zn(cpu.a);
    cpu.advance(metadata);
    Ok(())
}

/// Executes the ORA (Logical Inclusive OR) instruction.
///
/// Flags affected: Z, N
pub(crate) fn execute_ora<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let value = cpu.fetch_operand(metadata.addressing_mode)?;
    cpu.a |= value;
    cpu.set_zn(cpu.a);
    cpu.advance(metadata);
    Ok(())
}

/// Executes the EOR (Exclusive OR) instruction.
///
/// Flags affected: Z, N
pub(crate) fn execute_eor<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let value = cpu.fetch_operand(metadata.addressing_mode)?;
    cpu.a ^= value;
    cpu.set_zn(cpu.a);
    cpu.advance(metadata);
    Ok(())
}

/// Shared compare: C = register >= value, Z = equal, N = bit 7 of the difference.
fn compare<M: MemoryBus>(cpu: &mut CPU<M>, register: u8, value: u8) {
    let difference = register.wrapping_sub(value);
    cpu.flag_c = register >= value;
    cpu.flag_z = register == value;
    cpu.flag_n = (difference & 0x80) != 0;
}

/// Executes the CMP (Compare Accumulator) instruction.
///
/// Flags affected: C, Z, N
pub(crate) fn execute_cmp<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let value = cpu.fetch_operand(metadata.addressing_mode)?;
    let register = cpu.a;
    compare(cpu, register, value);
    cpu.advance(metadata);
    Ok(())
}

/// Executes the CPX (Compare X Register) instruction.
pub(crate) fn execute_cpx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let value = cpu.fetch_operand(metadata.addressing_mode)?;
    let register = cpu.x;
    compare(cpu, register, value);
    cpu.advance(metadata);
    Ok(())
}

/// Executes the CPY (Compare Y Register) instruction.
pub(crate) fn execute_cpy<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let value = cpu.fetch_operand(metadata.addressing_mode)?;
    let register = cpu.y;
    compare(cpu, register, value);
    cpu.advance(metadata);
    Ok(())
}

/// Executes the BIT (Bit Test) instruction.
///
/// Z comes from A & M; V and N are copied from bits 6 and 7 of the memory
/// operand itself. The accumulator is not modified.
pub(crate) fn execute_bit<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let value = cpu.fetch_operand(metadata.addressing_mode)?;
    cpu.flag_z = (cpu.a & value) == 0;
    cpu.flag_v = (value & 0x40) != 0;
    cpu.flag_n = (value & 0x80) != 0;
    cpu.advance(metadata);
    Ok(())
}
