//! # Shift and Rotate Instructions
//!
//! - ASL: Arithmetic Shift Left
//! - LSR: Logical Shift Right
//! - ROL: Rotate Left through carry
//! - ROR: Rotate Right through carry
//!
//! Each operates on the accumulator (accumulator addressing) or on memory
//! (read-modify-write through the bus store path).

use crate::opcodes::OpcodeMetadata;
use crate::{AddressingMode, ExecutionError, MemoryBus, CPU};

/// Applies `op` to the accumulator or to the memory operand.
///
/// `op` receives the old value and carry and returns `(new_value, new_carry)`.
/// Z is set from the new value; N is left to the caller.
fn read_modify_write<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
    op: impl Fn(u8, bool) -> (u8, bool),
) -> Result<u8, ExecutionError> {
    let result = if metadata.addressing_mode == AddressingMode::Accumulator {
        let (result, carry) = op(cpu.a, cpu.flag_c);
        cpu.a = result;
        cpu.flag_c = carry;
        result
    } else {
        let (address, value) = cpu.read_operand(metadata.addressing_mode)?;
        let (result, carry) = op(value, cpu.flag_c);
        cpu.memory.store(address, result)?;
        cpu.flag_c = carry;
        result
    };

    cpu.flag_z = result == 0;
    cpu.advance(metadata);
    Ok(result)
}

/// Executes ASL: old bit 7 goes to carry, bit 0 becomes 0.
///
/// Flags affected: C, Z, N
pub(crate) fn execute_asl<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let result = read_modify_write(cpu, metadata, |value, _| {
        (value << 1, (value & 0x80) != 0)
    })?;
    cpu.flag_n = (result & 0x80) != 0;
    Ok(())
}

/// Executes LSR: old bit 0 goes to carry, bit 7 becomes 0.
///
/// Flags affected: C, Z, N (always cleared)
pub(crate) fn execute_lsr<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    read_modify_write(cpu, metadata, |value, _| (value >> 1, (value & 0x01) != 0))?;
    cpu.flag_n = false;
    Ok(())
}

/// Executes ROL: old carry enters bit 0, old bit 7 becomes carry.
///
/// Flags affected: C, Z, N
pub(crate) fn execute_rol<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let result = read_modify_write(cpu, metadata, |value, carry| {
        ((value << 1) | carry as u8, (value & 0x80) != 0)
    })?;
    cpu.flag_n = (result & 0x80) != 0;
    Ok(())
}

/// Executes ROR: old carry enters bit 7, old bit 0 becomes carry.
///
/// N reflects bit 7 of the result, i.e. the carry that was rotated in.
pub(crate) fn execute_ror<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let result = read_modify_write(cpu, metadata, |value, carry| {
        ((value >> 1) | ((carry as u8) << 7), (value & 0x01) != 0)
    })?;
    cpu.flag_n = (result & 0x80) != 0;
    Ok(())
}
