//! # Increment and Decrement Instructions
//!
//! - INC, DEC: memory read-modify-write, 8-bit wraparound
//! - INX, INY, DEX, DEY: register forms, never touch memory
//!
//! All update Z and N from the result.

use crate::opcodes::OpcodeMetadata;
use crate::{ExecutionError, MemoryBus, CPU};

fn modify_memory<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
    delta: fn(u8) -> u8,
) -> Result<(), ExecutionError> {
    let (address, value) = cpu.read_operand(metadata.addressing_mode)?;
    let result = delta(value);

    cpu.memory.store(address, result)?;
    // Flags follow the computed value even when the store lands in ROM
    cpu.set_zn(result);
    cpu.advance(metadata);
    Ok(())
}

/// Executes INC (Increment Memory).
///
/// Flags affected: Z, N
pub(crate) fn execute_inc<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    modify_memory(cpu, metadata, |v| v.wrapping_add(1))
}

/// Executes DEC (Decrement Memory).
///
/// Flags affected: Z, N
pub(crate) fn execute_dec<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    modify_memory(cpu, metadata, |v| v.wrapping_sub(1))
}

pub(crate) fn execute_inx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    cpu.x = cpu.x.wrapping_add(1);
    cpu.set_zn(cpu.x);
    cpu.advance(metadata);
    Ok(())
}

pub(crate) fn execute_iny<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    cpu.y = cpu.y.wrapping_add(1);
    cpu.set_zn(cpu.y);
    cpu.advance(metadata);
    Ok(())
}

pub(crate) fn execute_dex<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    cpu.x = cpu.x.wrapping_sub(1);
    cpu.set_zn(cpu.x);
    cpu.advance(metadata);
    Ok(())
}

pub(crate) fn execute_dey<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    cpu.y = cpu.y.wrapping_sub(1);
    cpu.set_zn(cpu.y);
    cpu.advance(metadata);
    Ok(())
}
