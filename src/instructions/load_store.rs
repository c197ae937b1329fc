//! # Load and Store Instructions
//!
//! - LDA, LDX, LDY: copy memory into a register, setting Z and N
//! - STA, STX, STY: write a register to memory through the bus store path

use crate::opcodes::OpcodeMetadata;
use crate::{ExecutionError, MemoryBus, CPU};

fn load<M: MemoryBus>(cpu: &mut CPU<M>, metadata: &OpcodeMetadata) -> Result<u8, ExecutionError> {
    let value = cpu.fetch_operand(metadata.addressing_mode)?;
    cpu.set_zn(value);
    Ok(value)
}

fn store<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
    value: u8,
) -> Result<(), ExecutionError> {
    let address = cpu.effective_address(metadata.addressing_mode)?;
    cpu.memory.store(address, value)?;
    cpu.advance(metadata);
    Ok(())
}

/// Executes LDA (Load Accumulator).
///
/// Flags affected: Z, N
pub(crate) fn execute_lda<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    cpu.a = load(cpu, metadata)?;
    cpu.advance(metadata);
    Ok(())
}

/// Executes LDX (Load X Register).
pub(crate) fn execute_ldx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    cpu.x = load(cpu, metadata)?;
    cpu.advance(metadata);
    Ok(())
}

/// Executes LDY (Load Y Register).
pub(crate) fn execute_ldy<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    cpu.y = load(cpu, metadata)?;
    cpu.advance(metadata);
    Ok(())
}

/// Executes STA (Store Accumulator).
///
/// Stores at or above the ROM boundary are dropped by the bus, but the
/// access still reaches soft switches and the keyboard strobe.
///
/// No flags affected.
pub(crate) fn execute_sta<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let value = cpu.a;
    store(cpu, metadata, value)
}

/// Executes STX (Store X Register).
pub(crate) fn execute_stx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let value = cpu.x;
    store(cpu, metadata, value)
}

/// Executes STY (Store Y Register).
pub(crate) fn execute_sty<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let value = cpu.y;
    store(cpu, metadata, value)
}
