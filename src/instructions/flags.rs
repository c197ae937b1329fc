//! # Status Flag Instructions
//!
//! One-byte instructions that set or clear exactly one flag.

use crate::opcodes::OpcodeMetadata;
use crate::{ExecutionError, MemoryBus, CPU};

/// Executes CLC (Clear Carry Flag).
pub(crate) fn execute_clc<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    cpu.flag_c = false;
    cpu.advance(metadata);
    Ok(())
}

/// Executes SEC (Set Carry Flag).
pub(crate) fn execute_sec<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    cpu.flag_c = true;
    cpu.advance(metadata);
    Ok(())
}

/// Executes CLI (Clear Interrupt Disable).
pub(crate) fn execute_cli<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    cpu.flag_i = false;
    cpu.advance(metadata);
    Ok(())
}

/// Executes SEI (Set Interrupt Disable).
pub(crate) fn execute_sei<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    cpu.flag_i = true;
    cpu.advance(metadata);
    Ok(())
}

/// Executes CLD (Clear Decimal Mode).
pub(crate) fn execute_cld<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    cpu.flag_d = false;
    cpu.advance(metadata);
    Ok(())
}

/// Executes SED (Set Decimal Mode).
pub(crate) fn execute_sed<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    cpu.flag_d = true;
    cpu.advance(metadata);
    Ok(())
}

/// Executes CLV (Clear Overflow Flag). There is no matching set instruction.
pub(crate) fn execute_clv<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    cpu.flag_v = false;
    cpu.advance(metadata);
    Ok(())
}
