//! # Register Transfer Instructions
//!
//! TAX, TAY, TXA, TYA, TSX update Z and N from the destination.
//! TXS changes no flags.

use crate::opcodes::OpcodeMetadata;
use crate::{ExecutionError, MemoryBus, CPU};

pub(crate) fn execute_tax<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    cpu.x = cpu.a;
    cpu.set_zn(cpu.x);
    cpu.advance(metadata);
    Ok(())
}

pub(crate) fn execute_tay<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    cpu.y = cpu.a;
    cpu.set_zn(cpu.y);
    cpu.advance(metadata);
    Ok(())
}

pub(crate) fn execute_txa<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    cpu.a = cpu.x;
    cpu.set_zn(cpu.a);
    cpu.advance(metadata);
    Ok(())
}

pub(crate) fn execute_tya<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    cpu.a = cpu.y;
    cpu.set_zn(cpu.a);
    cpu.advance(metadata);
    Ok(())
}

/// Executes TSX (Transfer Stack Pointer to X).
pub(crate) fn execute_tsx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    cpu.x = cpu.sp;
    cpu.set_zn(cpu.x);
    cpu.advance(metadata);
    Ok(())
}

/// Executes TXS (Transfer X to Stack Pointer). No flags affected.
pub(crate) fn execute_txs<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    cpu.sp = cpu.x;
    cpu.advance(metadata);
    Ok(())
}
