//! # Stack Instructions
//!
//! The stack lives in page 1 (0x0100-0x01FF) and grows downward. Pushes
//! write then decrement SP; pulls increment SP then read.
//!
//! - PHA / PLA: accumulator (PLA sets Z and N)
//! - PHP / PLP: status byte. PHP pushes with the break bit and bit 5 forced
//!   to 1; PLP restores all seven flags verbatim.

use crate::opcodes::OpcodeMetadata;
use crate::{ExecutionError, MemoryBus, CPU};

pub(crate) fn execute_pha<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    cpu.push(cpu.a)?;
    cpu.advance(metadata);
    Ok(())
}

pub(crate) fn execute_php<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let status = cpu.pushed_status();
    cpu.push(status)?;
    cpu.advance(metadata);
    Ok(())
}

pub(crate) fn execute_pla<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    cpu.a = cpu.pull()?;
    cpu.set_zn(cpu.a);
    cpu.advance(metadata);
    Ok(())
}

pub(crate) fn execute_plp<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let status = cpu.pull()?;
    cpu.set_status(status);
    cpu.advance(metadata);
    Ok(())
}
