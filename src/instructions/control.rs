//! # Control Flow Instructions
//!
//! This module implements control flow operations:
//! - BRK: Force Interrupt
//! - RTI: Return from Interrupt
//! - JMP: Jump (absolute or indirect)
//! - JSR / RTS: subroutine call and return
//! - NOP
//!
//! Instructions that overwrite PC do not also advance it.

use crate::opcodes::OpcodeMetadata;
use crate::{ExecutionError, MemoryBus, CPU};

/// Executes the BRK (Force Interrupt) instruction.
///
/// BRK is two bytes long with the second byte ignored:
/// 1. Reads the IRQ vector at $FFFE (low) / $FFFF (high)
/// 2. Latches the B flag
/// 3. Pushes PC+2, high byte first
/// 4. Pushes the status byte with the break bit forced to 1
/// 5. Sets the I (interrupt disable) flag and jumps to the vector
///
/// The vector is read first so a failed read leaves the CPU untouched.
pub(crate) fn execute_brk<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let vector = cpu.irq_vector()?;
    cpu.flag_b = true;

    let return_address = cpu.pc.wrapping_add(2);
    cpu.push((return_address >> 8) as u8)?;
    cpu.push((return_address & 0xFF) as u8)?;

    let status = cpu.pushed_status();
    cpu.push(status)?;

    cpu.flag_i = true;
    cpu.pc = vector;

    Ok(())
}

/// Executes the RTI (Return from Interrupt) instruction.
///
/// Pulls the status byte (restoring all seven flags), then PC. Unlike RTS
/// there is no +1 correction.
pub(crate) fn execute_rti<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let status = cpu.pull()?;
    cpu.set_status(status);

    let low = cpu.pull()? as u16;
    let high = cpu.pull()? as u16;
    cpu.pc = (high << 8) | low;

    Ok(())
}

/// Executes the JMP (Jump) instruction.
///
/// Absolute mode jumps to the operand; indirect mode jumps to the word stored
/// at the operand. The pointer's high byte is read from pointer + 1 even
/// across a page boundary.
pub(crate) fn execute_jmp<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    cpu.pc = cpu.effective_address(metadata.addressing_mode)?;
    Ok(())
}

/// Executes the JSR (Jump to Subroutine) instruction.
///
/// Pushes the address of the last JSR byte (return address - 1), high byte
/// first, then jumps.
pub(crate) fn execute_jsr<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let target = cpu.effective_address(metadata.addressing_mode)?;
    let last_byte = cpu.pc.wrapping_add(2);

    cpu.push((last_byte >> 8) as u8)?;
    cpu.push((last_byte & 0xFF) as u8)?;

    cpu.pc = target;
    Ok(())
}

/// Executes the RTS (Return from Subroutine) instruction.
///
/// Pulls the pushed address and resumes one byte after it.
pub(crate) fn execute_rts<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let low = cpu.pull()? as u16;
    let high = cpu.pull()? as u16;

    // JSR pushed return address - 1
    cpu.pc = ((high << 8) | low).wrapping_add(1);

    Ok(())
}

/// Executes NOP. Only PC changes.
pub(crate) fn execute_nop<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    cpu.advance(metadata);
    Ok(())
}
