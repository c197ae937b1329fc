//! # Branch Instructions
//!
//! This module implements the conditional branches:
//! BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS.
//!
//! Every branch is two bytes long. When taken, the signed displacement in the
//! second byte is applied to the address following the instruction, so a
//! branch at `A` with displacement `d` lands on `A + 2 + d`.

use crate::opcodes::{Mnemonic, OpcodeMetadata};
use crate::{ExecutionError, MemoryBus, CPU};

/// Executes any conditional branch.
///
/// No flags are affected.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU
/// * `metadata` - Decoded opcode; its mnemonic selects the tested flag
pub(crate) fn execute_branch<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let taken = match metadata.mnemonic {
        Mnemonic::Bcc => !cpu.flag_c,
        Mnemonic::Bcs => cpu.flag_c,
        Mnemonic::Beq => cpu.flag_z,
        Mnemonic::Bne => !cpu.flag_z,
        Mnemonic::Bmi => cpu.flag_n,
        Mnemonic::Bpl => !cpu.flag_n,
        Mnemonic::Bvs => cpu.flag_v,
        Mnemonic::Bvc => !cpu.flag_v,
        other => unreachable!("{} is not a branch", other),
    };

    let offset = cpu.memory.read(cpu.pc.wrapping_add(1))? as i8;
    let next = cpu.pc.wrapping_add(metadata.size_bytes as u16);

    if taken {
        log::trace!("{} taken", metadata.mnemonic);
        cpu.pc = next.wrapping_add_signed(offset as i16);
    } else {
        cpu.pc = next;
    }

    Ok(())
}
