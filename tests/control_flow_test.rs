//! Tests for JMP, JSR/RTS, BRK/RTI and the conditional branches.

use raquette::{Memory, MemoryBus, CPU};

/// Helper function to create a CPU with `program` at the reset vector 0x8000
fn setup_cpu(program: &[u8]) -> CPU<Memory> {
    let mut memory = Memory::new(0x1_0000).unwrap();
    memory.write(0xFFFC, 0x00).unwrap();
    memory.write(0xFFFD, 0x80).unwrap();
    memory.load(0x8000, program).unwrap();
    CPU::new(memory).unwrap()
}

// ========== JMP ==========

#[test]
fn test_jmp_absolute() {
    let mut cpu = setup_cpu(&[0x4C, 0x00, 0x90]);

    cpu.step(false).unwrap();

    assert_eq!(cpu.pc(), 0x9000);
}

#[test]
fn test_jmp_indirect_crosses_page() {
    // JMP ($30FF): high byte comes from $3100
    let mut cpu = setup_cpu(&[0x6C, 0xFF, 0x30]);
    cpu.memory_mut().write(0x30FF, 0x34).unwrap();
    cpu.memory_mut().write(0x3100, 0x12).unwrap();
    cpu.memory_mut().write(0x3000, 0x56).unwrap();

    cpu.step(false).unwrap();

    assert_eq!(cpu.pc(), 0x1234);
}

// ========== JSR / RTS ==========

#[test]
fn test_jsr_pushes_last_byte_address() {
    let mut cpu = setup_cpu(&[0x20, 0x00, 0x90]);

    cpu.step(false).unwrap();

    assert_eq!(cpu.pc(), 0x9000);
    assert_eq!(cpu.sp(), 0xFD);
    assert_eq!(cpu.memory().read(0x01FF).unwrap(), 0x80);
    assert_eq!(cpu.memory().read(0x01FE).unwrap(), 0x02);
}

#[test]
fn test_jsr_rts_returns_after_call() {
    // JSR $9000; LDX #$01 ... $9000: LDA #$07; RTS
    let mut cpu = setup_cpu(&[0x20, 0x00, 0x90, 0xA2, 0x01]);
    cpu.memory_mut().load(0x9000, &[0xA9, 0x07, 0x60]).unwrap();

    for _ in 0..3 {
        cpu.step(false).unwrap();
    }
    assert_eq!(cpu.pc(), 0x8003);
    assert_eq!(cpu.sp(), 0xFF);
    assert_eq!(cpu.a(), 0x07);

    cpu.step(false).unwrap();
    assert_eq!(cpu.x(), 0x01);
}

// ========== BRK / RTI ==========

#[test]
fn test_brk_pushes_state_and_vectors() {
    let mut cpu = setup_cpu(&[0x00, 0xFF]);
    cpu.memory_mut().load(0xFFFE, &[0x00, 0x90]).unwrap();
    cpu.set_flag_c(true);

    cpu.step(false).unwrap();

    assert_eq!(cpu.pc(), 0x9000);
    assert_eq!(cpu.sp(), 0xFC);
    assert!(cpu.flag_i());
    assert!(cpu.flag_b());
    assert_eq!(cpu.memory().read(0x01FF).unwrap(), 0x80);
    assert_eq!(cpu.memory().read(0x01FE).unwrap(), 0x02);
    assert_eq!(cpu.memory().read(0x01FD).unwrap(), 0b0011_0001);
}

#[test]
fn test_brk_rti_round_trip() {
    let mut cpu = setup_cpu(&[0x00, 0x00]);
    cpu.memory_mut().load(0xFFFE, &[0x00, 0x90]).unwrap();
    // Handler: SEC; CLV; RTI
    cpu.memory_mut().load(0x9000, &[0x38, 0xB8, 0x40]).unwrap();

    cpu.set_flag_c(false);
    cpu.set_flag_v(true);
    cpu.set_flag_n(true);
    cpu.set_flag_d(true);
    let before = cpu.registers();

    for _ in 0..4 {
        cpu.step(false).unwrap();
    }

    let after = cpu.registers();
    assert_eq!(after.pc, 0x8002);
    assert_eq!(after.sp, before.sp);
    assert_eq!(after.carry, before.carry);
    assert_eq!(after.zero, before.zero);
    assert_eq!(after.interrupt_disable, before.interrupt_disable);
    assert_eq!(after.decimal, before.decimal);
    assert_eq!(after.overflow, before.overflow);
    assert_eq!(after.negative, before.negative);
}

// ========== Branches ==========

#[test]
fn test_bcc_forward_then_backward() {
    // BCC +4 at $8000 lands on $8006; BCC -6 at $8006 lands on $8002
    let mut cpu = setup_cpu(&[0x90, 0x04, 0x00, 0x00, 0x00, 0x00, 0x90, 0xFA]);

    cpu.step(false).unwrap();
    assert_eq!(cpu.pc(), 0x8006);

    cpu.step(false).unwrap();
    assert_eq!(cpu.pc(), 0x8008 - 6);
}

#[test]
fn test_branch_not_taken_advances_two() {
    // BCS with carry clear
    let mut cpu = setup_cpu(&[0xB0, 0x10]);

    cpu.step(false).unwrap();

    assert_eq!(cpu.pc(), 0x8002);
}

#[test]
fn test_each_branch_condition() {
    // (opcode, flag setter, value that takes the branch)
    let cases: [(u8, fn(&mut CPU<Memory>, bool), bool); 8] = [
        (0x90, CPU::set_flag_c, false), // BCC
        (0xB0, CPU::set_flag_c, true),  // BCS
        (0xD0, CPU::set_flag_z, false), // BNE
        (0xF0, CPU::set_flag_z, true),  // BEQ
        (0x10, CPU::set_flag_n, false), // BPL
        (0x30, CPU::set_flag_n, true),  // BMI
        (0x50, CPU::set_flag_v, false), // BVC
        (0x70, CPU::set_flag_v, true),  // BVS
    ];

    for (opcode, set_flag, taken_when) in cases {
        let mut cpu = setup_cpu(&[opcode, 0x10]);
        set_flag(&mut cpu, taken_when);
        cpu.step(false).unwrap();
        assert_eq!(cpu.pc(), 0x8012, "{:02X} should branch", opcode);

        let mut cpu = setup_cpu(&[opcode, 0x10]);
        set_flag(&mut cpu, !taken_when);
        cpu.step(false).unwrap();
        assert_eq!(cpu.pc(), 0x8002, "{:02X} should fall through", opcode);
    }
}
