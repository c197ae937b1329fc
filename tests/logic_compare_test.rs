//! Tests for the logical, compare and bit-test instructions.
//!
//! Tests cover:
//! - AND, ORA, EOR results and Z/N flags
//! - CMP, CPX, CPY carry/zero/negative rules
//! - BIT taking V and N from the memory operand

use raquette::{Memory, MemoryBus, CPU};

/// Helper function to create a CPU with `program` at the reset vector 0x8000
fn setup_cpu(program: &[u8]) -> CPU<Memory> {
    let mut memory = Memory::new(0x1_0000).unwrap();
    memory.write(0xFFFC, 0x00).unwrap();
    memory.write(0xFFFD, 0x80).unwrap();
    memory.load(0x8000, program).unwrap();
    CPU::new(memory).unwrap()
}

// ========== AND / ORA / EOR ==========

#[test]
fn test_and_immediate() {
    let mut cpu = setup_cpu(&[0x29, 0x0F, 0x29, 0xF0]);
    cpu.set_a(0xAB);

    cpu.step(false).unwrap();
    assert_eq!(cpu.a(), 0x0B);
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_n());

    cpu.step(false).unwrap();
    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_z());
}

#[test]
fn test_ora_sets_negative() {
    let mut cpu = setup_cpu(&[0x09, 0x80]);
    cpu.set_a(0x01);

    cpu.step(false).unwrap();

    assert_eq!(cpu.a(), 0x81);
    assert!(cpu.flag_n());
}

#[test]
fn test_eor_zero_page() {
    let mut cpu = setup_cpu(&[0x45, 0x10]);
    cpu.memory_mut().write(0x0010, 0xFF).unwrap();
    cpu.set_a(0xFF);

    cpu.step(false).unwrap();

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_z());
    assert!(!cpu.flag_n());
}

// ========== Compare ==========

#[test]
fn test_cmp_greater_equal_less() {
    let mut cpu = setup_cpu(&[0xC9, 0x10, 0xC9, 0x20, 0xC9, 0x30]);
    cpu.set_a(0x20);

    cpu.step(false).unwrap();
    assert!(cpu.flag_c());
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_n());

    cpu.step(false).unwrap();
    assert!(cpu.flag_c());
    assert!(cpu.flag_z());
    assert!(!cpu.flag_n());

    cpu.step(false).unwrap();
    assert!(!cpu.flag_c());
    assert!(!cpu.flag_z());
    assert!(cpu.flag_n()); // 0x20 - 0x30 = 0xF0
    assert_eq!(cpu.a(), 0x20);
}

#[test]
fn test_cmp_negative_from_difference() {
    // 0x80 - 0x01 = 0x7F: carry set, negative clear even though A is negative
    let mut cpu = setup_cpu(&[0xC9, 0x01]);
    cpu.set_a(0x80);

    cpu.step(false).unwrap();

    assert!(cpu.flag_c());
    assert!(!cpu.flag_n());
}

#[test]
fn test_cpx_cpy() {
    // CPX #$05; CPY $20
    let mut cpu = setup_cpu(&[0xE0, 0x05, 0xC4, 0x20]);
    cpu.memory_mut().write(0x0020, 0x09).unwrap();
    cpu.set_x(0x05);
    cpu.set_y(0x08);

    cpu.step(false).unwrap();
    assert!(cpu.flag_z());
    assert!(cpu.flag_c());

    cpu.step(false).unwrap();
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_c());
    assert!(cpu.flag_n());
    assert_eq!(cpu.x(), 0x05);
    assert_eq!(cpu.y(), 0x08);
}

// ========== BIT ==========

#[test]
fn test_bit_flags_from_memory() {
    // BIT $30
    let mut cpu = setup_cpu(&[0x24, 0x30]);
    cpu.memory_mut().write(0x0030, 0xC0).unwrap();
    cpu.set_a(0x01);

    cpu.step(false).unwrap();

    assert!(cpu.flag_z()); // 0x01 & 0xC0 == 0
    assert!(cpu.flag_v());
    assert!(cpu.flag_n());
    assert_eq!(cpu.a(), 0x01);
}

#[test]
fn test_bit_absolute_clears_v_and_n() {
    // BIT $1234
    let mut cpu = setup_cpu(&[0x2C, 0x34, 0x12]);
    cpu.memory_mut().write(0x1234, 0x01).unwrap();
    cpu.set_a(0x01);
    cpu.set_flag_v(true);
    cpu.set_flag_n(true);

    cpu.step(false).unwrap();

    assert!(!cpu.flag_z());
    assert!(!cpu.flag_v());
    assert!(!cpu.flag_n());
    assert_eq!(cpu.pc(), 0x8003);
}
