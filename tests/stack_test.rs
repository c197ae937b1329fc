//! Tests for the stack instructions (PHA, PLA, PHP, PLP).
//!
//! Tests cover:
//! - Push/pull order and stack pointer movement
//! - Break and bit 5 forced on PHP
//! - Stack pointer wraparound inside page 1

use raquette::{Memory, MemoryBus, CPU};

/// Helper function to create a CPU with `program` at the reset vector 0x8000
fn setup_cpu(program: &[u8]) -> CPU<Memory> {
    let mut memory = Memory::new(0x1_0000).unwrap();
    memory.write(0xFFFC, 0x00).unwrap();
    memory.write(0xFFFD, 0x80).unwrap();
    memory.load(0x8000, program).unwrap();
    CPU::new(memory).unwrap()
}

#[test]
fn test_pha_pla_round_trip() {
    // PHA; LDA #$00; PLA
    let mut cpu = setup_cpu(&[0x48, 0xA9, 0x00, 0x68]);
    cpu.set_a(0x9C);

    cpu.step(false).unwrap();
    assert_eq!(cpu.sp(), 0xFE);
    assert_eq!(cpu.memory().read(0x01FF).unwrap(), 0x9C);

    cpu.step(false).unwrap();
    assert!(cpu.flag_z());

    cpu.step(false).unwrap();
    assert_eq!(cpu.a(), 0x9C);
    assert_eq!(cpu.sp(), 0xFF);
    assert!(!cpu.flag_z());
    assert!(cpu.flag_n());
}

#[test]
fn test_php_forces_break_and_bit_five() {
    let mut cpu = setup_cpu(&[0x08]);
    cpu.set_flag_c(true);
    cpu.set_flag_n(true);

    cpu.step(false).unwrap();

    assert_eq!(cpu.memory().read(0x01FF).unwrap(), 0b1011_0001);
    // The register file's break flag is not changed by PHP
    assert!(!cpu.flag_b());
}

#[test]
fn test_plp_restores_every_flag() {
    let mut cpu = setup_cpu(&[0x28]);
    cpu.memory_mut().write(0x01FF, 0b1100_1111).unwrap();
    cpu.set_sp(0xFE);

    cpu.step(false).unwrap();

    assert!(cpu.flag_n());
    assert!(cpu.flag_v());
    assert!(!cpu.flag_b());
    assert!(cpu.flag_d());
    assert!(cpu.flag_i());
    assert!(cpu.flag_z());
    assert!(cpu.flag_c());
    assert_eq!(cpu.sp(), 0xFF);
}

#[test]
fn test_stack_pointer_wraps_in_page_one() {
    // PHA with SP = 0 writes $0100 and wraps to $FF; PLA wraps back
    let mut cpu = setup_cpu(&[0x48, 0x68]);
    cpu.set_sp(0x00);
    cpu.set_a(0x42);

    cpu.step(false).unwrap();
    assert_eq!(cpu.memory().read(0x0100).unwrap(), 0x42);
    assert_eq!(cpu.sp(), 0xFF);

    cpu.set_a(0x00);
    cpu.step(false).unwrap();
    assert_eq!(cpu.sp(), 0x00);
    assert_eq!(cpu.a(), 0x42);
}
