//! Tests for the ADC and SBC instructions.
//!
//! Tests cover:
//! - The full 256 x 256 x 2 binary-mode grid for carry, overflow, zero and negative
//! - Packed BCD arithmetic in decimal mode
//! - Decimal mode leaving N and V untouched

use raquette::{Memory, MemoryBus, CPU};

/// Helper function to create a CPU with reset vector at 0x8000
fn setup_cpu() -> CPU<Memory> {
    let mut memory = Memory::new(0x1_0000).unwrap();
    memory.write(0xFFFC, 0x00).unwrap();
    memory.write(0xFFFD, 0x80).unwrap();
    CPU::new(memory).unwrap()
}

/// Runs `opcode #operand` once with the given accumulator and carry.
fn run_immediate(cpu: &mut CPU<Memory>, opcode: u8, a: u8, operand: u8, carry: bool) {
    cpu.memory_mut().write(0x8000, opcode).unwrap();
    cpu.memory_mut().write(0x8001, operand).unwrap();
    cpu.set_pc(0x8000);
    cpu.set_a(a);
    cpu.set_flag_c(carry);
    cpu.step(false).unwrap();
}

// ========== Binary Mode ==========

#[test]
fn test_adc_binary_exhaustive() {
    let mut cpu = setup_cpu();

    for a in 0..=255u8 {
        for operand in 0..=255u8 {
            for carry in [false, true] {
                run_immediate(&mut cpu, 0x69, a, operand, carry);

                let unsigned = a as u16 + operand as u16 + carry as u16;
                let signed = a as i8 as i16 + operand as i8 as i16 + carry as i16;
                let result = unsigned as u8;

                assert_eq!(cpu.a(), result, "{:02X} + {:02X} + {}", a, operand, carry);
                assert_eq!(cpu.flag_c(), unsigned > 0xFF);
                assert_eq!(cpu.flag_v(), !(-128..=127).contains(&signed));
                assert_eq!(cpu.flag_z(), result == 0);
                assert_eq!(cpu.flag_n(), result & 0x80 != 0);
                assert_eq!(cpu.pc(), 0x8002);
            }
        }
    }
}

#[test]
fn test_sbc_binary_exhaustive() {
    let mut cpu = setup_cpu();

    for a in 0..=255u8 {
        for operand in 0..=255u8 {
            for carry in [false, true] {
                run_immediate(&mut cpu, 0xE9, a, operand, carry);

                let borrow = (!carry) as i16;
                let unsigned = a as i16 - operand as i16 - borrow;
                let signed = a as i8 as i16 - operand as i8 as i16 - borrow;
                let result = unsigned as u8;

                assert_eq!(cpu.a(), result, "{:02X} - {:02X} - {}", a, operand, borrow);
                assert_eq!(cpu.flag_c(), unsigned >= 0);
                assert_eq!(cpu.flag_v(), !(-128..=127).contains(&signed));
                assert_eq!(cpu.flag_z(), result == 0);
                assert_eq!(cpu.flag_n(), result & 0x80 != 0);
            }
        }
    }
}

#[test]
fn test_adc_zero_page() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x0042, 0x30).unwrap();

    // ADC $42
    cpu.memory_mut().load(0x8000, &[0x65, 0x42]).unwrap();
    cpu.set_a(0x12);

    cpu.step(false).unwrap();

    assert_eq!(cpu.a(), 0x42);
    assert_eq!(cpu.pc(), 0x8002);
}

// ========== Decimal Mode ==========

#[test]
fn test_adc_decimal() {
    let mut cpu = setup_cpu();
    cpu.set_flag_d(true);

    run_immediate(&mut cpu, 0x69, 0x15, 0x27, false);
    assert_eq!(cpu.a(), 0x42);
    assert!(!cpu.flag_c());
    assert!(!cpu.flag_z());

    run_immediate(&mut cpu, 0x69, 0x99, 0x00, true);
    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_c());
    assert!(cpu.flag_z());

    run_immediate(&mut cpu, 0x69, 0x58, 0x46, true);
    assert_eq!(cpu.a(), 0x05);
    assert!(cpu.flag_c());
}

#[test]
fn test_sbc_decimal() {
    let mut cpu = setup_cpu();
    cpu.set_flag_d(true);

    run_immediate(&mut cpu, 0xE9, 0x42, 0x15, true);
    assert_eq!(cpu.a(), 0x27);
    assert!(cpu.flag_c());

    run_immediate(&mut cpu, 0xE9, 0x00, 0x01, true);
    assert_eq!(cpu.a(), 0x99);
    assert!(!cpu.flag_c());

    run_immediate(&mut cpu, 0xE9, 0x50, 0x49, false);
    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_c());
    assert!(cpu.flag_z());
}

#[test]
fn test_decimal_leaves_overflow_and_negative() {
    let mut cpu = setup_cpu();
    cpu.set_flag_d(true);

    cpu.set_flag_v(true);
    cpu.set_flag_n(false);
    run_immediate(&mut cpu, 0x69, 0x45, 0x45, false);
    assert_eq!(cpu.a(), 0x90);
    assert!(cpu.flag_v());
    assert!(!cpu.flag_n());

    cpu.set_flag_v(false);
    cpu.set_flag_n(true);
    run_immediate(&mut cpu, 0xE9, 0x10, 0x01, true);
    assert_eq!(cpu.a(), 0x09);
    assert!(!cpu.flag_v());
    assert!(cpu.flag_n());
}
