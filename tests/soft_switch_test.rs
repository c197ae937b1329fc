//! Memory-mapped I/O through the full machine: soft switches, ROM write
//! suppression and video dirtiness.

use raquette::{MemoryBus, Raquette, RaquetteConfig, SoftSwitches};

/// Builds a machine with `program` at 0x8000 and the reset vector pointing at it
fn setup_machine(program: &[u8]) -> Raquette {
    let mut image = vec![0u8; 0x1_0000];
    image[0x8000..0x8000 + program.len()].copy_from_slice(program);
    image[0xFFFC] = 0x00;
    image[0xFFFD] = 0x80;
    Raquette::new(&image, RaquetteConfig::default()).unwrap()
}

#[test]
fn test_store_to_graphics_switch() {
    // STA $C050
    let mut machine = setup_machine(&[0x8D, 0x50, 0xC0]);
    machine.cpu_mut().set_a(0x5A);
    assert!(!machine.switches().graphics);

    machine.step(false).unwrap();

    assert!(machine.switches().graphics);
    // Above the ROM boundary: the byte itself is untouched
    assert_eq!(machine.bus().read(0xC050).unwrap(), 0x00);
}

#[test]
fn test_read_triggers_switch() {
    // LDA $C057; BIT $C055; LDX $C053
    let mut machine = setup_machine(&[0xAD, 0x57, 0xC0, 0x2C, 0x55, 0xC0, 0xAE, 0x53, 0xC0]);

    for _ in 0..3 {
        machine.step(false).unwrap();
    }

    assert_eq!(
        machine.switches(),
        SoftSwitches {
            graphics: false,
            full_screen: false,
            page_two: true,
            hi_res: true,
        }
    );
}

#[test]
fn test_read_modify_write_switch() {
    // INC $C050; DEC $C051
    let mut machine = setup_machine(&[0xEE, 0x50, 0xC0, 0xCE, 0x51, 0xC0]);

    machine.step(false).unwrap();
    assert!(machine.switches().graphics);

    machine.step(false).unwrap();
    assert!(!machine.switches().graphics);
    assert_eq!(machine.bus().read(0xC051).unwrap(), 0x00);
}

#[test]
fn test_rom_writes_suppressed() {
    let mut rom = vec![0xEA; 0x1000];
    // STA $F800; INC $F801 at $F000
    rom[..6].copy_from_slice(&[0x8D, 0x00, 0xF8, 0xEE, 0x01, 0xF8]);
    rom[0x800] = 0x11;
    rom[0x801] = 0x22;
    rom[0xFFC] = 0x00;
    rom[0xFFD] = 0xF0;

    let mut machine = Raquette::with_rom(&rom, 0xF000, RaquetteConfig::default()).unwrap();
    machine.cpu_mut().set_a(0x99);
    machine.step(false).unwrap();
    machine.step(false).unwrap();

    assert_eq!(machine.bus().read(0xF800).unwrap(), 0x11);
    assert_eq!(machine.bus().read(0xF801).unwrap(), 0x22);
}

#[test]
fn test_ram_below_boundary_writable() {
    // STA $BFFF
    let mut machine = setup_machine(&[0x8D, 0xFF, 0xBF]);
    machine.cpu_mut().set_a(0x77);

    machine.step(false).unwrap();

    assert_eq!(machine.bus().read(0xBFFF).unwrap(), 0x77);
}

#[test]
fn test_stack_pushes_bypass_dispatch() {
    // PHA writes through the raw path even with SP pointing at page 1
    let mut machine = setup_machine(&[0x48]);
    machine.cpu_mut().set_a(0x42);

    machine.step(false).unwrap();

    assert_eq!(machine.bus().read(0x01FF).unwrap(), 0x42);
}
