//! Fuzz target for the Raquette machine.
//!
//! Loads arbitrary code and video memory, sets an arbitrary CPU state and
//! display mode, then runs a few instructions and renders. Undefined opcodes
//! are fine; panics are not.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use raquette::{MemoryBus, Raquette, RaquetteConfig, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Arbitrary CPU initial state
#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    status: u8,
}

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    /// Code at 0x8000
    program: [u8; 32],
    /// Zero page contents
    zero_page: [u8; 256],
    /// Start of text page 1
    text: [u8; 128],
    /// Start of hi-res page 1
    hires: [u8; 128],
    /// Soft switch addresses touched before rendering (low three bits)
    switches: Vec<u8>,
    key: Option<u8>,
    steps: u8,
}

fuzz_target!(|input: FuzzInput| {
    let mut image = vec![0u8; 0x1_0000];
    image[0xFFFC] = 0x00;
    image[0xFFFD] = 0x80;
    image[0xFFFE] = 0x00;
    image[0xFFFF] = 0x90;
    image[0x8000..0x8020].copy_from_slice(&input.program);
    image[..0x100].copy_from_slice(&input.zero_page);
    image[0x0400..0x0480].copy_from_slice(&input.text);
    image[0x2000..0x2080].copy_from_slice(&input.hires);

    let Ok(mut machine) = Raquette::new(&image, RaquetteConfig::default()) else {
        return;
    };

    let cpu = machine.cpu_mut();
    cpu.set_a(input.cpu_state.a);
    cpu.set_x(input.cpu_state.x);
    cpu.set_y(input.cpu_state.y);
    cpu.set_sp(input.cpu_state.sp);
    cpu.set_status(input.cpu_state.status);

    if let Some(key) = input.key {
        let _ = machine.press_key(key);
    }

    for _ in 0..input.steps % 16 {
        if machine.step(false).is_err() {
            break;
        }
    }

    for switch in input.switches.iter().take(8) {
        let addr = 0xC050 | (*switch as u16 & 0x07);
        let _ = machine.cpu_mut().memory_mut().access(addr);
    }

    machine.render();
    assert_eq!(machine.frame().as_slice().len(), SCREEN_WIDTH * SCREEN_HEIGHT);
    assert_eq!(machine.cpu().status() & 0x20, 0x20);
});
