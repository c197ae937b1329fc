//! WASM API for the Raquette emulator.
//!
//! Provides JavaScript-callable interfaces for CPU control, keyboard input,
//! state inspection and frame buffer access.

use crate::{
    CpuCore, MemoryBus, Raquette, RaquetteConfig, StepOutcome, SCREEN_HEIGHT, SCREEN_WIDTH,
};
use wasm_bindgen::prelude::*;

/// JavaScript-compatible error wrapper
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsError {
    message: String,
}

#[wasm_bindgen]
impl JsError {
    #[wasm_bindgen(constructor)]
    pub fn new(message: &str) -> JsError {
        JsError {
            message: message.to_string(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

fn js_error<E: std::fmt::Display>(error: E) -> JsError {
    JsError::new(&error.to_string())
}

fn outcome_name(outcome: StepOutcome) -> String {
    match outcome {
        StepOutcome::Continue => "continue".to_string(),
        StepOutcome::Breakpoint => "breakpoint".to_string(),
        StepOutcome::Halted(reason) => format!("halted: {:?}", reason),
    }
}

/// Main emulator interface for JavaScript
#[wasm_bindgen]
pub struct RaquetteEmulator {
    machine: Raquette,
}

#[wasm_bindgen]
impl RaquetteEmulator {
    /// Create an emulator with `rom` loaded at `base`.
    ///
    /// The ROM must contain the reset vector at 0xFFFC.
    #[wasm_bindgen(constructor)]
    pub fn new(rom: &[u8], base: u16) -> Result<RaquetteEmulator, JsError> {
        let machine = Raquette::with_rom(rom, base, RaquetteConfig::default()).map_err(js_error)?;
        Ok(RaquetteEmulator { machine })
    }

    /// Execute a single instruction; returns the outcome as a string
    pub fn step(&mut self) -> Result<String, JsError> {
        self.machine.step(false).map(outcome_name).map_err(js_error)
    }

    /// Execute one frame's worth of instructions
    pub fn run_for(&mut self, microseconds: u32) -> Result<String, JsError> {
        self.machine
            .run_for(microseconds as u64)
            .map(outcome_name)
            .map_err(js_error)
    }

    /// Reset the CPU and display mode; memory is kept
    pub fn reset(&mut self) -> Result<(), JsError> {
        CpuCore::reset(&mut self.machine).map_err(js_error)
    }

    /// Redraw if needed; true when the frame changed
    pub fn render(&mut self) -> bool {
        self.machine.render()
    }

    /// The current frame as RGBA bytes, ready for `ImageData`
    pub fn framebuffer(&self) -> js_sys::Uint8ClampedArray {
        let rgba = self.machine.frame().to_rgba();
        js_sys::Uint8ClampedArray::from(rgba.as_slice())
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> usize {
        SCREEN_WIDTH
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> usize {
        SCREEN_HEIGHT
    }

    // Keyboard

    /// Press a key (ASCII; lower case is folded to upper case)
    pub fn press_key(&mut self, key: u8) -> Result<(), JsError> {
        self.machine
            .press_key(key.to_ascii_uppercase())
            .map_err(js_error)
    }

    pub fn press_enter(&mut self) -> Result<(), JsError> {
        self.machine.press_enter().map_err(js_error)
    }

    /// Call when no key is held down
    pub fn release_key(&mut self) -> Result<(), JsError> {
        self.machine.release_key().map_err(js_error)
    }

    // Register getters
    #[wasm_bindgen(getter)]
    pub fn a(&self) -> u8 {
        self.machine.cpu().a()
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> u8 {
        self.machine.cpu().x()
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> u8 {
        self.machine.cpu().y()
    }

    #[wasm_bindgen(getter)]
    pub fn pc(&self) -> u16 {
        self.machine.cpu().pc()
    }

    #[wasm_bindgen(getter)]
    pub fn sp(&self) -> u8 {
        self.machine.cpu().sp()
    }

    #[wasm_bindgen(getter)]
    pub fn status(&self) -> u8 {
        self.machine.cpu().status()
    }

    #[wasm_bindgen(getter)]
    pub fn instructions(&self) -> f64 {
        self.machine.cpu().instruction_count() as f64 // Convert u64 to f64 for JavaScript
    }

    /// Register dump in monitor format
    pub fn show_registers(&self) -> String {
        self.machine.registers().to_string()
    }

    // Memory access methods

    /// Read a single byte from memory without side effects
    pub fn read_memory(&self, addr: u16) -> Result<u8, JsError> {
        self.machine.bus().read(addr).map_err(js_error)
    }

    /// Read a 256-byte page from memory (for a debugger view)
    pub fn get_memory_page(&self, page: u8) -> Result<Vec<u8>, JsError> {
        let start = (page as usize) << 8;
        self.machine.dump_memory(start, 256).map_err(js_error)
    }

    /// Set or clear (with `undefined`) the breakpoint
    pub fn set_breakpoint(&mut self, addr: Option<u16>) {
        self.machine.cpu_mut().set_breakpoint(addr);
    }
}
