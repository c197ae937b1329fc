//! WebAssembly bindings for the Raquette emulator.
//!
//! This module exposes the machine to JavaScript so a browser page can drive
//! the CPU, feed the keyboard and blit the frame buffer to a canvas.

#[cfg(feature = "wasm")]
pub mod api;

#[cfg(feature = "wasm")]
pub use api::RaquetteEmulator;
