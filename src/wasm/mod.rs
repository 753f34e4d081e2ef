//! WebAssembly bindings for the cpu6502 engine.
//!
//! Exposes the harness surface (reset, poke, execute, inspect) to JavaScript.

pub mod api;

pub use api::Emulator6502;
