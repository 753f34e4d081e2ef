//! WASM API for the 6502 engine.
//!
//! Wraps one `CPU` and the `FlatMemory` it runs against so JavaScript can
//! load bytes, run a cycle budget and read the resulting state.

use wasm_bindgen::prelude::*;

use crate::{ExecutionError, FlatMemory, MemoryBus, MemoryError, CPU};

/// JavaScript-compatible error wrapper
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsError {
    message: String,
}

#[wasm_bindgen]
impl JsError {
    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

impl From<ExecutionError> for JsError {
    fn from(err: ExecutionError) -> Self {
        JsError {
            message: err.to_string(),
        }
    }
}

impl From<MemoryError> for JsError {
    fn from(err: MemoryError) -> Self {
        JsError {
            message: err.to_string(),
        }
    }
}

/// A CPU and its memory, driven from JavaScript.
#[wasm_bindgen]
pub struct Emulator6502 {
    cpu: CPU,
    memory: FlatMemory,
}

impl Default for Emulator6502 {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl Emulator6502 {
    /// Creates an emulator in the reset state.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Emulator6502 {
        let mut memory = FlatMemory::new();
        let mut cpu = CPU::new();
        cpu.reset(&mut memory);
        Emulator6502 { cpu, memory }
    }

    pub fn reset(&mut self) {
        self.cpu.reset(&mut self.memory);
    }

    pub fn poke(&mut self, address: u16, value: u8) {
        self.memory[address] = value;
    }

    pub fn peek(&self, address: u16) -> u8 {
        self.memory[address]
    }

    /// Copies `bytes` into memory starting at `address`.
    pub fn load(&mut self, address: u16, bytes: &[u8]) -> Result<(), JsError> {
        self.memory.load(address as usize, bytes)?;
        Ok(())
    }

    /// Executes one instruction and returns the cycles it took.
    pub fn step(&mut self) -> Result<u8, JsError> {
        Ok(self.cpu.step(&mut self.memory)?)
    }

    /// Runs a cycle budget and returns the cycles consumed.
    pub fn execute(&mut self, cycles: u32) -> Result<u32, JsError> {
        let consumed = self.cpu.execute(&mut self.memory, i64::from(cycles))?;
        Ok(u32::try_from(consumed).unwrap_or(u32::MAX))
    }

    #[wasm_bindgen(getter)]
    pub fn a(&self) -> u8 {
        self.cpu.a()
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> u8 {
        self.cpu.x()
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> u8 {
        self.cpu.y()
    }

    #[wasm_bindgen(getter)]
    pub fn pc(&self) -> u16 {
        self.cpu.pc()
    }

    #[wasm_bindgen(getter)]
    pub fn sp(&self) -> u8 {
        self.cpu.sp()
    }

    #[wasm_bindgen(getter)]
    pub fn status(&self) -> u8 {
        self.cpu.status()
    }

    /// Total cycles since the last reset, as f64 to stay a plain JS number.
    #[wasm_bindgen(getter)]
    pub fn cycles(&self) -> f64 {
        self.cpu.cycles() as f64
    }
}
