//! # 6502 CPU Execution Engine
//!
//! A deterministic, single-stepping NMOS 6502 interpreter with explicit cycle
//! budgeting and a bounds-checked 64KB memory.
//!
//! ## Quick Start
//!
//! ```rust
//! use cpu6502::{CPU, FlatMemory};
//!
//! let mut memory = FlatMemory::new();
//! let mut cpu = CPU::new();
//!
//! // Power-on state: PC = 0xFFFC, SP = 0xFF, memory zeroed
//! cpu.reset(&mut memory);
//!
//! // LDA #$42
//! memory[0xFFFC] = 0xA9;
//! memory[0xFFFD] = 0x42;
//!
//! let consumed = cpu.execute(&mut memory, 2).unwrap();
//!
//! assert_eq!(consumed, 2);
//! assert_eq!(cpu.a(), 0x42);
//! assert!(!cpu.flag_z());
//! assert!(!cpu.flag_n());
//! assert_eq!(cpu.pc(), 0xFFFE);
//! ```
//!
//! ## Architecture
//!
//! - **Memory**: the CPU only sees memory through the `MemoryBus` trait and
//!   borrows it for the duration of each call
//! - **Cycle budget**: threaded by reference through every fetch/read/write
//!   primitive, so each primitive's cost is observable
//! - **Table-driven decoding**: `OPCODE_TABLE` holds the metadata for every
//!   executable opcode; dispatch is an exhaustive match on `Mnemonic`
//!
//! ## Modules
//!
//! - `cpu` - CPU state, fetch primitives, addressing resolver, execution loop
//! - `memory` - MemoryBus trait and FlatMemory
//! - `opcodes` - Opcode metadata table
//! - `addressing` - Addressing mode enumeration
//! - `status` - Packed status register
//! - `config` - Execution configuration

pub mod addressing;
pub mod config;
pub mod cpu;
pub mod memory;
pub mod opcodes;
pub mod status;

#[cfg(feature = "wasm")]
pub mod wasm;

// Internal instruction implementations (not part of public API)
mod instructions;

pub use addressing::{AddressingMode, Operand};
pub use config::{BudgetPolicy, CpuConfig};
pub use cpu::CPU;
pub use memory::{FlatMemory, MemoryBus, MemoryError, MEMORY_SIZE};
pub use opcodes::{decode, Mnemonic, OpcodeMetadata, OPCODE_TABLE};
pub use status::StatusFlags;

use thiserror::Error;

/// Errors that can occur during CPU execution.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    /// A memory access fell outside the bus.
    #[error(transparent)]
    Memory(#[from] MemoryError),

    /// The fetched byte does not decode to any executable instruction.
    #[error("illegal opcode 0x{0:02X}")]
    IllegalOpcode(u8),

    /// Under `BudgetPolicy::Strict`, the next instruction costs more than
    /// the remaining budget. Nothing was fetched.
    #[error("opcode 0x{opcode:02X} needs {required} cycles but only {remaining} remain")]
    CycleBudgetExhausted {
        opcode: u8,
        required: u8,
        remaining: i64,
    },

    /// An instruction asked the resolver for a data operand in a mode that
    /// has none.
    #[error("{mnemonic} cannot take a data operand in {mode} mode")]
    UnsupportedAddressingMode {
        mnemonic: Mnemonic,
        mode: AddressingMode,
    },
}
