//! # 6502 Instruction Implementations
//!
//! Instruction bodies organized by family. Each handler takes the CPU, the
//! borrowed memory, the decoded opcode metadata and the remaining cycle
//! budget, and runs the instruction to completion.
//!
//! ## Categories
//!
//! - **load_store**: LDA, LDX, LDY
//! - **control**: JSR, RTS, JMP, NOP
//! - **stack**: PHA, PLA, PHP, PLP

pub mod control;
pub mod load_store;
pub mod stack;

use crate::opcodes::{Mnemonic, OpcodeMetadata};
use crate::{ExecutionError, MemoryBus, CPU};

/// Runs the handler for a decoded opcode. Exactly one arm executes.
pub(crate) fn dispatch<M: MemoryBus>(
    cpu: &mut CPU,
    memory: &mut M,
    metadata: &OpcodeMetadata,
    cycles: &mut i64,
) -> Result<(), ExecutionError> {
    match metadata.mnemonic {
        Mnemonic::Lda => load_store::execute_lda(cpu, memory, metadata, cycles),
        Mnemonic::Ldx => load_store::execute_ldx(cpu, memory, metadata, cycles),
        Mnemonic::Ldy => load_store::execute_ldy(cpu, memory, metadata, cycles),
        Mnemonic::Jsr => control::execute_jsr(cpu, memory, metadata, cycles),
        Mnemonic::Rts => control::execute_rts(cpu, memory, metadata, cycles),
        Mnemonic::Jmp => control::execute_jmp(cpu, memory, metadata, cycles),
        Mnemonic::Nop => control::execute_nop(cpu, memory, metadata, cycles),
        Mnemonic::Pha => stack::execute_pha(cpu, memory, metadata, cycles),
        Mnemonic::Pla => stack::execute_pla(cpu, memory, metadata, cycles),
        Mnemonic::Php => stack::execute_php(cpu, memory, metadata, cycles),
        Mnemonic::Plp => stack::execute_plp(cpu, memory, metadata, cycles),
    }
}
