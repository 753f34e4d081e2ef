//! # Load Instructions
//!
//! This module implements the register loads:
//! - LDA: Load Accumulator
//! - LDX: Load X Register
//! - LDY: Load Y Register
//!
//! All three share one flag rule: Z is set if the loaded value is zero, N is
//! set from bit 7, and every other flag is left alone.

use crate::opcodes::OpcodeMetadata;
use crate::{ExecutionError, MemoryBus, CPU};

fn load_operand<M: MemoryBus>(
    cpu: &mut CPU,
    memory: &M,
    metadata: &OpcodeMetadata,
    cycles: &mut i64,
) -> Result<u8, ExecutionError> {
    let value = cpu.operand_value(memory, cycles, metadata.mnemonic, metadata.addressing_mode)?;
    cpu.set_zn(value);
    Ok(value)
}

/// Executes the LDA (Load Accumulator) instruction.
///
/// # Examples
///
/// ```
/// use cpu6502::{CPU, FlatMemory};
///
/// let mut memory = FlatMemory::new();
/// let mut cpu = CPU::new();
/// cpu.reset(&mut memory);
///
/// memory[0xFFFC] = 0xA5; // LDA $10
/// memory[0xFFFD] = 0x10;
/// memory[0x0010] = 0x80;
///
/// assert_eq!(cpu.step(&mut memory), Ok(3));
/// assert_eq!(cpu.a(), 0x80);
/// assert!(cpu.flag_n());
/// assert!(!cpu.flag_z());
/// ```
pub(crate) fn execute_lda<M: MemoryBus>(
    cpu: &mut CPU,
    memory: &mut M,
    metadata: &OpcodeMetadata,
    cycles: &mut i64,
) -> Result<(), ExecutionError> {
    cpu.a = load_operand(cpu, memory, metadata, cycles)?;
    Ok(())
}

/// Executes the LDX (Load X Register) instruction.
pub(crate) fn execute_ldx<M: MemoryBus>(
    cpu: &mut CPU,
    memory: &mut M,
    metadata: &OpcodeMetadata,
    cycles: &mut i64,
) -> Result<(), ExecutionError> {
    cpu.x = load_operand(cpu, memory, metadata, cycles)?;
    Ok(())
}

/// Executes the LDY (Load Y Register) instruction.
pub(crate) fn execute_ldy<M: MemoryBus>(
    cpu: &mut CPU,
    memory: &mut M,
    metadata: &OpcodeMetadata,
    cycles: &mut i64,
) -> Result<(), ExecutionError> {
    cpu.y = load_operand(cpu, memory, metadata, cycles)?;
    Ok(())
}
