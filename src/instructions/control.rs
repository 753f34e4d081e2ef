//! # Control Flow Instructions
//!
//! This module implements control flow operations:
//! - JSR: Jump to Subroutine
//! - RTS: Return from Subroutine
//! - JMP: Jump (absolute)
//! - NOP: No Operation
//!
//! JSR pushes the address of its own last byte, not the address of the next
//! instruction; RTS compensates by adding one to the pulled address.

use crate::cpu::stack_address;
use crate::opcodes::OpcodeMetadata;
use crate::{AddressingMode, ExecutionError, MemoryBus, CPU};

/// Executes the JSR (Jump to Subroutine) instruction.
///
/// 1. Fetch the 16-bit target (2 cycles)
/// 2. Internal cycle: the current stack slot is read
/// 3. Push PC - 1 as a word, high byte first, SP -= 2 (2 cycles)
/// 4. PC = target
///
/// Cycle timing: 6 cycles. Flags affected: None
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
/// memory[0xFFFC] = 0x20; // JSR $1234
/// memory[0xFFFD] = 0x34;
/// memory[0xFFFE] = 0x12;
///
/// assert_eq!(cpu.step(&mut memory), Ok(6));
/// assert_eq!(cpu.pc(), 0x1234);
/// assert_eq!(cpu.sp(), 0xFD);
/// assert_eq!(memory[0x01FF], 0xFF); // return address high byte
/// assert_eq!(memory[0x01FE], 0xFE); // return address low byte
/// ```
pub(crate) fn execute_jsr<M: MemoryBus>(
    cpu: &mut CPU,
    memory: &mut M,
    _metadata: &OpcodeMetadata,
    cycles: &mut i64,
) -> Result<(), ExecutionError> {
    let target = cpu.fetch_word(memory, cycles)?;

    cpu.read_byte(memory, cycles, stack_address(cpu.sp))?;

    let return_address = cpu.pc.wrapping_sub(1);
    cpu.push_word(memory, cycles, return_address)?;

    cpu.pc = target;
    Ok(())
}

/// Executes the RTS (Return from Subroutine) instruction.
///
/// Pulls the return address pushed by JSR and resumes at the byte after it.
///
/// Cycle timing: 6 cycles. Flags affected: None
pub(crate) fn execute_rts<M: MemoryBus>(
    cpu: &mut CPU,
    memory: &mut M,
    _metadata: &OpcodeMetadata,
    cycles: &mut i64,
) -> Result<(), ExecutionError> {
    cpu.read_byte(memory, cycles, cpu.pc)?;
    cpu.read_byte(memory, cycles, stack_address(cpu.sp))?;

    let return_address = cpu.pull_word(memory, cycles)?;

    cpu.read_byte(memory, cycles, return_address)?;
    cpu.pc = return_address.wrapping_add(1);
    Ok(())
}

/// Executes the JMP (Jump) instruction.
///
/// Only the absolute form (0x4C, 3 cycles) is decoded; the indirect form
/// would add an `AddressingMode::Indirect` arm here.
pub(crate) fn execute_jmp<M: MemoryBus>(
    cpu: &mut CPU,
    memory: &mut M,
    metadata: &OpcodeMetadata,
    cycles: &mut i64,
) -> Result<(), ExecutionError> {
    cpu.pc = match metadata.addressing_mode {
        AddressingMode::Absolute => cpu.fetch_word(memory, cycles)?,
        mode => {
            return Err(ExecutionError::UnsupportedAddressingMode {
                mnemonic: metadata.mnemonic,
                mode,
            })
        }
    };
    Ok(())
}

/// Executes the NOP (No Operation) instruction.
///
/// The second cycle reads the next byte and discards it. 2 cycles.
pub(crate) fn execute_nop<M: MemoryBus>(
    cpu: &mut CPU,
    memory: &mut M,
    _metadata: &OpcodeMetadata,
    cycles: &mut i64,
) -> Result<(), ExecutionError> {
    cpu.read_byte(memory, cycles, cpu.pc)?;
    Ok(())
}
