//! # Stack Operations
//!
//! This module implements stack manipulation instructions:
//! - PHA: Push Accumulator on Stack
//! - PLA: Pull Accumulator from Stack
//! - PHP: Push Processor Status on Stack
//! - PLP: Pull Processor Status from Stack
//!
//! The 6502 stack is located at memory addresses 0x0100-0x01FF and grows downward.
//! The stack pointer (SP) is an 8-bit register that serves as an offset into this
//! page. A push writes at 0x0100 | SP and then decrements SP; a pull increments
//! SP and then reads.
//!
//! Every instruction here reads the byte after the opcode and discards it in
//! its second cycle. Pulls spend one more cycle on the current stack slot
//! before incrementing SP.

use crate::cpu::stack_address;
use crate::opcodes::OpcodeMetadata;
use crate::status::StatusFlags;
use crate::{ExecutionError, MemoryBus, CPU};

/// Executes the PHA (Push Accumulator) instruction. 3 cycles.
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
/// memory[0xFFFC] = 0x48; // PHA
/// cpu.set_a(0x42);
///
/// assert_eq!(cpu.step(&mut memory), Ok(3));
/// assert_eq!(memory[0x01FF], 0x42);
/// assert_eq!(cpu.sp(), 0xFE);
/// ```
pub(crate) fn execute_pha<M: MemoryBus>(
    cpu: &mut CPU,
    memory: &mut M,
    _metadata: &OpcodeMetadata,
    cycles: &mut i64,
) -> Result<(), ExecutionError> {
    cpu.read_byte(memory, cycles, cpu.pc)?;
    cpu.push_byte(memory, cycles, cpu.a)
}

/// Executes the PLA (Pull Accumulator) instruction. 4 cycles, sets Z and N.
pub(crate) fn execute_pla<M: MemoryBus>(
    cpu: &mut CPU,
    memory: &mut M,
    _metadata: &OpcodeMetadata,
    cycles: &mut i64,
) -> Result<(), ExecutionError> {
    cpu.read_byte(memory, cycles, cpu.pc)?;
    cpu.read_byte(memory, cycles, stack_address(cpu.sp))?;

    let value = cpu.pull_byte(memory, cycles)?;
    cpu.a = value;
    cpu.set_zn(value);
    Ok(())
}

/// Executes the PHP (Push Processor Status) instruction. 3 cycles.
///
/// The pushed byte always has B (bit 4) and the unused bit 5 set; the live
/// register is unchanged.
pub(crate) fn execute_php<M: MemoryBus>(
    cpu: &mut CPU,
    memory: &mut M,
    _metadata: &OpcodeMetadata,
    cycles: &mut i64,
) -> Result<(), ExecutionError> {
    cpu.read_byte(memory, cycles, cpu.pc)?;
    cpu.push_byte(memory, cycles, cpu.status.to_stack_byte())
}

/// Executes the PLP (Pull Processor Status) instruction. 4 cycles.
///
/// B and bit 5 of the pulled byte are ignored.
pub(crate) fn execute_plp<M: MemoryBus>(
    cpu: &mut CPU,
    memory: &mut M,
    _metadata: &OpcodeMetadata,
    cycles: &mut i64,
) -> Result<(), ExecutionError> {
    cpu.read_byte(memory, cycles, cpu.pc)?;
    cpu.read_byte(memory, cycles, stack_address(cpu.sp))?;

    let value = cpu.pull_byte(memory, cycles)?;
    cpu.status = StatusFlags::from_stack_byte(value);
    Ok(())
}
