//! # CPU State and Execution
//!
//! This module contains the CPU struct representing the 6502 processor state,
//! the fetch primitives, the shared addressing-mode resolver and the
//! fetch-decode-execute loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: Accumulator (A), index registers (X, Y)
//! - **Program counter** (PC): 16-bit address of next instruction
//! - **Stack pointer** (SP): 8-bit offset into stack page (0x0100-0x01FF)
//! - **Status register**: N, V, B, D, I, Z, C packed in `StatusFlags`
//! - **Cycle counter**: total cycles charged since the last reset
//!
//! ## Execution Model
//!
//! - `step()`: Execute one instruction, returning the cycles it took
//! - `execute()`: Execute instructions while the cycle budget is positive
//!
//! The remaining budget is passed as `&mut i64` to every primitive
//! (`fetch_byte`, `fetch_word`, `read_byte`, `write_byte`), and each primitive
//! charges exactly the bus cycles it performs. Instruction timing is the sum of
//! its primitives, so the hardware's internal cycles appear as dummy reads.

use log::{debug, trace, warn};

use crate::addressing::{AddressingMode, Operand};
use crate::config::{BudgetPolicy, CpuConfig};
use crate::instructions;
use crate::opcodes::{decode, Mnemonic};
use crate::status::StatusFlags;
use crate::{ExecutionError, MemoryBus};

/// Program counter value established by `reset`.
pub const RESET_PC: u16 = 0xFFFC;

/// Stack pointer value established by `reset` (top of the stack page).
pub const RESET_SP: u8 = 0xFF;

/// Base address of the stack page.
pub const STACK_BASE: u16 = 0x0100;

/// Full stack address for a stack pointer value.
pub(crate) fn stack_address(sp: u8) -> u16 {
    STACK_BASE | sp as u16
}

/// 6502 CPU state and execution context.
///
/// The CPU does not own its memory; every operation borrows a `MemoryBus`.
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
/// assert_eq!(cpu.pc(), 0xFFFC);
/// assert_eq!(cpu.sp(), 0xFF);
/// assert_eq!(cpu.status(), 0x00);
/// assert_eq!(cpu.cycles(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CPU {
    /// Accumulator register
    pub(crate) a: u8,

    /// X index register
    pub(crate) x: u8,

    /// Y index register
    pub(crate) y: u8,

    /// Program counter (address of next instruction)
    pub(crate) pc: u16,

    /// Stack pointer (0x0100 + sp is the next free slot)
    pub(crate) sp: u8,

    pub(crate) status: StatusFlags,

    /// Total CPU cycles charged since the last reset
    pub(crate) cycles: u64,

    config: CpuConfig,
}

impl Default for CPU {
    fn default() -> Self {
        Self::new()
    }
}

impl CPU {
    /// Creates a CPU in the power-on register state with the default
    /// configuration. Memory is not touched until `reset`.
    pub fn new() -> Self {
        Self::with_config(CpuConfig::default())
    }

    pub fn with_config(config: CpuConfig) -> Self {
        Self {
            a: 0x00,
            x: 0x00,
            y: 0x00,
            pc: RESET_PC,
            sp: RESET_SP,
            status: StatusFlags::empty(),
            cycles: 0,
            config,
        }
    }

    pub fn config(&self) -> &CpuConfig {
        &self.config
    }

    /// Re-establishes the power-on state and zeroes `memory`.
    ///
    /// - PC = 0xFFFC (the reset vector location)
    /// - SP = 0xFF
    /// - A, X, Y and every status flag cleared
    /// - cycle counter cleared
    pub fn reset<M: MemoryBus>(&mut self, memory: &mut M) {
        self.pc = RESET_PC;
        self.sp = RESET_SP;
        self.status = StatusFlags::empty();
        self.a = 0x00;
        self.x = 0x00;
        self.y = 0x00;
        self.cycles = 0;
        memory.initialize();

        debug!("reset: PC={:#06X} SP={:#04X}", self.pc, self.sp);
    }

    /// Executes one instruction and returns the number of cycles it took.
    ///
    /// # Examples
    ///
    /// ```
    /// use cpu6502::{CPU, ExecutionError, FlatMemory};
    ///
    /// let mut memory = FlatMemory::new();
    /// let mut cpu = CPU::new();
    /// cpu.reset(&mut memory);
    ///
    /// memory[0xFFFC] = 0xB5; // LDA $01,X
    /// memory[0xFFFD] = 0x01;
    /// memory[0x0000] = 0x99;
    /// cpu.set_x(0xFF);
    ///
    /// assert_eq!(cpu.step(&mut memory), Ok(4));
    /// assert_eq!(cpu.a(), 0x99); // ($01 + $FF) wraps to $00
    ///
    /// memory[0xFFFE] = 0xFF;
    /// assert_eq!(cpu.step(&mut memory), Err(ExecutionError::IllegalOpcode(0xFF)));
    /// ```
    pub fn step<M: MemoryBus>(&mut self, memory: &mut M) -> Result<u8, ExecutionError> {
        let mut cycles = 0;
        self.execute_instruction(memory, &mut cycles)?;
        Ok((-cycles) as u8)
    }

    /// Executes instructions while `budget` is positive and returns the
    /// number of cycles consumed.
    ///
    /// With `BudgetPolicy::Overdraw` (the default) the last instruction always
    /// completes, so the result can exceed `budget`. With
    /// `BudgetPolicy::Strict` an instruction whose base cost does not fit is
    /// not started and `ExecutionError::CycleBudgetExhausted` is returned.
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
    /// memory[0xFFFC] = 0xA9; // LDA #$42
    /// memory[0xFFFD] = 0x42;
    ///
    /// // One cycle is enough to start the instruction; it finishes anyway.
    /// assert_eq!(cpu.execute(&mut memory, 1), Ok(2));
    /// assert_eq!(cpu.a(), 0x42);
    /// ```
    pub fn execute<M: MemoryBus>(
        &mut self,
        memory: &mut M,
        budget: i64,
    ) -> Result<u64, ExecutionError> {
        let mut cycles = budget;

        while cycles > 0 {
            if self.config.budget_policy == BudgetPolicy::Strict {
                self.check_budget(memory, cycles)?;
            }
            self.execute_instruction(memory, &mut cycles)?;
        }

        Ok(u64::try_from(budget - cycles).unwrap_or(0))
    }

    /// Refuses the next instruction if its base cost exceeds `remaining`.
    /// Bytes that do not decode are left for dispatch to report.
    fn check_budget<M: MemoryBus>(&self, memory: &M, remaining: i64) -> Result<(), ExecutionError> {
        let opcode = memory.read(self.pc as usize)?;
        match decode(opcode) {
            Some(metadata) if i64::from(metadata.base_cycles) > remaining => {
                debug!(
                    "{:04X}: {} needs {} cycles, {} remain",
                    self.pc, metadata.mnemonic, metadata.base_cycles, remaining
                );
                Err(ExecutionError::CycleBudgetExhausted {
                    opcode,
                    required: metadata.base_cycles,
                    remaining,
                })
            }
            _ => Ok(()),
        }
    }

    fn execute_instruction<M: MemoryBus>(
        &mut self,
        memory: &mut M,
        cycles: &mut i64,
    ) -> Result<(), ExecutionError> {
        let pc = self.pc;
        let opcode = self.fetch_byte(memory, cycles)?;

        let Some(metadata) = decode(opcode) else {
            warn!("{:04X}: illegal opcode {:02X}", pc, opcode);
            return Err(ExecutionError::IllegalOpcode(opcode));
        };

        trace!(
            "{:04X}: {:02X} {} {} A:{:02X} X:{:02X} Y:{:02X} P:{:?} SP:{:02X}",
            pc,
            opcode,
            metadata.mnemonic,
            metadata.addressing_mode,
            self.a,
            self.x,
            self.y,
            self.status,
            self.sp
        );

        instructions::dispatch(self, memory, metadata, cycles)
    }

    // ========== Fetch Primitives ==========

    fn charge(&mut self, cycles: &mut i64, count: u8) {
        *cycles -= i64::from(count);
        self.cycles += u64::from(count);
    }

    /// Reads the byte at PC and advances PC. 1 cycle.
    pub fn fetch_byte<M: MemoryBus>(
        &mut self,
        memory: &M,
        cycles: &mut i64,
    ) -> Result<u8, ExecutionError> {
        let value = memory.read(self.pc as usize)?;
        self.pc = self.pc.wrapping_add(1);
        self.charge(cycles, 1);
        Ok(value)
    }

    /// Reads a little-endian word at PC and advances PC by two. 2 cycles.
    pub fn fetch_word<M: MemoryBus>(
        &mut self,
        memory: &M,
        cycles: &mut i64,
    ) -> Result<u16, ExecutionError> {
        let lo = self.fetch_byte(memory, cycles)?;
        let hi = self.fetch_byte(memory, cycles)?;
        Ok(u16::from_le_bytes([lo, hi]))
    }

    /// Reads an already-resolved address. 1 cycle.
    pub fn read_byte<M: MemoryBus>(
        &mut self,
        memory: &M,
        cycles: &mut i64,
        address: u16,
    ) -> Result<u8, ExecutionError> {
        let value = memory.read(address as usize)?;
        self.charge(cycles, 1);
        Ok(value)
    }

    /// Writes an already-resolved address. 1 cycle.
    pub fn write_byte<M: MemoryBus>(
        &mut self,
        memory: &mut M,
        cycles: &mut i64,
        address: u16,
        value: u8,
    ) -> Result<(), ExecutionError> {
        memory.write(address as usize, value)?;
        self.charge(cycles, 1);
        Ok(())
    }

    // ========== Stack ==========

    pub(crate) fn push_byte<M: MemoryBus>(
        &mut self,
        memory: &mut M,
        cycles: &mut i64,
        value: u8,
    ) -> Result<(), ExecutionError> {
        self.write_byte(memory, cycles, stack_address(self.sp), value)?;
        self.sp = self.sp.wrapping_sub(1);
        Ok(())
    }

    pub(crate) fn pull_byte<M: MemoryBus>(
        &mut self,
        memory: &M,
        cycles: &mut i64,
    ) -> Result<u8, ExecutionError> {
        self.sp = self.sp.wrapping_add(1);
        self.read_byte(memory, cycles, stack_address(self.sp))
    }

    /// Pushes high byte then low byte, leaving the word little-endian at
    /// `0x0100 + SP + 1`. 2 cycles.
    pub(crate) fn push_word<M: MemoryBus>(
        &mut self,
        memory: &mut M,
        cycles: &mut i64,
        value: u16,
    ) -> Result<(), ExecutionError> {
        if self.sp == 0x00 {
            // slots are $0100 and $01FF: not contiguous
            let [lo, hi] = value.to_le_bytes();
            self.push_byte(memory, cycles, hi)?;
            return self.push_byte(memory, cycles, lo);
        }

        let before = *cycles;
        let address = stack_address(self.sp.wrapping_sub(1));
        memory.write_word(address as usize, value, cycles)?;
        self.cycles += (before - *cycles) as u64;
        self.sp = self.sp.wrapping_sub(2);
        Ok(())
    }

    pub(crate) fn pull_word<M: MemoryBus>(
        &mut self,
        memory: &M,
        cycles: &mut i64,
    ) -> Result<u16, ExecutionError> {
        let lo = self.pull_byte(memory, cycles)?;
        let hi = self.pull_byte(memory, cycles)?;
        Ok(u16::from_le_bytes([lo, hi]))
    }

    // ========== Addressing ==========

    /// Resolves the operand of `mnemonic` in `mode`, consuming its operand
    /// bytes from the instruction stream.
    pub fn resolve<M: MemoryBus>(
        &mut self,
        memory: &M,
        cycles: &mut i64,
        mnemonic: Mnemonic,
        mode: AddressingMode,
    ) -> Result<Operand, ExecutionError> {
        let operand = match mode {
            AddressingMode::Immediate => Operand::Value(self.fetch_byte(memory, cycles)?),
            AddressingMode::ZeroPage => {
                Operand::Address(u16::from(self.fetch_byte(memory, cycles)?))
            }
            AddressingMode::ZeroPageX => {
                Operand::Address(self.zero_page_indexed(memory, cycles, self.x)?)
            }
            AddressingMode::ZeroPageY => {
                Operand::Address(self.zero_page_indexed(memory, cycles, self.y)?)
            }
            AddressingMode::Absolute => Operand::Address(self.fetch_word(memory, cycles)?),
            AddressingMode::AbsoluteX => {
                let base = self.fetch_word(memory, cycles)?;
                Operand::Address(self.index_absolute(memory, cycles, base, self.x)?)
            }
            AddressingMode::AbsoluteY => {
                let base = self.fetch_word(memory, cycles)?;
                Operand::Address(self.index_absolute(memory, cycles, base, self.y)?)
            }
            AddressingMode::IndirectX => {
                let pointer = self.fetch_byte(memory, cycles)?;
                self.read_byte(memory, cycles, u16::from(pointer))?;
                let pointer = pointer.wrapping_add(self.x);
                Operand::Address(self.read_zero_page_word(memory, cycles, pointer)?)
            }
            AddressingMode::IndirectY => {
                let pointer = self.fetch_byte(memory, cycles)?;
                let base = self.read_zero_page_word(memory, cycles, pointer)?;
                Operand::Address(self.index_absolute(memory, cycles, base, self.y)?)
            }
            AddressingMode::Implicit
            | AddressingMode::Accumulator
            | AddressingMode::Relative
            | AddressingMode::Indirect => {
                return Err(ExecutionError::UnsupportedAddressingMode { mnemonic, mode })
            }
        };

        Ok(operand)
    }

    /// Resolves and dereferences the operand of `mnemonic` in `mode`.
    pub fn operand_value<M: MemoryBus>(
        &mut self,
        memory: &M,
        cycles: &mut i64,
        mnemonic: Mnemonic,
        mode: AddressingMode,
    ) -> Result<u8, ExecutionError> {
        match self.resolve(memory, cycles, mnemonic, mode)? {
            Operand::Value(value) => Ok(value),
            Operand::Address(address) => self.read_byte(memory, cycles, address),
        }
    }

    /// Zero page base plus index, wrapping within page zero. The unindexed
    /// address is read while the index is added.
    fn zero_page_indexed<M: MemoryBus>(
        &mut self,
        memory: &M,
        cycles: &mut i64,
        index: u8,
    ) -> Result<u16, ExecutionError> {
        let base = self.fetch_byte(memory, cycles)?;
        self.read_byte(memory, cycles, u16::from(base))?;
        Ok(u16::from(base.wrapping_add(index)))
    }

    /// 16-bit base plus index. Crossing a page costs a read of the address
    /// before the carry is applied.
    fn index_absolute<M: MemoryBus>(
        &mut self,
        memory: &M,
        cycles: &mut i64,
        base: u16,
        index: u8,
    ) -> Result<u16, ExecutionError> {
        let address = base.wrapping_add(u16::from(index));
        if (base ^ address) & 0xFF00 != 0 {
            let uncarried = (base & 0xFF00) | (address & 0x00FF);
            self.read_byte(memory, cycles, uncarried)?;
        }
        Ok(address)
    }

    /// Pointer read from page zero; the high byte wraps to $00 after $FF.
    fn read_zero_page_word<M: MemoryBus>(
        &mut self,
        memory: &M,
        cycles: &mut i64,
        pointer: u8,
    ) -> Result<u16, ExecutionError> {
        let lo = self.read_byte(memory, cycles, u16::from(pointer))?;
        let hi = self.read_byte(memory, cycles, u16::from(pointer.wrapping_add(1)))?;
        Ok(u16::from_le_bytes([lo, hi]))
    }

    // ========== Flags ==========

    /// Z and N from a loaded value; other flags untouched.
    pub(crate) fn set_zn(&mut self, value: u8) {
        self.status.set(StatusFlags::ZERO, value == 0);
        self.status.set(StatusFlags::NEGATIVE, value & 0x80 != 0);
    }

    // ========== Register Access ==========

    pub fn a(&self) -> u8 {
        self.a
    }

    pub fn x(&self) -> u8 {
        self.x
    }

    pub fn y(&self) -> u8 {
        self.y
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Returns the stack pointer value.
    ///
    /// Note: The full stack address is 0x0100 + SP. The stack grows downward from 0x01FF.
    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// Returns the status register as a packed byte (NV-BDIZC).
    ///
    /// Bit 5 and B are only ever set here by `set_status`; the copy PHP
    /// pushes always has both set.
    pub fn status(&self) -> u8 {
        self.status.bits()
    }

    pub fn status_flags(&self) -> StatusFlags {
        self.status
    }

    /// Returns the total number of cycles charged since the last reset.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }

    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }

    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    pub fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }

    /// Unpacks a status byte into the individual flags.
    pub fn set_status(&mut self, value: u8) {
        self.status = StatusFlags::from_bits_truncate(value);
    }

    // ========== Status Flags ==========

    pub fn flag_n(&self) -> bool {
        self.status.contains(StatusFlags::NEGATIVE)
    }

    pub fn flag_v(&self) -> bool {
        self.status.contains(StatusFlags::OVERFLOW)
    }

    pub fn flag_b(&self) -> bool {
        self.status.contains(StatusFlags::BREAK)
    }

    pub fn flag_d(&self) -> bool {
        self.status.contains(StatusFlags::DECIMAL)
    }

    pub fn flag_i(&self) -> bool {
        self.status.contains(StatusFlags::IRQ_DISABLE)
    }

    pub fn flag_z(&self) -> bool {
        self.status.contains(StatusFlags::ZERO)
    }

    pub fn flag_c(&self) -> bool {
        self.status.contains(StatusFlags::CARRY)
    }

    pub fn set_flag_n(&mut self, value: bool) {
        self.status.set(StatusFlags::NEGATIVE, value);
    }

    pub fn set_flag_v(&mut self, value: bool) {
        self.status.set(StatusFlags::OVERFLOW, value);
    }

    pub fn set_flag_b(&mut self, value: bool) {
        self.status.set(StatusFlags::BREAK, value);
    }

    pub fn set_flag_d(&mut self, value: bool) {
        self.status.set(StatusFlags::DECIMAL, value);
    }

    pub fn set_flag_i(&mut self, value: bool) {
        self.status.set(StatusFlags::IRQ_DISABLE, value);
    }

    pub fn set_flag_z(&mut self, value: bool) {
        self.status.set(StatusFlags::ZERO, value);
    }

    pub fn set_flag_c(&mut self, value: bool) {
        self.status.set(StatusFlags::CARRY, value);
    }
}
