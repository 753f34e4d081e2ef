//! # Memory Bus Abstraction
//!
//! This module provides the `MemoryBus` trait that decouples the CPU from a
//! specific memory implementation, and `FlatMemory`, the 64KB store the CPU
//! normally runs against.
//!
//! ## Design Principles
//!
//! - Every access is bounds-checked: an address outside `[0, size)` is a
//!   `MemoryError::OutOfRange`, never wrapped or truncated
//! - The memory is owned by the caller and only borrowed by the CPU
//! - `write_word` charges its two bus cycles to the caller's budget

use std::ops::{Index, IndexMut};

use thiserror::Error;

/// Capacity of the 6502 address space in bytes.
pub const MEMORY_SIZE: usize = 0x10000;

/// Errors raised by memory accesses.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MemoryError {
    /// The address lies outside `[0, size)`.
    #[error("address 0x{address:X} is out of range for {size}-byte memory")]
    OutOfRange { address: usize, size: usize },
}

/// Memory bus trait for the CPU to read and write bytes.
///
/// # Examples
///
/// ```
/// use cpu6502::{FlatMemory, MemoryBus, MemoryError};
///
/// let mut mem = FlatMemory::new();
/// mem.write(0x1234, 0x42).unwrap();
/// assert_eq!(mem.read(0x1234), Ok(0x42));
///
/// assert_eq!(
///     mem.read(0x10000),
///     Err(MemoryError::OutOfRange { address: 0x10000, size: 0x10000 })
/// );
/// ```
pub trait MemoryBus {
    /// Number of addressable bytes.
    fn size(&self) -> usize;

    /// Reads the byte at `address`.
    fn read(&self, address: usize) -> Result<u8, MemoryError>;

    /// Replaces the byte at `address`.
    fn write(&mut self, address: usize, value: u8) -> Result<(), MemoryError>;

    /// Sets every cell to zero.
    fn initialize(&mut self) {
        for address in 0..self.size() {
            // in range by construction
            let _ = self.write(address, 0x00);
        }
    }

    /// Fails with `OutOfRange` unless `address` is addressable.
    fn check(&self, address: usize) -> Result<(), MemoryError> {
        if address < self.size() {
            Ok(())
        } else {
            Err(MemoryError::OutOfRange {
                address,
                size: self.size(),
            })
        }
    }

    /// Writes `value` little-endian at `address` and `address + 1`, charging
    /// two cycles to `cycles`.
    ///
    /// Both addresses are checked before anything is written, so a failing
    /// call leaves memory and the budget untouched.
    ///
    /// ```
    /// use cpu6502::{FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// let mut cycles = 6;
    /// mem.write_word(0x01FE, 0xFFFE, &mut cycles).unwrap();
    ///
    /// assert_eq!(mem[0x01FE], 0xFE);
    /// assert_eq!(mem[0x01FF], 0xFF);
    /// assert_eq!(cycles, 4);
    /// ```
    fn write_word(
        &mut self,
        address: usize,
        value: u16,
        cycles: &mut i64,
    ) -> Result<(), MemoryError> {
        self.check(address)?;
        self.check(address.wrapping_add(1))?;

        let [lo, hi] = value.to_le_bytes();
        self.write(address, lo)?;
        self.write(address + 1, hi)?;
        *cycles -= 2;
        Ok(())
    }

    /// Reads a little-endian word without charging any cycles.
    fn read_word(&self, address: usize) -> Result<u16, MemoryError> {
        let lo = self.read(address)?;
        let hi = self.read(address.wrapping_add(1))?;
        Ok(u16::from_le_bytes([lo, hi]))
    }

    /// Copies `bytes` into memory starting at `address`.
    ///
    /// Nothing is written if the slice does not fit.
    fn load(&mut self, address: usize, bytes: &[u8]) -> Result<(), MemoryError> {
        if let Some(last) = bytes.len().checked_sub(1) {
            self.check(address)?;
            self.check(address.saturating_add(last))?;
        }
        for (offset, &byte) in bytes.iter().enumerate() {
            self.write(address + offset, byte)?;
        }
        Ok(())
    }
}

/// Simple 64KB flat memory implementation.
///
/// All 65536 addresses map to a single contiguous RAM array initialized to
/// zero. Any `u16` is a valid address, so `FlatMemory` also supports plain
/// indexing for loading programs by hand.
///
/// ```
/// use cpu6502::FlatMemory;
///
/// let mut memory = FlatMemory::new();
/// memory[0xFFFC] = 0xA9; // LDA #$42
/// memory[0xFFFD] = 0x42;
/// assert_eq!(memory[0xFFFD], 0x42);
/// ```
pub struct FlatMemory {
    data: Box<[u8; MEMORY_SIZE]>,
}

impl FlatMemory {
    /// Creates a new FlatMemory instance with all bytes initialized to zero.
    pub fn new() -> Self {
        Self {
            data: Box::new([0; MEMORY_SIZE]),
        }
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for FlatMemory {
    fn size(&self) -> usize {
        MEMORY_SIZE
    }

    fn read(&self, address: usize) -> Result<u8, MemoryError> {
        self.data
            .get(address)
            .copied()
            .ok_or(MemoryError::OutOfRange {
                address,
                size: MEMORY_SIZE,
            })
    }

    fn write(&mut self, address: usize, value: u8) -> Result<(), MemoryError> {
        let cell = self.data.get_mut(address).ok_or(MemoryError::OutOfRange {
            address,
            size: MEMORY_SIZE,
        })?;
        *cell = value;
        Ok(())
    }

    fn initialize(&mut self) {
        self.data.fill(0x00);
    }
}

impl Index<u16> for FlatMemory {
    type Output = u8;

    fn index(&self, address: u16) -> &u8 {
        &self.data[address as usize]
    }
}

impl IndexMut<u16> for FlatMemory {
    fn index_mut(&mut self, address: u16) -> &mut u8 {
        &mut self.data[address as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Memory smaller than the address space, to exercise the default
    /// trait methods against a real bound.
    struct SmallMemory {
        data: Vec<u8>,
    }

    impl MemoryBus for SmallMemory {
        fn size(&self) -> usize {
            self.data.len()
        }

        fn read(&self, address: usize) -> Result<u8, MemoryError> {
            self.check(address)?;
            Ok(self.data[address])
        }

        fn write(&mut self, address: usize, value: u8) -> Result<(), MemoryError> {
            self.check(address)?;
            self.data[address] = value;
            Ok(())
        }
    }

    #[test]
    fn test_flat_memory_read_write() {
        let mut mem = FlatMemory::new();

        assert_eq!(mem.read(0x0000), Ok(0x00));
        assert_eq!(mem.read(0xFFFF), Ok(0x00));

        mem.write(0x1234, 0x42).unwrap();
        assert_eq!(mem.read(0x1234), Ok(0x42));

        // Neighbours unchanged
        assert_eq!(mem.read(0x1233), Ok(0x00));
        assert_eq!(mem.read(0x1235), Ok(0x00));
    }

    #[test]
    fn test_flat_memory_out_of_range() {
        let mut mem = FlatMemory::new();
        let err = MemoryError::OutOfRange {
            address: MEMORY_SIZE,
            size: MEMORY_SIZE,
        };

        assert_eq!(mem.read(MEMORY_SIZE), Err(err));
        assert_eq!(mem.write(MEMORY_SIZE, 0x01), Err(err));
    }

    #[test]
    fn test_default_initialize_visits_every_cell() {
        let mut mem = SmallMemory {
            data: vec![0xAA; 300],
        };

        mem.initialize();

        assert!(mem.data.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_write_word_straddling_the_end_writes_nothing() {
        let mut mem = SmallMemory {
            data: vec![0x00; 16],
        };
        let mut cycles = 10;

        let result = mem.write_word(15, 0xBEEF, &mut cycles);

        assert_eq!(
            result,
            Err(MemoryError::OutOfRange {
                address: 16,
                size: 16
            })
        );
        assert_eq!(mem.data[15], 0x00);
        assert_eq!(cycles, 10);
    }

    #[test]
    fn test_load_rejects_overlong_slice() {
        let mut mem = SmallMemory {
            data: vec![0x00; 4],
        };

        assert!(mem.load(2, &[1, 2, 3]).is_err());
        assert_eq!(mem.data, vec![0, 0, 0, 0]);

        mem.load(1, &[1, 2, 3]).unwrap();
        assert_eq!(mem.data, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_index_matches_bus_access() {
        let mut mem = FlatMemory::new();
        mem[0xFFFF] = 0x7F;
        assert_eq!(mem.read(0xFFFF), Ok(0x7F));
    }
}
