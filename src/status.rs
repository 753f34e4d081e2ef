//! # Processor Status Register
//!
//! The seven 6502 status flags packed into one byte (NV-BDIZC), the form in
//! which the register is pushed to and pulled from the stack.

use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Packed status register.
    ///
    /// ```
    /// use cpu6502::StatusFlags;
    ///
    /// let p = StatusFlags::ZERO | StatusFlags::NEGATIVE;
    /// assert_eq!(p.bits(), 0b1000_0010);
    /// assert_eq!(format!("{:?}", p), "N.....Z.");
    /// ```
    #[derive(Default, Copy, Clone, PartialEq, Eq)]
    pub struct StatusFlags: u8 {
        const CARRY       = 0b0000_0001;
        const ZERO        = 0b0000_0010;
        const IRQ_DISABLE = 0b0000_0100;
        const DECIMAL     = 0b0000_1000;
        const BREAK       = 0b0001_0000;
        const UNUSED      = 0b0010_0000;
        const OVERFLOW    = 0b0100_0000;
        const NEGATIVE    = 0b1000_0000;
    }
}

impl StatusFlags {
    /// Bits that exist only in the pushed copy of the register.
    pub const STACK_ONLY: StatusFlags = StatusFlags::BREAK.union(StatusFlags::UNUSED);

    /// Byte pushed by PHP: B and the unused bit are always set.
    pub fn to_stack_byte(self) -> u8 {
        (self | Self::STACK_ONLY).bits()
    }

    /// Register value restored by PLP: B and the unused bit are ignored.
    pub fn from_stack_byte(byte: u8) -> Self {
        Self::from_bits_truncate(byte).difference(Self::STACK_ONLY)
    }
}

impl fmt::Debug for StatusFlags {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const LETTERS: [(char, StatusFlags); 8] = [
            ('N', StatusFlags::NEGATIVE),
            ('V', StatusFlags::OVERFLOW),
            ('-', StatusFlags::UNUSED),
            ('B', StatusFlags::BREAK),
            ('D', StatusFlags::DECIMAL),
            ('I', StatusFlags::IRQ_DISABLE),
            ('Z', StatusFlags::ZERO),
            ('C', StatusFlags::CARRY),
        ];

        let text: String = LETTERS
            .iter()
            .map(|&(ch, flag)| if self.contains(flag) { ch } else { '.' })
            .collect();
        f.write_str(&text)
    }
}
