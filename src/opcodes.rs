//! # Opcode Metadata Table
//!
//! The 256-entry table indexed by opcode byte that drives decoding. An entry
//! is `None` for every byte the engine does not execute; decoding such a byte
//! is an illegal-opcode fault, never a silent no-op.
//!
//! Adding an instruction means adding its row to `lookup` and, for a new
//! family, a `Mnemonic` variant plus a handler in `instructions`.

use std::fmt;

use crate::addressing::AddressingMode;

/// Instruction family, the unit of dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    Lda,
    Ldx,
    Ldy,
    Jsr,
    Rts,
    Jmp,
    Pha,
    Pla,
    Php,
    Plp,
    Nop,
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Mnemonic::Lda => "LDA",
            Mnemonic::Ldx => "LDX",
            Mnemonic::Ldy => "LDY",
            Mnemonic::Jsr => "JSR",
            Mnemonic::Rts => "RTS",
            Mnemonic::Jmp => "JMP",
            Mnemonic::Pha => "PHA",
            Mnemonic::Pla => "PLA",
            Mnemonic::Php => "PHP",
            Mnemonic::Plp => "PLP",
            Mnemonic::Nop => "NOP",
        };
        f.write_str(name)
    }
}

/// Metadata for a single 6502 opcode.
///
/// # Examples
///
/// ```
/// use cpu6502::{decode, AddressingMode, Mnemonic};
///
/// let lda_imm = decode(0xA9).unwrap();
/// assert_eq!(lda_imm.mnemonic, Mnemonic::Lda);
/// assert_eq!(lda_imm.addressing_mode, AddressingMode::Immediate);
/// assert_eq!(lda_imm.base_cycles, 2);
/// assert_eq!(lda_imm.size_bytes, 2);
///
/// assert!(decode(0xFF).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeMetadata {
    pub opcode: u8,
    pub mnemonic: Mnemonic,
    pub addressing_mode: AddressingMode,

    /// Cycle cost excluding page-crossing penalties.
    pub base_cycles: u8,

    /// Opcode plus operand bytes.
    pub size_bytes: u8,
}

impl OpcodeMetadata {
    const fn new(opcode: u8, mnemonic: Mnemonic, addressing_mode: AddressingMode, base_cycles: u8) -> Self {
        Self {
            opcode,
            mnemonic,
            addressing_mode,
            base_cycles,
            size_bytes: 1 + addressing_mode.operand_bytes(),
        }
    }
}

const fn lookup(opcode: u8) -> Option<OpcodeMetadata> {
    use AddressingMode::*;
    use Mnemonic::*;

    let (mnemonic, mode, cycles) = match opcode {
        0xA9 => (Lda, Immediate, 2),
        0xA5 => (Lda, ZeroPage, 3),
        0xB5 => (Lda, ZeroPageX, 4),
        0xAD => (Lda, Absolute, 4),
        0xBD => (Lda, AbsoluteX, 4),
        0xB9 => (Lda, AbsoluteY, 4),
        0xA1 => (Lda, IndirectX, 6),
        0xB1 => (Lda, IndirectY, 5),

        0xA2 => (Ldx, Immediate, 2),
        0xA6 => (Ldx, ZeroPage, 3),
        0xB6 => (Ldx, ZeroPageY, 4),
        0xAE => (Ldx, Absolute, 4),
        0xBE => (Ldx, AbsoluteY, 4),

        0xA0 => (Ldy, Immediate, 2),
        0xA4 => (Ldy, ZeroPage, 3),
        0xB4 => (Ldy, ZeroPageX, 4),
        0xAC => (Ldy, Absolute, 4),
        0xBC => (Ldy, AbsoluteX, 4),

        0x20 => (Jsr, Absolute, 6),
        0x60 => (Rts, Implicit, 6),
        0x4C => (Jmp, Absolute, 3),

        0x48 => (Pha, Implicit, 3),
        0x68 => (Pla, Implicit, 4),
        0x08 => (Php, Implicit, 3),
        0x28 => (Plp, Implicit, 4),

        0xEA => (Nop, Implicit, 2),

        _ => return None,
    };

    Some(OpcodeMetadata::new(opcode, mnemonic, mode, cycles))
}

const fn build_table() -> [Option<OpcodeMetadata>; 256] {
    let mut table = [None; 256];
    let mut opcode = 0;
    while opcode < 256 {
        table[opcode] = lookup(opcode as u8);
        opcode += 1;
    }
    table
}

/// Opcode metadata indexed by opcode byte.
pub static OPCODE_TABLE: [Option<OpcodeMetadata>; 256] = build_table();

/// Looks up an opcode, returning `None` for bytes the engine does not execute.
pub fn decode(opcode: u8) -> Option<&'static OpcodeMetadata> {
    OPCODE_TABLE[opcode as usize].as_ref()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_entries_match_their_index() {
        for (index, entry) in OPCODE_TABLE.iter().enumerate() {
            if let Some(metadata) = entry {
                assert_eq!(metadata.opcode as usize, index);
            }
        }
    }

    #[test]
    fn test_seed_opcodes_present() {
        for opcode in [0xA9, 0xA5, 0xB5, 0x20] {
            assert!(decode(opcode).is_some(), "0x{:02X} missing", opcode);
        }
    }

    #[test]
    fn test_jsr_is_three_bytes() {
        let jsr = decode(0x20).unwrap();
        assert_eq!(jsr.mnemonic, Mnemonic::Jsr);
        assert_eq!(jsr.size_bytes, 3);
        assert_eq!(jsr.base_cycles, 6);
    }
}
