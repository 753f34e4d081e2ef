//! Opcode table validation tests
//!
//! Verifies that the opcode metadata table is consistent with the addressing
//! modes and that the decoder rejects every byte it has no entry for.

use cpu6502::{decode, AddressingMode, Mnemonic, OPCODE_TABLE};

#[test]
fn test_opcode_table_has_256_entries() {
    assert_eq!(OPCODE_TABLE.len(), 256);
}

#[test]
fn test_sizes_follow_addressing_mode() {
    for metadata in OPCODE_TABLE.iter().flatten() {
        assert_eq!(
            metadata.size_bytes,
            1 + metadata.addressing_mode.operand_bytes(),
            "Opcode 0x{:02X} ({}) size mismatch",
            metadata.opcode,
            metadata.mnemonic
        );
    }
}

#[test]
fn test_documented_cycle_counts() {
    let expected = [
        (0xA9, 2),
        (0xA5, 3),
        (0xB5, 4),
        (0xAD, 4),
        (0xBD, 4),
        (0xB9, 4),
        (0xA1, 6),
        (0xB1, 5),
        (0x20, 6),
        (0x60, 6),
        (0x4C, 3),
        (0x48, 3),
        (0x68, 4),
        (0x08, 3),
        (0x28, 4),
        (0xEA, 2),
    ];

    for (opcode, cycles) in expected {
        assert_eq!(
            decode(opcode).map(|m| m.base_cycles),
            Some(cycles),
            "Opcode 0x{:02X}",
            opcode
        );
    }
}

#[test]
fn test_lda_modes() {
    let modes: Vec<AddressingMode> = OPCODE_TABLE
        .iter()
        .flatten()
        .filter(|m| m.mnemonic == Mnemonic::Lda)
        .map(|m| m.addressing_mode)
        .collect();

    assert_eq!(modes.len(), 8);
    assert!(modes.contains(&AddressingMode::ZeroPageX));
    assert!(!modes.contains(&AddressingMode::ZeroPageY));
}

#[test]
fn test_undefined_bytes_do_not_decode() {
    for opcode in [0x02, 0x12, 0xFF, 0x00, 0x8D] {
        assert!(decode(opcode).is_none(), "0x{:02X} should be illegal", opcode);
    }
}
