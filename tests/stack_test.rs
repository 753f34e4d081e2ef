//! Tests for the stack instructions (PHA, PLA, PHP, PLP).

use cpu6502::{FlatMemory, CPU};

fn setup() -> (CPU, FlatMemory) {
    let mut memory = FlatMemory::new();
    let mut cpu = CPU::new();
    cpu.reset(&mut memory);
    cpu.set_pc(0x8000);
    (cpu, memory)
}

#[test]
fn test_pha_pushes_accumulator() {
    let (mut cpu, mut memory) = setup();
    cpu.set_a(0x42);
    memory[0x8000] = 0x48;

    assert_eq!(cpu.step(&mut memory), Ok(3));

    assert_eq!(memory[0x01FF], 0x42);
    assert_eq!(cpu.sp(), 0xFE);
    assert_eq!(cpu.pc(), 0x8001);
}

#[test]
fn test_pla_pulls_and_sets_flags() {
    let (mut cpu, mut memory) = setup();
    cpu.set_sp(0xFE);
    memory[0x01FF] = 0x80;
    memory[0x8000] = 0x68;

    assert_eq!(cpu.step(&mut memory), Ok(4));

    assert_eq!(cpu.a(), 0x80);
    assert!(cpu.flag_n());
    assert!(!cpu.flag_z());
    assert_eq!(cpu.sp(), 0xFF);
}

#[test]
fn test_pha_pla_round_trip() {
    let (mut cpu, mut memory) = setup();
    cpu.set_a(0x00);

    // LDA #$37 ; PHA ; LDA #$00 ; PLA
    for (offset, byte) in [0xA9, 0x37, 0x48, 0xA9, 0x00, 0x68].into_iter().enumerate() {
        memory[0x8000 + offset as u16] = byte;
    }

    assert_eq!(cpu.execute(&mut memory, 2 + 3 + 2 + 4), Ok(11));

    assert_eq!(cpu.a(), 0x37);
    assert!(!cpu.flag_z());
    assert_eq!(cpu.sp(), 0xFF);
}

#[test]
fn test_php_sets_break_and_unused_in_pushed_copy() {
    let (mut cpu, mut memory) = setup();
    cpu.set_flag_c(true);
    cpu.set_flag_n(true);
    memory[0x8000] = 0x08;

    assert_eq!(cpu.step(&mut memory), Ok(3));

    assert_eq!(memory[0x01FF], 0b1011_0001);
    assert!(!cpu.flag_b(), "live B flag unchanged");
    assert_eq!(cpu.sp(), 0xFE);
}

#[test]
fn test_plp_ignores_break_and_unused() {
    let (mut cpu, mut memory) = setup();
    cpu.set_sp(0xFE);
    memory[0x01FF] = 0xFF;
    memory[0x8000] = 0x28;

    assert_eq!(cpu.step(&mut memory), Ok(4));

    assert_eq!(cpu.status(), 0xCF);
    assert!(cpu.flag_c() && cpu.flag_z() && cpu.flag_i() && cpu.flag_d());
    assert!(cpu.flag_v() && cpu.flag_n());
    assert!(!cpu.flag_b());
}

#[test]
fn test_php_plp_round_trip() {
    let (mut cpu, mut memory) = setup();
    cpu.set_status(0b0100_0011);

    // PHP ; LDA #$80 ; PLP
    memory[0x8000] = 0x08;
    memory[0x8001] = 0xA9;
    memory[0x8002] = 0x80;
    memory[0x8003] = 0x28;

    cpu.execute(&mut memory, 3 + 2 + 4).unwrap();

    assert_eq!(cpu.status(), 0b0100_0011);
}
