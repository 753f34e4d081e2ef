//! Tests for the RTS (Return from Subroutine) instruction.

use cpu6502::{FlatMemory, MemoryBus, CPU};

fn setup() -> (CPU, FlatMemory) {
    let mut memory = FlatMemory::new();
    let mut cpu = CPU::new();
    cpu.reset(&mut memory);
    (cpu, memory)
}

#[test]
fn test_rts_basic() {
    let (mut cpu, mut memory) = setup();
    cpu.set_pc(0x9000);
    cpu.set_sp(0xFD);

    // Return address $8002 on the stack
    memory[0x01FE] = 0x02;
    memory[0x01FF] = 0x80;
    memory[0x9000] = 0x60;

    assert_eq!(cpu.step(&mut memory), Ok(6));

    assert_eq!(cpu.pc(), 0x8003);
    assert_eq!(cpu.sp(), 0xFF);
}

#[test]
fn test_jsr_rts_round_trip() {
    let (mut cpu, mut memory) = setup();
    cpu.set_pc(0x8000);

    // $8000: JSR $9000 ; $8003: LDA #$01
    memory.load(0x8000, &[0x20, 0x00, 0x90, 0xA9, 0x01]).unwrap();
    // $9000: LDA #$FF ; RTS
    memory.load(0x9000, &[0xA9, 0xFF, 0x60]).unwrap();

    assert_eq!(cpu.execute(&mut memory, 6 + 2 + 6 + 2), Ok(16));

    assert_eq!(cpu.pc(), 0x8005);
    assert_eq!(cpu.sp(), 0xFF);
    assert_eq!(cpu.a(), 0x01);
    assert!(!cpu.flag_n());
}

#[test]
fn test_rts_wraps_stack_pointer() {
    let (mut cpu, mut memory) = setup();
    cpu.set_pc(0x9000);
    cpu.set_sp(0xFF);

    memory[0x0100] = 0x34;
    memory[0x0101] = 0x12;
    memory[0x9000] = 0x60;

    cpu.step(&mut memory).unwrap();

    assert_eq!(cpu.pc(), 0x1235);
    assert_eq!(cpu.sp(), 0x01);
}

#[test]
fn test_rts_no_flags_affected() {
    let (mut cpu, mut memory) = setup();
    cpu.set_pc(0x9000);
    cpu.set_sp(0xFD);
    cpu.set_flag_z(true);
    cpu.set_flag_c(true);
    memory[0x9000] = 0x60;

    cpu.step(&mut memory).unwrap();

    assert!(cpu.flag_z());
    assert!(cpu.flag_c());
}
