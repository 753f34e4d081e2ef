//! Fuzz target for single-instruction execution.
//!
//! Builds an arbitrary register file and memory image, then steps once.
//! Illegal opcodes are expected; panics are not.

#![no_main]

use arbitrary::Arbitrary;
use cpu6502::{FlatMemory, CPU};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    status: u8,
}

/// Memory regions the decoded instructions can reach
#[derive(Debug, Arbitrary)]
struct FuzzMemory {
    /// Bytes at the PC location (instruction + operands)
    instruction_bytes: [u8; 3],
    zero_page: [u8; 256],
    stack_page: [u8; 256],
    /// Placed at 0x4000 for absolute addressing
    main_memory: [u8; 256],
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    memory: FuzzMemory,
}

fuzz_target!(|input: FuzzInput| {
    let mut memory = FlatMemory::new();
    let mut cpu = CPU::new();
    cpu.reset(&mut memory);

    for (i, &byte) in input.memory.zero_page.iter().enumerate() {
        memory[i as u16] = byte;
    }
    for (i, &byte) in input.memory.stack_page.iter().enumerate() {
        memory[0x0100 + i as u16] = byte;
    }
    for (i, &byte) in input.memory.main_memory.iter().enumerate() {
        memory[0x4000 + i as u16] = byte;
    }
    for (i, &byte) in input.memory.instruction_bytes.iter().enumerate() {
        memory[0x8000 + i as u16] = byte;
    }

    cpu.set_pc(0x8000);
    cpu.set_a(input.cpu_state.a);
    cpu.set_x(input.cpu_state.x);
    cpu.set_y(input.cpu_state.y);
    cpu.set_sp(input.cpu_state.sp);
    cpu.set_status(input.cpu_state.status);

    let before = cpu.cycles();
    match cpu.step(&mut memory) {
        Ok(cycles) => {
            assert!((2..=7).contains(&cycles));
            assert_eq!(cpu.cycles(), before + u64::from(cycles));
        }
        Err(_) => assert!(cpu.cycles() >= before),
    }
});
