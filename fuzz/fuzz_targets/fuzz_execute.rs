//! Fuzz target for budgeted execution.
//!
//! Runs an arbitrary program image for an arbitrary budget and checks the
//! overdraw accounting: whatever was consumed covers the budget, and no
//! instruction overshoots it by more than its own length.

#![no_main]

use arbitrary::Arbitrary;
use cpu6502::{BudgetPolicy, CpuConfig, FlatMemory, MemoryBus, CPU};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    program: Vec<u8>,
    budget: u8,
    strict: bool,
}

fuzz_target!(|input: FuzzInput| {
    let policy = if input.strict {
        BudgetPolicy::Strict
    } else {
        BudgetPolicy::Overdraw
    };
    let mut memory = FlatMemory::new();
    let mut cpu = CPU::with_config(CpuConfig::default().with_budget_policy(policy));
    cpu.reset(&mut memory);

    let len = input.program.len().min(0x7000);
    if memory.load(0x0200, &input.program[..len]).is_err() {
        return;
    }
    cpu.set_pc(0x0200);

    let budget = i64::from(input.budget);
    if let Ok(consumed) = cpu.execute(&mut memory, budget) {
        assert_eq!(cpu.cycles(), consumed);
        match policy {
            BudgetPolicy::Overdraw => {
                assert!(consumed as i64 >= budget);
                assert!(consumed as i64 <= budget.max(0) + 6);
            }
            BudgetPolicy::Strict => assert!(consumed as i64 <= budget + 1),
        }
    }
});
