//! Kani formal verification proofs for the 6502 engine.
//!
//! These proofs use bounded model checking to verify addressing and stack
//! invariants for all possible register values.
//!
//! To run these proofs, install Kani and run:
//! ```
//! cargo kani --tests
//! ```

// Allow the `kani` cfg which is set by the Kani verifier
#![allow(unexpected_cfgs)]

#[cfg(kani)]
mod kani_proofs {
    use cpu6502::{FlatMemory, CPU};

    /// Proof: LDA zero page,X never reads outside page zero
    #[kani::proof]
    #[kani::unwind(2)]
    fn proof_zero_page_x_stays_in_page_zero() {
        let base: u8 = kani::any();
        let x: u8 = kani::any();

        let mut memory = FlatMemory::new();
        let mut cpu = CPU::new();
        cpu.set_pc(0x8000);
        cpu.set_x(x);
        memory[0x8000] = 0xB5;
        memory[0x8001] = base;
        memory[base.wrapping_add(x) as u16] = 0x5A;

        let cycles = cpu.step(&mut memory);

        kani::assert(cycles == Ok(4), "LDA zp,X takes 4 cycles");
        kani::assert(cpu.a() == 0x5A, "effective address wraps in page zero");
    }

    /// Proof: JSR always pushes into the stack page and moves SP down by two
    #[kani::proof]
    #[kani::unwind(2)]
    fn proof_jsr_stack_discipline() {
        let sp: u8 = kani::any();

        let mut memory = FlatMemory::new();
        let mut cpu = CPU::new();
        cpu.set_pc(0x8000);
        cpu.set_sp(sp);
        memory[0x8000] = 0x20;
        memory[0x8001] = 0x00;
        memory[0x8002] = 0x90;

        let _ = cpu.step(&mut memory);

        kani::assert(cpu.sp() == sp.wrapping_sub(2), "SP decremented by two");
        kani::assert(memory[0x0100 | sp as u16] == 0x80, "high byte at old SP");
        kani::assert(
            memory[0x0100 | sp.wrapping_sub(1) as u16] == 0x02,
            "low byte below it"
        );
    }
}
