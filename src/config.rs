//! # Execution Configuration
//!
//! Knobs that select between equally valid behaviours of the engine. The
//! hardware itself has no notion of a cycle budget, so how an instruction
//! that does not fit in the remaining budget is handled is a caller choice.

/// What `CPU::execute` does when the next instruction costs more cycles than
/// remain in the budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BudgetPolicy {
    /// Start any instruction while the budget is positive and let it finish,
    /// driving the budget negative if necessary.
    #[default]
    Overdraw,

    /// Refuse to start an instruction whose base cost exceeds the remaining
    /// budget. Page-crossing penalties are not predicted.
    Strict,
}

/// CPU configuration.
///
/// ```
/// use cpu6502::{BudgetPolicy, CpuConfig, CPU};
///
/// let cpu = CPU::with_config(CpuConfig::default().with_budget_policy(BudgetPolicy::Strict));
/// assert_eq!(cpu.config().budget_policy, BudgetPolicy::Strict);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CpuConfig {
    pub budget_policy: BudgetPolicy,
}

impl CpuConfig {
    pub fn with_budget_policy(mut self, budget_policy: BudgetPolicy) -> Self {
        self.budget_policy = budget_policy;
        self
    }
}
