//! Shot and stack counters
//!
//! All counters start at 1. `shot_number` goes back to 1 when a stack
//! completes; the stack and test-shot counters only move forward unless
//! reset explicitly.

/// Routine counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RoutineCounters {
    shot_number: u32,
    test_shot_number: u32,
    stack_number: u32,
}

impl Default for RoutineCounters {
    fn default() -> Self {
        Self::new()
    }
}

impl RoutineCounters {
    /// Create counters at their initial values
    pub const fn new() -> Self {
        Self {
            shot_number: 1,
            test_shot_number: 1,
            stack_number: 1,
        }
    }

    /// Number the next stack shot will be saved under
    pub fn shot_number(&self) -> u32 {
        self.shot_number
    }

    /// Number the next test shot will be saved under
    pub fn test_shot_number(&self) -> u32 {
        self.test_shot_number
    }

    /// Number of the current (or next) stack
    pub fn stack_number(&self) -> u32 {
        self.stack_number
    }

    /// Record a successful stack shot
    pub fn advance_shot(&mut self) {
        self.shot_number = self.shot_number.saturating_add(1);
    }

    /// Record a successful test shot
    pub fn advance_test_shot(&mut self) {
        self.test_shot_number = self.test_shot_number.saturating_add(1);
    }

    /// Record a completed stack
    pub fn finish_stack(&mut self) {
        self.stack_number = self.stack_number.saturating_add(1);
        self.shot_number = 1;
    }

    /// Restart shot numbering at 1
    pub fn reset_shot_number(&mut self) {
        self.shot_number = 1;
    }

    /// Restart test-shot numbering at 1
    pub fn reset_test_shot_number(&mut self) {
        self.test_shot_number = 1;
    }

    /// Restart stack numbering at 1
    pub fn reset_stack_number(&mut self) {
        self.stack_number = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_values() {
        let counters = RoutineCounters::new();
        assert_eq!(counters.shot_number(), 1);
        assert_eq!(counters.test_shot_number(), 1);
        assert_eq!(counters.stack_number(), 1);
    }

    #[test]
    fn test_finish_stack_resets_shots_only() {
        let mut counters = RoutineCounters::new();
        counters.advance_shot();
        counters.advance_shot();
        counters.advance_test_shot();

        counters.finish_stack();

        assert_eq!(counters.shot_number(), 1);
        assert_eq!(counters.stack_number(), 2);
        assert_eq!(counters.test_shot_number(), 2);
    }

    #[test]
    fn test_independent_resets() {
        let mut counters = RoutineCounters::new();
        counters.advance_shot();
        counters.advance_test_shot();
        counters.finish_stack();
        counters.advance_shot();

        counters.reset_test_shot_number();
        assert_eq!(counters.test_shot_number(), 1);
        assert_eq!(counters.shot_number(), 2);
        assert_eq!(counters.stack_number(), 2);

        counters.reset_stack_number();
        assert_eq!(counters.stack_number(), 1);
        assert_eq!(counters.shot_number(), 2);

        counters.reset_shot_number();
        assert_eq!(counters.shot_number(), 1);
    }
}
