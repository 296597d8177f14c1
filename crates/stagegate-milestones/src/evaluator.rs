//! Unlock evaluator: checks whether a gate's payment threshold is met.
//!
//! A pure evaluation function with no side effects. The gating predicate
//! from the design is `paid >= total * threshold_percent / 100`; it is
//! evaluated here in exact integer arithmetic as
//! `paid * 100 >= total * threshold_percent` — no floating point, so a
//! 100% threshold is satisfied only when paid equals total.

use stagegate_types::StepDefinition;

/// Evaluates step thresholds against a project's cumulative payment.
#[derive(Clone, Debug, Default)]
pub struct UnlockEvaluator;

impl UnlockEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate whether the step's threshold is met by the paid amount.
    ///
    /// `paid` and `total` are minor units; both are widened before the
    /// cross-multiplication so the comparison cannot overflow.
    pub fn evaluate(&self, paid: i64, total: i64, step: &StepDefinition) -> UnlockDecision {
        let required_met =
            (paid as i128) * 100 >= (total as i128) * (step.threshold_percent as i128);

        if required_met {
            UnlockDecision::Eligible
        } else {
            UnlockDecision::NotEligible {
                reason: format!(
                    "paid {} of {} is below the {}% threshold for step {}",
                    paid, total, step.threshold_percent, step.step_order
                ),
            }
        }
    }
}

/// Result of evaluating a gate's unlock predicate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UnlockDecision {
    /// The threshold is met — the gate may unlock.
    Eligible,
    /// The threshold is not met.
    NotEligible { reason: String },
}

impl UnlockDecision {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Self::Eligible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use stagegate_types::Milestone;

    fn step(order: u32, percent: u32) -> StepDefinition {
        StepDefinition::new(
            order,
            percent,
            Milestone {
                name: format!("step-{order}"),
                eligible_departments: vec![],
            },
        )
    }

    #[test]
    fn below_threshold_is_not_eligible() {
        let evaluator = UnlockEvaluator::new();
        assert!(!evaluator.evaluate(299, 1_000, &step(1, 30)).is_eligible());
    }

    #[test]
    fn exactly_at_threshold_is_eligible() {
        let evaluator = UnlockEvaluator::new();
        assert!(evaluator.evaluate(300, 1_000, &step(1, 30)).is_eligible());
    }

    #[test]
    fn hundred_percent_requires_full_payment() {
        let evaluator = UnlockEvaluator::new();
        let s = step(2, 100);
        assert!(!evaluator.evaluate(999, 1_000, &s).is_eligible());
        assert!(evaluator.evaluate(1_000, 1_000, &s).is_eligible());
    }

    #[test]
    fn zero_percent_threshold_is_always_eligible() {
        let evaluator = UnlockEvaluator::new();
        assert!(evaluator.evaluate(0, 1_000, &step(1, 0)).is_eligible());
    }

    #[test]
    fn indivisible_threshold_uses_exact_rational_comparison() {
        let evaluator = UnlockEvaluator::new();
        // 33% of 1001 is 330.33; 330 paid is below, 331 is at-or-above.
        let s = step(1, 33);
        assert!(!evaluator.evaluate(330, 1_001, &s).is_eligible());
        assert!(evaluator.evaluate(331, 1_001, &s).is_eligible());
    }

    #[test]
    fn not_eligible_reason_names_the_step() {
        let evaluator = UnlockEvaluator::new();
        match evaluator.evaluate(0, 1_000, &step(3, 50)) {
            UnlockDecision::NotEligible { reason } => {
                assert!(reason.contains("50%"));
                assert!(reason.contains("step 3"));
            }
            UnlockDecision::Eligible => panic!("expected NotEligible"),
        }
    }

    proptest! {
        /// Unlocking is monotonic in paid amount: once eligible at some
        /// paid amount, every higher paid amount is also eligible.
        #[test]
        fn unlock_is_monotonic_in_paid(
            total in 1i64..10_000_000,
            paid in 0i64..10_000_000,
            extra in 0i64..1_000_000,
            percent in 0u32..=100,
        ) {
            let evaluator = UnlockEvaluator::new();
            let s = step(1, percent);
            if evaluator.evaluate(paid, total, &s).is_eligible() {
                prop_assert!(evaluator.evaluate(paid + extra, total, &s).is_eligible());
            }
        }
    }
}
