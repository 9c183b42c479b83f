use std::num::NonZeroUsize;
use std::time::Duration;

use crate::model::escalation::{EscalationDecision, EscalationPolicy};

/// Whether a subject with `count` warnings has reached `threshold`.
///
/// Pass the count returned by `add_warning`, so the warning that was just
/// issued counts toward the threshold.
pub fn should_auto_escalate(count: usize, threshold: usize) -> bool {
    count >= threshold
}

impl EscalationPolicy {
    pub fn new(threshold: NonZeroUsize, timeout: Duration) -> Self {
        Self { threshold, timeout }
    }

    /// Decide what to do with a subject that now has `count` warnings.
    ///
    /// There is no memory of earlier escalations: every time the count is at
    /// or above the threshold the decision is an auto-timeout again.
    pub fn evaluate(&self, count: usize) -> EscalationDecision {
        if should_auto_escalate(count, self.threshold.get()) {
            EscalationDecision::AutoTimeout {
                duration: self.timeout,
            }
        } else {
            EscalationDecision::Clean
        }
    }
}
