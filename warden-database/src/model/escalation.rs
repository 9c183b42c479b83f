use std::num::NonZeroUsize;
use std::time::Duration;

/// Auto-timeout rule applied after a warning is recorded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EscalationPolicy {
    pub threshold: NonZeroUsize,
    pub timeout: Duration,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EscalationDecision {
    Clean,
    AutoTimeout { duration: Duration },
}

impl EscalationDecision {
    pub fn is_escalated(self) -> bool {
        matches!(self, Self::AutoTimeout { .. })
    }
}
