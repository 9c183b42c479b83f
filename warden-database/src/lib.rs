pub mod error;
pub mod escalation;
pub mod ledger;
pub mod model;
pub mod store;

pub use error::LedgerError;
pub use escalation::should_auto_escalate;
pub use ledger::Ledger;
pub use model::escalation::{EscalationDecision, EscalationPolicy};
pub use model::warnings::{Removal, SubjectId, Warning, WarningMap};
pub use store::WarningStore;
