pub mod escalation;
pub mod warnings;
