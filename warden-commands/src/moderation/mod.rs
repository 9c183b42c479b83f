pub mod mywarnings;
pub mod unwarn;
pub mod warn;
pub mod warnings;

pub use mywarnings::mywarnings;
pub use unwarn::unwarn;
pub use warn::warn;
pub use warnings::warnings;

mod access;
pub(crate) mod embeds;
pub mod escalation_check;
mod logging;
