/// Generic embed builders shared across commands.
pub mod embed;
/// Shared formatting helpers (durations, counts, mention escaping).
pub mod formatting;
/// Single source of truth for the message-command prefix.
pub const COMMAND_PREFIX: char = '?';
/// Shared pagination helper utilities.
pub mod pagination;
/// Pure parser helpers.
pub mod parse;
