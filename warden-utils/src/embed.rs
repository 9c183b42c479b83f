use poise::serenity_prelude as serenity;

use crate::formatting::truncate_chars;

/// Default embed color used across the bot UI.
pub const DEFAULT_EMBED_COLOR: u32 = 0x90_55_30;
/// Embed color for escalations and other severe actions.
pub const SEVERE_EMBED_COLOR: u32 = 0x99_2D_22;
/// Embed color for reversals (removed warnings).
pub const REVERSAL_EMBED_COLOR: u32 = 0x2E_7D_32;

/// Longest embed description the platform accepts.
pub const MAX_EMBED_DESCRIPTION_CHARS: usize = 4_096;

/// Build an embed from a title and `**Key :** value` lines.
pub fn build_detail_embed(
    title: &str,
    lines: &[(&str, String)],
    color: u32,
) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title(title.to_owned())
        .color(color)
        .description(detail_description(lines))
        .timestamp(serenity::Timestamp::now())
}

fn detail_description(lines: &[(&str, String)]) -> String {
    let description = lines
        .iter()
        .map(|(key, value)| format!("**{key} :** {value}"))
        .collect::<Vec<_>>()
        .join("\n");

    truncate_chars(&description, MAX_EMBED_DESCRIPTION_CHARS)
}
