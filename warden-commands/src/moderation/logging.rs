use tracing::{debug, error};

use poise::serenity_prelude as serenity;

use warden_core::Settings;
use warden_utils::embed::build_detail_embed;

/// Post an audit record to the configured modlog channel, if any.
///
/// Failures are logged and swallowed: the action itself is already recorded
/// in the ledger by the time this runs.
pub async fn publish_to_modlog(
    http: &serenity::Http,
    settings: &Settings,
    title: &str,
    lines: &[(&str, String)],
    color: u32,
) {
    let Some(channel_id) = settings.modlog_channel_id else {
        debug!(title, "no modlog channel configured; skipping audit post");
        return;
    };

    let embed = build_detail_embed(title, lines, color);
    if let Err(source) = serenity::ChannelId::new(channel_id)
        .send_message(http, serenity::CreateMessage::new().embed(embed))
        .await
    {
        error!(?source, channel_id, title, "failed to publish to modlog channel");
    }
}
