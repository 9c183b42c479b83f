use poise::serenity_prelude as serenity;

use warden_database::Warning;
use warden_utils::embed::DEFAULT_EMBED_COLOR;
use warden_utils::formatting::{
    discord_timestamp, escape_mentions, format_warning_count, truncate_chars,
};
use warden_utils::pagination::{page_window, total_pages};

/// Warnings listed per page of `warnings`/`mywarnings`.
pub const WARNINGS_PER_PAGE: usize = 5;
/// Longest reason shown in a warning list entry.
pub const MAX_LISTED_REASON_CHARS: usize = 500;
/// Longest reason echoed in a reply or DM embed.
pub const MAX_REASON_CHARS: usize = 1_024;

#[derive(Clone, Debug)]
pub struct TargetProfile {
    pub display_name: String,
    pub avatar_url: Option<String>,
}

pub fn target_profile_from_user(user: &serenity::User) -> TargetProfile {
    TargetProfile {
        display_name: user
            .global_name
            .clone()
            .unwrap_or_else(|| user.name.clone()),
        avatar_url: Some(user.face()),
    }
}

/// Reply embed for a warn/unwarn, e.g. "Alice has been warned".
pub fn moderation_action_embed(
    target_profile: &TargetProfile,
    target_user_id: serenity::UserId,
    action_past_tense: &str,
    reason: &str,
    warning_count: usize,
) -> serenity::CreateEmbed {
    let description = format!(
        "**Target :** <@{}>\n**Reason :** {}\n**Warnings :** {}",
        target_user_id.get(),
        truncate_chars(&escape_mentions(reason), MAX_REASON_CHARS),
        warning_count
    );
    let heading = format!("{} has been {}", target_profile.display_name, action_past_tense);

    let embed = serenity::CreateEmbed::new()
        .color(DEFAULT_EMBED_COLOR)
        .description(description);

    match target_profile.avatar_url.as_deref() {
        Some(url) => embed.author(serenity::CreateEmbedAuthor::new(heading).icon_url(url)),
        None => embed.title(heading),
    }
}

pub fn moderation_target_dm_embed(
    guild_name: &str,
    action_past_tense: &str,
    reason: Option<&str>,
    duration: Option<&str>,
) -> serenity::CreateEmbed {
    let mut details = Vec::new();

    if let Some(reason) = reason {
        details.push(format!(
            "**Reason :** {}",
            truncate_chars(&escape_mentions(reason), MAX_REASON_CHARS)
        ));
    }

    if let Some(duration) = duration {
        details.push(format!("**Duration :** {}", duration));
    }

    let description = if details.is_empty() {
        "No additional details were provided.".to_owned()
    } else {
        details.join("\n")
    };

    serenity::CreateEmbed::new()
        .color(DEFAULT_EMBED_COLOR)
        .title(format!(
            "You have been {} in {}",
            action_past_tense, guild_name
        ))
        .description(description)
}

/// DM the target about an action taken against them. Closed DMs are an error
/// the caller is expected to ignore.
pub async fn send_moderation_target_dm(
    http: &serenity::Http,
    target_user: &serenity::User,
    guild_id: serenity::GuildId,
    action_past_tense: &str,
    reason: Option<&str>,
    duration: Option<&str>,
) -> Result<(), serenity::Error> {
    let guild_name = match guild_id.to_partial_guild(http).await {
        Ok(guild) => guild.name,
        Err(_) => format!("Server {}", guild_id.get()),
    };

    let dm_channel = target_user.create_dm_channel(http).await?;
    dm_channel
        .send_message(
            http,
            serenity::CreateMessage::new().embed(moderation_target_dm_embed(
                &guild_name,
                action_past_tense,
                reason,
                duration,
            )),
        )
        .await?;

    Ok(())
}

/// Pages of the warning history, newest first, keeping the position of each
/// warning in the ledger as its number.
pub fn warning_list_pages(warnings: &[Warning]) -> Vec<String> {
    let total = warnings.len();
    let header = format!("Total: **{}**", format_warning_count(total));

    (1..=total_pages(total, WARNINGS_PER_PAGE))
        .map(|page| {
            let (start, end) = page_window(total, WARNINGS_PER_PAGE, page);
            let mut lines = format!("{header}\n\n");

            for display_index in start..end {
                let position = total - 1 - display_index;
                let warning = &warnings[position];

                lines.push_str(&format!(
                    "#{idx} • by <@{issuer}>\n**Reason :** {reason}\n**When :** {when}\n\n",
                    idx = position + 1,
                    issuer = warning.issued_by,
                    reason = truncate_chars(&escape_mentions(&warning.reason), MAX_LISTED_REASON_CHARS),
                    when = discord_timestamp(warning.timestamp.timestamp()),
                ));
            }

            lines.trim_end().to_owned()
        })
        .collect()
}

pub fn usage_message(usage: &str) -> String {
    format!("Usage: `{usage}`")
}

pub fn guild_only_message() -> &'static str {
    "This command only works in servers."
}

pub fn permission_denied_message() -> &'static str {
    "You don't have permission to use this command."
}

pub fn moderation_bot_target_message() -> &'static str {
    "You can't use moderation actions on bots or application accounts."
}

pub fn no_warnings_message(display_name: &str) -> String {
    format!("{display_name} has no warnings.")
}

pub fn nothing_to_remove_message(display_name: &str) -> String {
    format!("{display_name} has no warnings to remove.")
}

pub fn is_missing_permissions_error(source: &serenity::Error) -> bool {
    matches!(
        source,
        serenity::Error::Http(serenity::HttpError::UnsuccessfulRequest(response))
            if response.status_code.as_u16() == 403 || response.error.code == 50013
    )
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use warden_utils::embed::MAX_EMBED_DESCRIPTION_CHARS;

    use super::*;

    fn warning(reason: &str, unix_secs: i64, issued_by: u64) -> Warning {
        Warning {
            reason: reason.to_owned(),
            timestamp: Utc.timestamp_opt(unix_secs, 0).unwrap(),
            issued_by,
        }
    }

    #[test]
    fn warning_pages_list_newest_first_with_ledger_numbers() {
        let warnings = vec![
            warning("spam @everyone", 1_700_000_000, 7),
            warning("links", 1_700_000_600, 8),
        ];

        let pages = warning_list_pages(&warnings);
        assert_eq!(pages.len(), 1);

        let page = &pages[0];
        assert!(page.starts_with("Total: **2 warnings**"));
        let newest = page.find("#2 • by <@8>").unwrap();
        let oldest = page.find("#1 • by <@7>").unwrap();
        assert!(newest < oldest);
        assert!(page.contains("spam @\u{200B}everyone"));
        assert!(page.contains("<t:1700000000:R>"));
    }

    #[test]
    fn long_histories_are_split_across_pages() {
        let warnings: Vec<_> = (0..27)
            .map(|index| warning("rule 1", 1_700_000_000 + index, 7))
            .collect();

        let pages = warning_list_pages(&warnings);
        assert_eq!(pages.len(), 6);
        assert!(pages[0].contains("#27 • by"));
        assert!(pages[5].contains("#1 • by"));
        assert!(pages[5].contains("#2 • by"));
        assert!(!pages[5].contains("#3 • by"));
    }

    #[test]
    fn oversized_reasons_keep_pages_within_embed_limits() {
        let long_reason = "@".repeat(1_500) + &"x".repeat(1_500);
        let warnings: Vec<_> = (0..WARNINGS_PER_PAGE)
            .map(|index| warning(&long_reason, 1_700_000_000 + index as i64, 7))
            .collect();

        let pages = warning_list_pages(&warnings);
        assert_eq!(pages.len(), 1);
        assert!(pages[0].chars().count() <= MAX_EMBED_DESCRIPTION_CHARS);
        assert!(pages[0].contains('…'));
    }

    #[test]
    fn reply_messages() {
        assert_eq!(usage_message("?warn <user>"), "Usage: `?warn <user>`");
        assert_eq!(nothing_to_remove_message("Alice"), "Alice has no warnings to remove.");
        assert_eq!(no_warnings_message("Alice"), "Alice has no warnings.");
    }
}
