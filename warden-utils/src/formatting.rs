/// Format seconds into a compact human-readable duration (e.g. 59s, 1m, 1h, 1d, 1h 30m).
pub fn format_compact_duration(total_seconds: u64) -> String {
    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;

    if days > 0 {
        return if hours > 0 {
            format!("{}d {}h", days, hours)
        } else {
            format!("{}d", days)
        };
    }

    let parts: Vec<String> = [(hours, 'h'), (minutes, 'm'), (seconds, 's')]
        .into_iter()
        .filter(|(value, _)| *value > 0)
        .map(|(value, unit)| format!("{value}{unit}"))
        .collect();

    if parts.is_empty() {
        "0s".to_owned()
    } else {
        parts.join(" ")
    }
}

/// "1 warning", "3 warnings".
pub fn format_warning_count(count: usize) -> String {
    if count == 1 {
        "1 warning".to_owned()
    } else {
        format!("{count} warnings")
    }
}

/// Break `@everyone`/`@here`/user pings in free text before echoing it.
pub fn escape_mentions(text: &str) -> String {
    text.replace('@', "@\u{200B}")
}

/// Cut `text` to at most `max_chars` characters, marking the cut with `…`.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }

    let mut truncated: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    truncated.push('…');
    truncated
}

/// Discord timestamp markup, rendered in the reader's locale.
pub fn discord_timestamp(unix_secs: i64) -> String {
    format!("<t:{unix_secs}:R> • <t:{unix_secs}:f>")
}

#[cfg(test)]
mod tests {
    use super::{
        discord_timestamp, escape_mentions, format_compact_duration, format_warning_count,
        truncate_chars,
    };

    #[test]
    fn compact_duration_formatting() {
        assert_eq!(format_compact_duration(0), "0s");
        assert_eq!(format_compact_duration(59), "59s");
        assert_eq!(format_compact_duration(60), "1m");
        assert_eq!(format_compact_duration(61), "1m 1s");
        assert_eq!(format_compact_duration(3600), "1h");
        assert_eq!(format_compact_duration(3605), "1h 5s");
        assert_eq!(format_compact_duration(3670), "1h 1m 10s");
        assert_eq!(format_compact_duration(86400), "1d");
        assert_eq!(format_compact_duration(90000), "1d 1h");
    }

    #[test]
    fn warning_counts_are_pluralized() {
        assert_eq!(format_warning_count(0), "0 warnings");
        assert_eq!(format_warning_count(1), "1 warning");
        assert_eq!(format_warning_count(5), "5 warnings");
    }

    #[test]
    fn mentions_are_escaped() {
        assert_eq!(escape_mentions("hi @everyone"), "hi @\u{200B}everyone");
        assert_eq!(escape_mentions("no pings"), "no pings");
    }

    #[test]
    fn long_text_is_truncated_with_marker() {
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("exactly", 7), "exactly");
        assert_eq!(truncate_chars("truncate me", 6), "trunc…");
        assert_eq!(truncate_chars("ééééé", 3), "éé…");
        assert_eq!(truncate_chars(&"x".repeat(3_000), 1_024).chars().count(), 1_024);
    }

    #[test]
    fn timestamps_use_discord_markup() {
        assert_eq!(discord_timestamp(1_700_000_000), "<t:1700000000:R> • <t:1700000000:f>");
    }
}
