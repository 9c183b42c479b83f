/// Parse a compact duration token like `30s`, `10m`, `2h`, `1d`, `1h30m`, or plain seconds.
pub fn parse_duration_seconds(raw: &str) -> Option<u64> {
    let compact: String = raw.chars().filter(|ch| !ch.is_whitespace()).collect();
    if compact.is_empty() {
        return None;
    }

    if compact.bytes().all(|byte| byte.is_ascii_digit()) {
        return compact.parse::<u64>().ok().filter(|seconds| *seconds > 0);
    }

    let mut total_seconds = 0_u64;
    let mut digits = String::new();

    for ch in compact.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
            continue;
        }

        let multiplier = match ch.to_ascii_lowercase() {
            's' => 1_u64,
            'm' => 60,
            'h' => 60 * 60,
            'd' => 60 * 60 * 24,
            _ => return None,
        };

        let number = digits.parse::<u64>().ok().filter(|value| *value > 0)?;
        digits.clear();
        total_seconds = total_seconds.checked_add(number.checked_mul(multiplier)?)?;
    }

    // Trailing digits without a unit after a unit segment (`1h30`) are ambiguous.
    if !digits.is_empty() || total_seconds == 0 {
        return None;
    }

    Some(total_seconds)
}

/// Parse a user id given either bare or as a mention (`<@123>`, `<@!123>`, `"123"`).
pub fn parse_user_id(raw: &str) -> Option<u64> {
    raw.trim()
        .trim_matches(|ch| matches!(ch, '"' | '<' | '@' | '!' | '>'))
        .parse::<u64>()
        .ok()
        .filter(|id| *id > 0)
}

/// Parse a comma- or whitespace-separated list of user ids.
///
/// Returns `None` if any entry is not an id.
pub fn parse_id_list(raw: &str) -> Option<Vec<u64>> {
    raw.split(|ch: char| ch == ',' || ch.is_whitespace())
        .filter(|entry| !entry.is_empty())
        .map(parse_user_id)
        .collect()
}
