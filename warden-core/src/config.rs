use std::env;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context as _, anyhow};

use warden_database::EscalationPolicy;
use warden_utils::parse::{parse_duration_seconds, parse_id_list};

pub const DEFAULT_WARNINGS_PATH: &str = "warnings.json";
pub const DEFAULT_REASON: &str = "Breaking server rules";
pub const DEFAULT_MAX_WARNINGS: usize = 5;
pub const DEFAULT_AUTO_TIMEOUT_SECS: u64 = 86_400;
/// Longest timeout the platform accepts (28 days).
pub const MAX_AUTO_TIMEOUT_SECS: u64 = 28 * 86_400;

/// Moderation settings read from the environment at startup.
#[derive(Clone, Debug)]
pub struct Settings {
    pub admin_ids: Vec<u64>,
    pub modlog_channel_id: Option<u64>,
    pub warnings_path: PathBuf,
    pub default_reason: String,
    pub escalation: EscalationPolicy,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from any key/value source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let admin_ids = match var("ADMIN_IDS") {
            Some(raw) => parse_id_list(&raw)
                .ok_or_else(|| anyhow!("ADMIN_IDS must be a comma-separated list of user ids"))?,
            None => Vec::new(),
        };

        let modlog_channel_id = var("MODLOG_CHANNEL_ID")
            .map(|raw| raw.parse::<u64>())
            .transpose()
            .context("MODLOG_CHANNEL_ID must be a channel id")?;

        let warnings_path =
            var("WARNINGS_PATH").map_or_else(|| PathBuf::from(DEFAULT_WARNINGS_PATH), PathBuf::from);

        let default_reason = var("DEFAULT_REASON").unwrap_or_else(|| DEFAULT_REASON.to_owned());

        let max_warnings = match var("MAX_WARNINGS") {
            Some(raw) => raw
                .parse::<usize>()
                .context("MAX_WARNINGS must be a whole number")?,
            None => DEFAULT_MAX_WARNINGS,
        };
        let threshold =
            NonZeroUsize::new(max_warnings).ok_or_else(|| anyhow!("MAX_WARNINGS must be at least 1"))?;

        let timeout_secs = match var("AUTO_TIMEOUT_DURATION") {
            Some(raw) => parse_duration_seconds(&raw)
                .ok_or_else(|| anyhow!("AUTO_TIMEOUT_DURATION `{raw}` is not a duration"))?,
            None => DEFAULT_AUTO_TIMEOUT_SECS,
        };
        if timeout_secs > MAX_AUTO_TIMEOUT_SECS {
            return Err(anyhow!(
                "AUTO_TIMEOUT_DURATION must be at most {MAX_AUTO_TIMEOUT_SECS} seconds"
            ));
        }

        Ok(Self {
            admin_ids,
            modlog_channel_id,
            warnings_path,
            default_reason,
            escalation: EscalationPolicy::new(threshold, Duration::from_secs(timeout_secs)),
        })
    }

    /// Static moderator allow-list check.
    pub fn is_admin(&self, user_id: u64) -> bool {
        self.admin_ids.contains(&user_id)
    }
}
