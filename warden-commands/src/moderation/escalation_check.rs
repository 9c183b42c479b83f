//! Auto-timeout applied after a warning is issued.
//!
//! The `warn` command calls this with the count returned by the ledger. The policy is
//! evaluated on that post-warning count; when it fires, the member is timed
//! out for the configured duration, the modlog gets an audit record and the
//! member is DMed.

use std::time::Duration;

use chrono::Utc;
use poise::serenity_prelude as serenity;
use tracing::{debug, error, info, warn};

use warden_core::Settings;
use warden_database::EscalationDecision;
use warden_utils::embed::SEVERE_EMBED_COLOR;
use warden_utils::formatting::format_compact_duration;

use crate::moderation::embeds::{is_missing_permissions_error, send_moderation_target_dm};
use crate::moderation::logging::publish_to_modlog;

/// What happened when the policy asked for an auto-timeout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EscalationOutcome {
    /// The member is timed out for `duration`.
    Applied { duration: Duration },
    /// The bot lacks permission (or role hierarchy) to time the member out.
    MissingPermissions,
    /// The platform call failed for another reason.
    Failed,
}

/// Evaluate the policy for `warning_count` and enforce it.
///
/// Returns `None` when the member stays below the threshold.
pub async fn check_and_escalate(
    http: &serenity::Http,
    settings: &Settings,
    guild_id: serenity::GuildId,
    target_user: &serenity::User,
    warning_count: usize,
) -> Option<EscalationOutcome> {
    let EscalationDecision::AutoTimeout { duration } = settings.escalation.evaluate(warning_count)
    else {
        return None;
    };

    info!(
        user_id = %target_user.id,
        guild_id = %guild_id,
        warning_count,
        timeout_secs = duration.as_secs(),
        "escalation triggered: auto-timeout"
    );

    let outcome = apply_timeout(http, guild_id, target_user.id, duration).await;
    if !matches!(outcome, EscalationOutcome::Applied { .. }) {
        return Some(outcome);
    }

    let reason = auto_timeout_reason(settings.escalation.threshold.get());
    let duration_label = format_compact_duration(duration.as_secs());

    publish_to_modlog(
        http,
        settings,
        "Auto-Timeout Applied",
        &[
            ("User", format!("<@{}> ({})", target_user.id.get(), target_user.name)),
            ("Reason", reason.clone()),
            ("Duration", duration_label.clone()),
            ("Moderator", "Automatic system".to_owned()),
        ],
        SEVERE_EMBED_COLOR,
    )
    .await;

    if let Err(source) = send_moderation_target_dm(
        http,
        target_user,
        guild_id,
        "automatically timed out",
        Some(reason.as_str()),
        Some(duration_label.as_str()),
    )
    .await
    {
        debug!(?source, user_id = %target_user.id, "could not DM auto-timeout notice");
    }

    Some(outcome)
}

pub fn auto_timeout_reason(threshold: usize) -> String {
    format!("Reached {threshold} warnings")
}

async fn apply_timeout(
    http: &serenity::Http,
    guild_id: serenity::GuildId,
    user_id: serenity::UserId,
    duration: Duration,
) -> EscalationOutcome {
    let Some(until) = timeout_until(duration) else {
        error!(timeout_secs = duration.as_secs(), "auto-timeout end is out of range");
        return EscalationOutcome::Failed;
    };

    let edit = serenity::EditMember::new()
        .disable_communication_until_datetime(until)
        .audit_log_reason("Automatic timeout after reaching warning limit");

    match guild_id.edit_member(http, user_id, edit).await {
        Ok(_) => EscalationOutcome::Applied { duration },
        Err(source) if is_missing_permissions_error(&source) => {
            warn!(
                %user_id,
                "missing permissions to auto-timeout user (check role hierarchy)"
            );
            EscalationOutcome::MissingPermissions
        }
        Err(source) => {
            error!(?source, %user_id, "failed to auto-timeout user");
            EscalationOutcome::Failed
        }
    }
}

fn timeout_until(duration: Duration) -> Option<serenity::Timestamp> {
    let duration = chrono::Duration::from_std(duration).ok()?;
    let until = Utc::now().checked_add_signed(duration)?;
    serenity::Timestamp::from_unix_timestamp(until.timestamp()).ok()
}
