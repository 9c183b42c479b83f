use chrono::Utc;
use poise::serenity_prelude as serenity;
use tracing::debug;

use crate::CommandMeta;
use crate::moderation::access::require_admin;
use crate::moderation::embeds::{
    guild_only_message, moderation_action_embed, moderation_bot_target_message,
    send_moderation_target_dm, target_profile_from_user, usage_message,
};
use crate::moderation::escalation_check::{EscalationOutcome, check_and_escalate};
use crate::moderation::logging::publish_to_modlog;
use warden_core::{Context, Error};
use warden_database::SubjectId;
use warden_utils::embed::DEFAULT_EMBED_COLOR;
use warden_utils::formatting::{escape_mentions, format_compact_duration, format_warning_count};

pub const META: CommandMeta = CommandMeta {
    name: "warn",
    desc: "Issue a warning to a user.",
    category: "moderation",
    usage: "?warn <user> [reason]",
};

#[poise::command(prefix_command, slash_command, category = "Moderation")]
pub async fn warn(
    ctx: Context<'_>,
    #[description = "The user to warn"] user: Option<serenity::User>,
    #[description = "Reason for warning"] #[rest] reason: Option<String>,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    if !require_admin(&ctx).await? {
        return Ok(());
    }

    let Some(user) = user else {
        ctx.say(usage_message(META.usage)).await?;
        return Ok(());
    };

    if user.bot {
        ctx.say(moderation_bot_target_message()).await?;
        return Ok(());
    }

    ctx.defer().await?;

    let data = ctx.data();
    let reason = data.ledger.resolve_reason(reason.as_deref());
    let warning_count = data
        .ledger
        .add_warning(
            SubjectId::from(user.id.get()),
            Some(reason.as_str()),
            ctx.author().id.get(),
            Utc::now(),
        )
        .await?;

    // The warning is recorded; nothing past this point may abort the command.
    publish_to_modlog(
        ctx.http(),
        &data.settings,
        "User Warned",
        &[
            ("User", format!("<@{}> ({})", user.id.get(), user.name)),
            ("Reason", escape_mentions(&reason)),
            ("Warned by", format!("<@{}>", ctx.author().id.get())),
            ("Warning count", warning_count.to_string()),
        ],
        DEFAULT_EMBED_COLOR,
    )
    .await;

    if let Err(source) = send_moderation_target_dm(
        ctx.http(),
        &user,
        guild_id,
        "warned",
        Some(reason.as_str()),
        None,
    )
    .await
    {
        debug!(?source, user_id = %user.id, "could not DM warning notice");
    }

    let escalation =
        check_and_escalate(ctx.http(), &data.settings, guild_id, &user, warning_count).await;

    let target_profile = target_profile_from_user(&user);
    let embed = moderation_action_embed(&target_profile, user.id, "warned", &reason, warning_count);
    if let Err(source) = ctx.send(poise::CreateReply::default().embed(embed)).await {
        tracing::warn!(
            ?source,
            user_id = %user.id,
            warning_count,
            "could not confirm recorded warning"
        );
    }

    if let Some(outcome) = escalation
        && let Err(source) = ctx
            .say(escalation_notice(user.id, warning_count, outcome))
            .await
    {
        tracing::warn!(?source, user_id = %user.id, "could not report auto-timeout outcome");
    }

    Ok(())
}

/// Reply line telling the moderator how the auto-timeout went.
fn escalation_notice(
    user_id: serenity::UserId,
    warning_count: usize,
    outcome: EscalationOutcome,
) -> String {
    match outcome {
        EscalationOutcome::Applied { duration } => format!(
            "<@{}> has been automatically timed out for {} after reaching {}.",
            user_id.get(),
            format_compact_duration(duration.as_secs()),
            format_warning_count(warning_count)
        ),
        EscalationOutcome::MissingPermissions => {
            "I don't have permission to timeout that user.".to_owned()
        }
        EscalationOutcome::Failed => {
            "Failed to apply the automatic timeout for that user.".to_owned()
        }
    }
}
