use poise::serenity_prelude as serenity;
use tracing::warn;

use crate::CommandMeta;
use crate::moderation::access::require_admin;
use crate::moderation::embeds::{
    guild_only_message, moderation_action_embed, nothing_to_remove_message,
    target_profile_from_user, usage_message,
};
use crate::moderation::logging::publish_to_modlog;
use warden_core::{Context, Error};
use warden_database::{LedgerError, SubjectId};
use warden_utils::embed::REVERSAL_EMBED_COLOR;
use warden_utils::formatting::escape_mentions;

pub const META: CommandMeta = CommandMeta {
    name: "unwarn",
    desc: "Remove the most recent warning from a user.",
    category: "moderation",
    usage: "?unwarn <user> [reason]",
};

#[poise::command(prefix_command, slash_command, category = "Moderation")]
pub async fn unwarn(
    ctx: Context<'_>,
    #[description = "The user to remove a warning from"] user: Option<serenity::User>,
    #[description = "Reason for removing the warning"] #[rest] reason: Option<String>,
) -> Result<(), Error> {
    if ctx.guild_id().is_none() {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    }

    if !require_admin(&ctx).await? {
        return Ok(());
    }

    let Some(user) = user else {
        ctx.say(usage_message(META.usage)).await?;
        return Ok(());
    };

    let data = ctx.data();
    let target_profile = target_profile_from_user(&user);

    let removal = match data.ledger.remove_last_warning(SubjectId::from(user.id.get())).await {
        Ok(removal) => removal,
        Err(LedgerError::NoWarnings { .. }) => {
            ctx.say(nothing_to_remove_message(&target_profile.display_name))
                .await?;
            return Ok(());
        }
        Err(other) => return Err(other.into()),
    };

    let reason = data.ledger.resolve_reason(reason.as_deref());

    publish_to_modlog(
        ctx.http(),
        &data.settings,
        "Warning Removed",
        &[
            ("User", format!("<@{}> ({})", user.id.get(), user.name)),
            ("Reason", escape_mentions(&reason)),
            ("Removed warning", escape_mentions(&removal.removed.reason)),
            ("Removed by", format!("<@{}>", ctx.author().id.get())),
            ("Remaining warnings", removal.remaining.to_string()),
        ],
        REVERSAL_EMBED_COLOR,
    )
    .await;

    let embed = moderation_action_embed(
        &target_profile,
        user.id,
        "unwarned",
        &reason,
        removal.remaining,
    );
    if let Err(source) = ctx.send(poise::CreateReply::default().embed(embed)).await {
        warn!(
            ?source,
            user_id = %user.id,
            remaining = removal.remaining,
            "could not confirm warning removal"
        );
    }

    Ok(())
}
