use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::moderation::access::require_admin;
use crate::moderation::embeds::{
    guild_only_message, no_warnings_message, target_profile_from_user, usage_message,
    warning_list_pages,
};
use warden_core::{Context, Error};
use warden_database::SubjectId;
use warden_utils::pagination::paginate_embed_pages;

pub const META: CommandMeta = CommandMeta {
    name: "warnings",
    desc: "Show the warning history for a user.",
    category: "moderation",
    usage: "?warnings <user>",
};

#[poise::command(prefix_command, slash_command, category = "Moderation")]
pub async fn warnings(
    ctx: Context<'_>,
    #[description = "The user to check"] user: Option<serenity::User>,
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

    reply_with_warnings(ctx, &user).await
}

/// Reply with `user`'s warnings, or a short note when there are none.
pub(crate) async fn reply_with_warnings(
    ctx: Context<'_>,
    user: &serenity::User,
) -> Result<(), Error> {
    let entries = ctx
        .data()
        .ledger
        .get_warnings(SubjectId::from(user.id.get()))
        .await;
    let target_profile = target_profile_from_user(user);

    if entries.is_empty() {
        ctx.say(no_warnings_message(&target_profile.display_name))
            .await?;
        return Ok(());
    }

    paginate_embed_pages(
        ctx,
        &format!("Warnings for {}", target_profile.display_name),
        &warning_list_pages(&entries),
        target_profile.avatar_url.as_deref(),
    )
    .await?;

    Ok(())
}
