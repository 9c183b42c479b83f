use warden_core::{Context, Error};

use crate::moderation::embeds::permission_denied_message;

/// Check the invoker against the static moderator allow-list, replying with a
/// refusal when they are not on it.
pub async fn require_admin(ctx: &Context<'_>) -> Result<bool, Error> {
    if ctx.data().settings.is_admin(ctx.author().id.get()) {
        return Ok(true);
    }

    ctx.say(permission_denied_message()).await?;
    Ok(false)
}
