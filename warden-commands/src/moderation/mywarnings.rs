use crate::CommandMeta;
use crate::moderation::warnings::reply_with_warnings;
use warden_core::{Context, Error};

pub const META: CommandMeta = CommandMeta {
    name: "mywarnings",
    desc: "Show your own warnings.",
    category: "moderation",
    usage: "?mywarnings",
};

/// Available to everyone; only ever shows the invoker's own record.
#[poise::command(prefix_command, slash_command, category = "Moderation", ephemeral)]
pub async fn mywarnings(ctx: Context<'_>) -> Result<(), Error> {
    reply_with_warnings(ctx, ctx.author()).await
}
