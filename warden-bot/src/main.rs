use std::env;
use std::sync::Arc;

use anyhow::Context as _;
use poise::serenity_prelude as serenity;
use tracing::{debug, error, info, warn};
use tracing_subscriber::Layer;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use rustls::crypto::ring::default_provider;

use warden_core::{Data, Error, Settings};
use warden_database::{Ledger, WarningStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(filter_fn(|metadata| {
        let target = metadata.target();

        let within_info_level = *metadata.level() <= tracing::Level::INFO;
        if !within_info_level {
            return false;
        }

        !(target.starts_with("serenity::gateway::bridge::shard_manager")
            || target.starts_with("serenity::gateway::bridge::shard_runner"))
    }));

    tracing_subscriber::registry().with(fmt_layer).init();

    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    // Load the .env file
    dotenvy::dotenv().ok();

    let token = env::var("DISCORD_TOKEN").context("DISCORD_TOKEN is not set")?;
    let guild_id = env::var("DISCORD_GUILD_ID")
        .context("DISCORD_GUILD_ID is not set")?
        .parse::<u64>()
        .context("DISCORD_GUILD_ID must be a guild id")?;

    let settings = Settings::from_env()?;
    if settings.admin_ids.is_empty() {
        warn!("ADMIN_IDS is empty; moderation commands will refuse every caller.");
    }
    if settings.modlog_channel_id.is_none() {
        info!("MODLOG_CHANNEL_ID not set; audit records will not be posted.");
    }
    info!(
        threshold = settings.escalation.threshold.get(),
        auto_timeout_secs = settings.escalation.timeout.as_secs(),
        "Escalation policy configured."
    );

    // A corrupt store stops startup here rather than being replaced.
    let ledger = Ledger::open(
        WarningStore::new(&settings.warnings_path),
        settings.default_reason.clone(),
    )
    .await
    .with_context(|| {
        format!(
            "failed to load warnings from {}",
            settings.warnings_path.display()
        )
    })?;

    let data = Data {
        ledger: Arc::new(ledger),
        settings: Arc::new(settings),
    };

    let intents = serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: warden_commands::commands(),
            on_error: |error| Box::pin(on_error(error)),
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(warden_utils::COMMAND_PREFIX.to_string()),
                mention_as_prefix: false,
                ..Default::default()
            },
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!(user = %ready.user.name, "Warden is online and ready!");

                poise::builtins::register_in_guild(
                    ctx,
                    &framework.options().commands,
                    serenity::GuildId::new(guild_id),
                )
                .await?;

                ctx.set_activity(Some(serenity::ActivityData::watching(format!(
                    "{}warn",
                    warden_utils::COMMAND_PREFIX
                ))));

                Ok(data)
            })
        })
        .build();

    info!("Warden is connecting...");

    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await?;

    client.start().await?;
    Ok(())
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!(?error, command = %ctx.command().qualified_name, "command error");

            let embed = serenity::CreateEmbed::new()
                .title("Command Error")
                .description("Something went wrong while running this command.")
                .color(warden_utils::embed::DEFAULT_EMBED_COLOR);

            let _ = ctx
                .send(poise::CreateReply::default().ephemeral(true).embed(embed))
                .await;
        }
        poise::FrameworkError::ArgumentParse { ctx, input, .. } => {
            let usage = format!(
                "Usage: `{}{}`",
                warden_utils::COMMAND_PREFIX,
                ctx.command().qualified_name
            );
            let description = if let Some(input) = input {
                format!("Invalid argument: `{}`\n{}", input, usage)
            } else {
                format!("Missing required argument.\n{}", usage)
            };

            let _ = ctx.say(description).await;
        }
        poise::FrameworkError::UnknownCommand { .. } => {
            debug!("unknown command invocation");
        }
        other => {
            error!(?other, "framework error");
        }
    }
}
