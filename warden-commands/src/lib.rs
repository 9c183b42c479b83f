pub mod moderation;

use warden_core::{Data, Error};

pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub category: &'static str,
    pub usage: &'static str,
}

pub const COMMANDS: &[CommandMeta] = &[
    moderation::warn::META,
    moderation::unwarn::META,
    moderation::warnings::META,
    moderation::mywarnings::META,
];

/// Every command, with its description taken from [`COMMANDS`].
pub fn commands() -> Vec<poise::Command<Data, Error>> {
    let mut commands = vec![
        moderation::warn(),
        moderation::unwarn(),
        moderation::warnings(),
        moderation::mywarnings(),
    ];

    for command in &mut commands {
        if let Some(meta) = COMMANDS.iter().find(|meta| meta.name == command.name) {
            command.description = Some(meta.desc.to_owned());
        }
    }

    commands
}
