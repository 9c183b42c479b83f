pub mod config;

use std::sync::Arc;

use warden_database::Ledger;

pub use config::Settings;

pub type Error = anyhow::Error;

#[derive(Clone, Debug)]
pub struct Data {
    pub ledger: Arc<Ledger>,
    pub settings: Arc<Settings>,
}

pub type Context<'a> = poise::Context<'a, Data, Error>;
