use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use teloxide::prelude::*;
use tracing_subscriber::EnvFilter;
use unarchive_bot::telegram::{self, TelegramTransport};
use unarchive_bot::{Config, Pipeline, WorkingDirs};
use unarchive_fetch::{Fetcher, ReqwestClient};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::parse();
    tracing::info!(?config, "starting");

    let dirs = WorkingDirs::new(&config.work_dir);
    dirs.ensure().context("Failed to create working directories")?;

    let client =
        ReqwestClient::with_timeouts(config.timeouts()).context("Failed to build HTTP client")?;
    let bot = Bot::new(&config.bot_token);
    let me = bot.get_me().await.context("Failed to reach the Bot API")?;
    let bot_name = me.user.username.clone();
    tracing::info!(bot = ?bot_name, "connected");

    let pipeline = Pipeline::new(TelegramTransport::new(bot.clone()), Fetcher::new(client), dirs)
        .with_fetch_options(config.fetch_options())
        .with_extract_options(config.extract_options());

    telegram::dispatch(bot, Arc::new(pipeline), bot_name).await;
    tracing::info!("stopped");
    Ok(())
}
