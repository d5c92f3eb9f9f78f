mod app;
mod config;
mod effects;
mod progress;
mod telegram;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use bot_logging::bot_info;
use schedule_engine::ScheduleEngine;

use crate::config::{config_path, BotConfig, CONFIG_PATH_ENV};
use crate::telegram::TelegramClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let path = config_path(std::env::args().skip(1), std::env::var(CONFIG_PATH_ENV).ok());
    let loaded = BotConfig::load(&path)?;
    let found = loaded.is_some();
    let config = loaded
        .unwrap_or_default()
        .with_env_overrides(|key| std::env::var(key).ok())
        .validate()?;

    bot_logging::initialize(
        config.log_destination,
        bot_logging::parse_level(&config.log_level),
        &config.log_file,
    );
    if !found {
        bot_info!("config {:?} not found, using defaults", path);
    }
    bot_info!(
        "starting schedule bot for group {} (config {:?})",
        config.group_id,
        path
    );

    let engine = Arc::new(ScheduleEngine::new(config.engine_config()));
    let telegram = TelegramClient::new(
        &config.telegram_api_url,
        &config.bot_token,
        Duration::from_secs(config.poll_timeout_secs),
        Duration::from_secs(config.request_timeout_secs),
    )
    .context("failed to create Telegram client")?;

    tokio::select! {
        _ = app::run(engine, Arc::new(telegram)) => {}
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for ctrl-c")?;
            bot_info!("shutting down");
        }
    }
    Ok(())
}
