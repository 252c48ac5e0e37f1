// src/pipeline/pipeline.rs

use crate::error::Result;
use crate::models::Config;
use crate::services::{ArchiveClient, PushClient};
use crate::utils::http::create_async_client;

use super::poll::{PollSettings, Poller};

/// Build the archive and push clients and poll forever.
///
/// Only configuration problems return an error, and only before the loop
/// starts; everything after that is logged and recovered.
pub async fn run_pipeline(config: &Config) -> Result<()> {
    config.validate()?;

    let client = create_async_client(&config.http)?;
    let archive = ArchiveClient::new(&config.archive, client.clone())?;
    let notifier = PushClient::new(&config.push, client)?;

    log::info!(
        "Watching {} for new shows, pushing to {}",
        config.archive.base_url,
        config.push.endpoint
    );

    let mut poller = Poller::new(archive, notifier, PollSettings::from_config(config));
    poller.run().await;

    Ok(())
}
