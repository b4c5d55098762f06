// modules
pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod follower;
pub mod http;
pub mod libs;
pub mod logger;
pub mod updater;


use clap::Parser;
use log::{debug, info, warn};
use rust_i18n::i18n;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::constants::{data_dir, STORE_DB_NAME};
use crate::db::MainStore;
use crate::error::Result;
use crate::http::HttpClient;
use crate::logger::setup_logger;
use crate::updater::{ChannelNotifier, HostActivity, UpdateManager, VersionInfo};

// Translations are looked up in ./i18n relative to the crate root
i18n!("i18n", fallback = "en");

/// Checks for a newer package release and reports it
#[derive(Debug, Default, Clone, PartialEq, Eq, Parser)]
#[command(author, version, about, long_about = None)]
pub struct RunOptions {
    /// Rewind the last check time so the first tick queries the server
    #[arg(long)]
    pub check_now: bool,

    /// Print update notifications to stdout as JSON lines
    #[arg(long)]
    pub json: bool,
}

/// Runs the update checker until it has nothing left to do.
///
/// Loads `config.yaml`, opens the preference store and ticks the
/// [`UpdateManager`] on a fixed interval. The loop stops once a tick reports
/// that no check is in flight or due soon.
pub async fn run() -> Result<()> {
    let options = RunOptions::parse();
    let config = AppConfig::load_or_default(AppConfig::default_path())?;
    setup_logger(&config.log, &config.log.log_dir())?;
    debug!("Starting with {:?}", options);

    let store = Arc::new(MainStore::new(data_dir().join(STORE_DB_NAME))?);
    let client = Arc::new(HttpClient::with_timeout(config.updater.request_timeout()?)?);
    let (notifier, mut notifications) = ChannelNotifier::new();
    let tick_interval = config.updater.tick_interval()?;

    let mut manager =
        UpdateManager::new(config.updater, store, client)?.with_notifier(Arc::new(notifier));
    if options.check_now {
        manager.check_for_updates_now();
    }

    let mut ticker = tokio::time::interval(tick_interval);
    loop {
        ticker.tick().await;
        let keep_going = manager.tick(HostActivity::Idle);

        while let Ok(version_info) = notifications.try_recv() {
            report_update(&version_info, options.json);
        }

        if !keep_going {
            break;
        }
    }

    info!(
        "Latest version {}, next check in {:.0} minutes",
        manager.latest_version(),
        manager.minutes_until_next_check(HostActivity::Idle)
    );
    Ok(())
}

fn report_update(version_info: &VersionInfo, json: bool) {
    if !json {
        info!(
            "Update available: {} ({})",
            version_info.version, version_info.notes
        );
        return;
    }
    match serde_json::to_string(version_info) {
        Ok(line) => println!("{}", line),
        Err(e) => warn!("Failed to serialize update notification: {}", e),
    }
}
