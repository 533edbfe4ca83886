//! Process-level plumbing shared by the bot binaries.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::info;

use tb_sched::{Notification, NotificationSink, NotifyError};

/// Install the global `tracing` subscriber.  `RUST_LOG` overrides the
/// default `info` level.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();
}

/// Load a JSON config from `path`, or the defaults when no path is given.
/// Missing fields take their default values.
pub fn load_config<T>(path: Option<&Path>) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let Some(path) = path else {
        info!("no config file given, using defaults");
        return Ok(T::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse config: {}", path.display()))?;
    info!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Writes each notification as one JSON line on stdout.
pub struct JsonLinesSink;

impl NotificationSink for JsonLinesSink {
    fn deliver(&self, notification: &Notification) -> Result<(), NotifyError> {
        let line = serde_json::to_string(notification).map_err(|e| NotifyError(e.to_string()))?;
        println!("{line}");
        Ok(())
    }
}
