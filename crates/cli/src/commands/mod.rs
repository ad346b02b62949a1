//! Subcommand implementations and the setup they share.

pub mod ask;
pub mod chat;
pub mod onboard;
pub mod start;
pub mod stats;
pub mod status;

use std::path::{Path, PathBuf};

use thermowise_agent::Session;
use thermowise_config::AppConfig;
use thermowise_dataset::DatasetInfo;

/// Flags accepted by every subcommand.
pub struct GlobalOpts {
    pub config: Option<PathBuf>,
    pub data: Option<PathBuf>,
}

impl GlobalOpts {
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(AppConfig::config_path)
    }

    /// Dataset to load, if any: `--data` wins, then the configured path
    /// when autoload is on.
    pub fn dataset_path<'a>(&'a self, config: &'a AppConfig) -> Option<&'a Path> {
        match &self.data {
            Some(path) => Some(path.as_path()),
            None if config.dataset.autoload => Some(config.dataset.path.as_path()),
            None => None,
        }
    }
}

pub fn load_config(opts: &GlobalOpts) -> Result<AppConfig, Box<dyn std::error::Error>> {
    AppConfig::load_with_env(&opts.config_path())
        .map_err(|e| format!("Failed to load config: {e}").into())
}

/// Build a session and load its dataset. A dataset failure is printed and
/// the session continues without data.
pub fn build_session(
    opts: &GlobalOpts,
    config: &AppConfig,
) -> Result<(Session, Option<DatasetInfo>), Box<dyn std::error::Error>> {
    let mut session =
        Session::from_config(config).map_err(|e| format!("Failed to set up session: {e}"))?;

    let info = match opts.dataset_path(config) {
        Some(path) => match session.load_dataset(path) {
            Ok(info) => Some(info),
            Err(e) => {
                eprintln!("  Warning: {e}");
                eprintln!("  Continuing without dataset; answers will be general advice.");
                None
            }
        },
        None => None,
    };

    tracing::debug!(
        model = session.model(),
        dataset = info.is_some(),
        "Session ready"
    );
    Ok((session, info))
}

pub fn describe_dataset(info: Option<&DatasetInfo>) -> String {
    match info {
        Some(info) => format!("{} rows, {} columns", info.rows, info.columns.len()),
        None => "not loaded".to_string(),
    }
}
