mod config;
mod state;

pub use config::{Config, NotificationsConfig, SequenceConfig, StageConfig, TimerConfig};
pub use state::{load_controller, save_controller, state_path};

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/stagetick[-dev]/` based on STAGETICK_ENV.
///
/// Set STAGETICK_ENV=dev to use the development data directory.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("STAGETICK_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("stagetick-dev")
    } else {
        base_dir.join("stagetick")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
