//! Persisted timer state.
//!
//! The CLI is invocation-based, so the single-timer controller is stored
//! as JSON between commands. The wall-clock delta model makes this exact:
//! `status` after any gap accounts for the full real elapsed time.

use std::path::{Path, PathBuf};

use super::data_dir;
use crate::controller::TimerController;
use crate::error::Result;

const STATE_FILE: &str = "timer_state.json";

pub fn state_path() -> Result<PathBuf> {
    Ok(data_dir()?.join(STATE_FILE))
}

/// Load the persisted controller; a missing or unreadable state file
/// yields a fresh one.
pub fn load_controller() -> TimerController {
    match state_path() {
        Ok(path) => load_controller_from(&path).unwrap_or_default(),
        Err(_) => TimerController::default(),
    }
}

pub fn load_controller_from(path: &Path) -> Option<TimerController> {
    let raw = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&raw).ok()
}

pub fn save_controller(controller: &TimerController) -> Result<()> {
    save_controller_to(controller, &state_path()?)
}

pub fn save_controller_to(controller: &TimerController, path: &Path) -> Result<()> {
    let json = serde_json::to_string(controller)?;
    std::fs::write(path, json)?;
    Ok(())
}
