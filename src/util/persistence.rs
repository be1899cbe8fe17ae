use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde_json::Error as SerdeError;

use crate::domain::app_state::PersistedState;

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "TradeFlow";
const APP_NAME: &str = "TradeFlow";

pub fn config_dir() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

fn data_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("preferences.json"))
}

pub fn load_persisted_state() -> Option<PersistedState> {
    load_persisted_state_from(&data_file()?)
}

pub fn load_persisted_state_from(path: &Path) -> Option<PersistedState> {
    let data = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&data) {
        Ok(state) => Some(state),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "ignoring unreadable preferences");
            None
        }
    }
}

pub fn save_persisted_state(state: &PersistedState) -> Result<(), PersistSaveError> {
    let path = data_file().ok_or(PersistSaveError::StorageUnavailable)?;
    save_persisted_state_to(&path, state)
}

pub fn save_persisted_state_to(path: &Path, state: &PersistedState) -> Result<(), PersistSaveError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    fs::write(path, json)?;
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum PersistSaveError {
    #[error("storage directory unavailable")]
    StorageUnavailable,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] SerdeError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Preferences, ShippingMethod};

    #[test]
    fn preferences_survive_a_save_load_cycle() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("TradeFlow").join("preferences.json");
        let state = PersistedState {
            preferences: Preferences {
                destination_country: "DEU".into(),
                shipping_method: ShippingMethod::Land,
                ..Preferences::default()
            },
        };

        save_persisted_state_to(&path, &state).expect("saved");
        let loaded = load_persisted_state_from(&path).expect("loaded");
        assert_eq!(loaded.preferences, state.preferences);
    }

    #[test]
    fn corrupt_preferences_are_ignored() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("preferences.json");
        fs::write(&path, "[1, 2").expect("write");

        assert!(load_persisted_state_from(&path).is_none());
        assert!(load_persisted_state_from(&dir.path().join("absent.json")).is_none());
    }
}
