//! Persisted client settings.
//!
//! The editor keeps a couple of per-install flags (DevTools visibility, the
//! one-time intro overlay). Serving them from the gateway gives every
//! client the same view. Persistence is best-effort: the in-memory flags
//! always update, and a failed or malformed file never takes the service
//! down, it just loses the flags.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::state::AppState;

/// Flags the editor persists between visits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientFlags {
    /// Whether the DevTools panel is shown.
    pub devtools_enabled: bool,
    /// Set once the intro overlay has been dismissed.
    pub intro_seen: bool,
}

#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    flags: Mutex<ClientFlags>,
}

impl SettingsStore {
    /// Opens the store at `path`, falling back to the platform config
    /// directory. A missing or malformed file yields default flags.
    pub fn open(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(p) => p,
            None => default_path()?,
        };

        let flags = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(flags) => flags,
                Err(e) => {
                    warn!("Ignoring malformed settings file {}: {e}", path.display());
                    ClientFlags::default()
                }
            },
            Err(_) => ClientFlags::default(),
        };

        Ok(Self {
            path,
            flags: Mutex::new(flags),
        })
    }

    pub fn flags(&self) -> ClientFlags {
        *self.flags.lock().unwrap()
    }

    /// Replaces the flags and persists them. The in-memory copy always
    /// updates; a persistence failure is logged and swallowed.
    pub fn replace(&self, flags: ClientFlags) {
        *self.flags.lock().unwrap() = flags;
        if let Err(e) = self.persist(flags) {
            warn!(
                "Could not save client settings to {}: {e}",
                self.path.display()
            );
        }
    }

    fn persist(&self, flags: ClientFlags) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&flags)?)?;
        Ok(())
    }
}

fn default_path() -> Result<PathBuf> {
    let config_dir =
        dirs::config_dir().ok_or_else(|| anyhow!("Could not determine config directory"))?;
    Ok(config_dir.join("hirewrite").join("settings.json"))
}

/// GET /api/v1/settings
pub async fn handle_get_settings(State(state): State<AppState>) -> Json<ClientFlags> {
    Json(state.settings.flags())
}

/// PUT /api/v1/settings
pub async fn handle_put_settings(
    State(state): State<AppState>,
    Json(flags): Json<ClientFlags>,
) -> Json<ClientFlags> {
    state.settings.replace(flags);
    Json(state.settings.flags())
}
