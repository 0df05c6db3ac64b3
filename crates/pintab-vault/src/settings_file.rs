//! Settings persistence as a pretty-printed JSON file.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use pintab_core::error::PintabError;
use pintab_core::Settings;

/// Load settings from `path`.
///
/// A missing file yields the defaults; keys absent from the file take
/// their default values.
///
/// # Errors
///
/// Returns [`PintabError::Io`] if the file exists but cannot be read and
/// [`PintabError::Settings`] if it is not valid settings JSON.
pub fn load_settings(path: &Path) -> Result<Settings, PintabError> {
    if !path.exists() {
        debug!(path = %path.display(), "no settings file, using defaults");
        return Ok(Settings::default());
    }
    let raw = fs::read_to_string(path)?;
    if raw.trim().is_empty() {
        return Ok(Settings::default());
    }
    serde_json::from_str(&raw)
        .map_err(|e| PintabError::Settings(format!("{}: {e}", path.display())))
}

/// Write `settings` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`PintabError::Serialization`] if the settings cannot be
/// serialized and [`PintabError::Io`] if the file cannot be written.
pub fn save_settings(path: &Path, settings: &Settings) -> Result<(), PintabError> {
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| PintabError::Serialization(e.to_string()))?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, json + "\n")?;
    info!(path = %path.display(), rules = settings.icon_mappings.len(), "settings saved");
    Ok(())
}
