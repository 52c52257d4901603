// ── Settings persistence ──────────────────────────────────────────────────────
//
// Reads and writes `plume.json` in the working directory.
// No `unsafe`; pure safe Rust + serde_json.

use std::{fs, path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{
    autosave,
    error::{PlumeError, Result},
    font::{self, FontSettings},
};

/// Fixed settings location, relative to the working directory.
pub(crate) const SETTINGS_PATH: &str = "plume.json";

// ── Format version ────────────────────────────────────────────────────────────

const SETTINGS_VERSION: u32 = 1;

// ── On-disk type ──────────────────────────────────────────────────────────────

/// Root of the JSON settings file.  Absent fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub(crate) version: u32,
    pub(crate) font_family: String,
    pub(crate) font_size: u32,
    pub(crate) autosave_interval_secs: u64,
    /// `tracing` filter directive, e.g. `"info"` or `"plume=debug"`.
    pub(crate) log_level: String,
    /// Families offered by the font chooser.
    pub(crate) font_families: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            font_family: font::DEFAULT_FAMILY.to_owned(),
            font_size: font::DEFAULT_SIZE,
            autosave_interval_secs: autosave::DEFAULT_INTERVAL.as_secs(),
            log_level: "info".to_owned(),
            font_families: ["Monospaced", "Serif", "SansSerif", "Dialog", "DialogInput"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
        }
    }
}

impl Settings {
    /// Font state to start the session with.  An out-of-range stored size
    /// falls back to the default.
    pub(crate) fn font(&self) -> FontSettings {
        let size = if (font::MIN_SIZE..=font::MAX_SIZE).contains(&self.font_size) {
            self.font_size
        } else {
            font::DEFAULT_SIZE
        };
        FontSettings {
            family: self.font_family.clone(),
            size,
        }
    }

    /// Zero is treated as "use the default".
    pub(crate) fn autosave_interval(&self) -> Duration {
        match self.autosave_interval_secs {
            0 => autosave::DEFAULT_INTERVAL,
            secs => Duration::from_secs(secs),
        }
    }

    /// Copy the final presentation state back in before saving.
    pub(crate) fn update_font(&mut self, font: &FontSettings) {
        self.font_family = font.family.clone();
        self.font_size = font.size;
    }

    // ── Load ──────────────────────────────────────────────────────────────────

    /// Read and parse the settings file.
    ///
    /// Returns the defaults on any error: file missing, JSON parse failure,
    /// or an unrecognised version number.
    pub(crate) fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(Some(s)) => s,
            Ok(None) => Self::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring settings file");
                Self::default()
            }
        }
    }

    fn try_load(path: &Path) -> Result<Option<Self>> {
        let data = match fs::read(path) {
            Ok(d) => d,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(PlumeError::io(path, e)),
        };
        let settings: Self = serde_json::from_slice(&data)?;
        if settings.version != SETTINGS_VERSION {
            tracing::warn!(version = settings.version, "unsupported settings version");
            return Ok(None);
        }
        Ok(Some(settings))
    }

    // ── Save ──────────────────────────────────────────────────────────────────

    /// Write the settings as pretty JSON, overwriting `path`.
    pub(crate) fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_vec_pretty(self)?;
        fs::write(path, json).map_err(|e| PlumeError::io(path, e))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
