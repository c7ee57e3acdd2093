//! User settings for Spendbook
//!
//! Preferences only: default currency label, audit journaling, where exports
//! go and how the document report paginates. Every field has a default so a
//! missing or partial config file still loads.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::SpendbookPaths;
use crate::error::LedgerError;
use crate::export::file::write_atomic;
use crate::models::Currency;
use crate::reports::ReportLayout;

/// User settings for Spendbook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency label a new session starts with
    #[serde(default)]
    pub default_currency: Currency,

    /// Whether accepted mutations are appended to the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,

    /// Directory for exports when no explicit path is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,

    /// Document report pagination
    #[serde(default)]
    pub report: ReportLayout,

    /// First line of the narrated expense breakdown
    #[serde(default = "default_narration_intro")]
    pub narration_intro: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_audit_enabled() -> bool {
    true
}

fn default_narration_intro() -> String {
    crate::reports::narrative::DEFAULT_INTRO.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            default_currency: Currency::default(),
            audit_enabled: default_audit_enabled(),
            export_dir: None,
            report: ReportLayout::default(),
            narration_intro: default_narration_intro(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    ///
    /// Defaults are not written back; the caller decides when to persist.
    pub fn load_or_create(paths: &SpendbookPaths) -> Result<Self, LedgerError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| LedgerError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| LedgerError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SpendbookPaths) -> Result<(), LedgerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_vec_pretty(self)
            .map_err(|e| LedgerError::Config(format!("Failed to serialize settings: {}", e)))?;

        write_atomic(paths.settings_file(), &contents)
    }

    /// Directory exports are written to
    pub fn resolve_export_dir(&self, paths: &SpendbookPaths) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| paths.export_dir())
    }
}
