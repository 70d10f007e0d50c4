// SPDX-License-Identifier: MIT OR Apache-2.0
//! Editor settings, stored as RON.

use crate::notification::DismissPolicy;
use crate::placement::DEFAULT_DROP_OFFSET;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Settings errors
#[derive(Debug, Error)]
pub enum SettingsError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Tunables of the workflow editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Shift subtracted from the pointer position when a node is dropped
    pub drop_offset: [f32; 2],
    /// How long a notification stays visible, in milliseconds
    pub notification_timeout_ms: u64,
    /// How pending dismissals treat newer notifications
    pub dismiss_policy: DismissPolicy,
}

impl EditorSettings {
    /// Parse settings from RON
    pub fn from_ron(source: &str) -> Result<Self, SettingsError> {
        Ok(ron::from_str(source)?)
    }

    /// Load settings from a RON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_ron(&content)
    }

    /// Notification lifetime
    pub fn notification_timeout(&self) -> Duration {
        Duration::from_millis(self.notification_timeout_ms)
    }
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            drop_offset: DEFAULT_DROP_OFFSET,
            notification_timeout_ms: 3000,
            dismiss_policy: DismissPolicy::Latest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = EditorSettings::default();
        assert_eq!(settings.drop_offset, [100.0, 50.0]);
        assert_eq!(settings.notification_timeout(), Duration::from_secs(3));
        assert_eq!(settings.dismiss_policy, DismissPolicy::Latest);
    }

    #[test]
    fn test_partial_settings_use_defaults() {
        let settings =
            EditorSettings::from_ron("(notification_timeout_ms: 500, dismiss_policy: any)")
                .unwrap();

        assert_eq!(settings.notification_timeout(), Duration::from_millis(500));
        assert_eq!(settings.dismiss_policy, DismissPolicy::Any);
        assert_eq!(settings.drop_offset, DEFAULT_DROP_OFFSET);
    }

    #[test]
    fn test_invalid_settings() {
        let err = EditorSettings::from_ron("(drop_offset: \"left\")").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = EditorSettings::load(Path::new("/nonexistent/promptflow.ron")).unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}
