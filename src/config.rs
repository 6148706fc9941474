//! Workbench configuration persistence
//!
//! Stores user preferences in `~/.config/binsight/config.yaml`

use serde::{Deserialize, Serialize};

use crate::engine::AnalysisLevel;

/// Workbench configuration that persists across sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkbenchConfig {
    /// Window widths below this enter responsive (compact) mode
    #[serde(default = "default_responsive_width_budget")]
    pub responsive_width_budget: u32,
    /// Analysis level used when none is given on the command line
    #[serde(default)]
    pub analysis_level: AnalysisLevel,
}

fn default_responsive_width_budget() -> u32 {
    1100
}

impl Default for WorkbenchConfig {
    fn default() -> Self {
        Self {
            responsive_width_budget: default_responsive_width_budget(),
            analysis_level: AnalysisLevel::default(),
        }
    }
}

impl WorkbenchConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(&path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}
