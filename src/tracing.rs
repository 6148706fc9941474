//! Debug tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging
//! layout transitions, cursor fan-out and session round-trips.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=binsight::layout=trace` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/binsight/logs/binsight.log` with daily
//! rotation. File logging uses debug level by default for more verbose
//! troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::panel::{PanelId, PanelRegistry};

/// Initialize tracing subscriber with console and file logging
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console layer - respects RUST_LOG
    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "binsight.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of panel visibility for diffing
#[derive(Debug, Clone)]
pub struct LayoutSnapshot {
    pub visible: Vec<PanelId>,
}

impl LayoutSnapshot {
    pub fn from_registry(registry: &PanelRegistry) -> Self {
        Self {
            visible: registry.visible_ids(),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &LayoutSnapshot) -> Option<String> {
        let shown: Vec<String> = other
            .visible
            .iter()
            .filter(|id| !self.visible.contains(id))
            .map(|id| format!("+{}", id))
            .collect();
        let hidden: Vec<String> = self
            .visible
            .iter()
            .filter(|id| !other.visible.contains(id))
            .map(|id| format!("-{}", id))
            .collect();

        let mut changes = shown;
        changes.extend(hidden);
        if changes.is_empty() {
            None
        } else {
            Some(changes.join(" "))
        }
    }
}
