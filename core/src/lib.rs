pub mod core;
pub mod engine;
pub mod events;
pub mod utils;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use crate::core::hooks::LifecycleHooks;
pub use crate::core::summary::AlertSummary;
pub use crate::core::{Alert, Risk};
pub use crate::engine::recorded::{OptionCall, RecordedEngine};
pub use crate::engine::ScanEngine;
pub use crate::events::{dispatch, LifecycleEvent};
pub use crate::utils::read_lines;

/// Engine option values the hooks apply at lifecycle checkpoints.
///
/// Defaults are the values used against real targets; a replay run may
/// override them from a JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HookConfig {
    pub timeout_secs: u64,
    pub single_cookie_header: bool,
    pub max_scan_duration_mins: u64,
    pub threads_per_host: u32,
    pub delay_ms: u64,
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            single_cookie_header: true,
            max_scan_duration_mins: 30,
            threads_per_host: 2,
            delay_ms: 0,
        }
    }
}

impl HookConfig {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }
}

/// Output abstraction for the hook handlers.
/// CLI implements this with colored terminal output; tests capture lines.
pub trait ScanEventSink: Send + Sync {
    fn on_log(&self, level: &str, message: &str);
    fn on_high_alert(&self, alert: &Alert);
}

pub type SinkRef = Arc<dyn ScanEventSink>;

/// Terminal output sink for CLI usage.
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new_ref() -> SinkRef {
        Arc::new(Self)
    }
}

impl ScanEventSink for ConsoleSink {
    fn on_log(&self, level: &str, message: &str) {
        use colored::*;
        use std::io::Write;
        let colored = match level {
            "success" => message.green().to_string(),
            "error"   => message.red().to_string(),
            "warn"    => message.yellow().to_string(),
            "phase"   => message.bright_cyan().bold().to_string(),
            _         => message.to_string(),
        };
        print!("{}\r\n", colored);
        std::io::stdout().flush().ok();
    }

    fn on_high_alert(&self, alert: &Alert) {
        use colored::*;
        use std::io::Write;
        print!(
            "  - {} at {}\r\n",
            alert.name.red().bold(),
            alert.url.white()
        );
        std::io::stdout().flush().ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_applied_option_values() {
        let cfg = HookConfig::default();
        assert_eq!(cfg.timeout_secs, 30);
        assert!(cfg.single_cookie_header);
        assert_eq!(cfg.max_scan_duration_mins, 30);
        assert_eq!(cfg.threads_per_host, 2);
        assert_eq!(cfg.delay_ms, 0);
    }

    #[test]
    fn test_config_deserializes_partial_json_over_defaults() {
        let cfg: HookConfig = serde_json::from_str(r#"{"threadsPerHost": 8}"#).unwrap();
        assert_eq!(cfg.threads_per_host, 8);
        assert_eq!(cfg.timeout_secs, 30);
    }
}
