use std::str::FromStr;

use anyhow::{anyhow, bail};

use crate::core::hooks::LifecycleHooks;
use crate::engine::ScanEngine;

/// A lifecycle checkpoint raised by the host engine.
///
/// In-process the host calls the matching [`LifecycleHooks`] handler
/// directly; the replay CLI parses these from a one-event-per-line script
/// and routes them through [`dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    ScanStarted { target: String },
    PreShutdown,
    SpiderStarted { url: String },
    SpiderCompleted,
    ActiveScanStarted { url: String },
    ActiveScanCompleted,
    AlertsReady,
    PlanStarted { plan: String },
    PlanFinished { plan: String },
}

impl FromStr for LifecycleEvent {
    type Err = anyhow::Error;

    /// Parses a script line: an event keyword optionally followed by its
    /// argument, e.g. `scan-started http://example.com` or `alerts`.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.trim().splitn(2, char::is_whitespace);
        let keyword = parts
            .next()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| anyhow!("empty event line"))?;
        let arg = parts.next().map(|a| a.trim().to_string());

        let require_arg = |name: &str| {
            arg.clone()
                .filter(|a| !a.is_empty())
                .ok_or_else(|| anyhow!("event '{}' requires an argument", name))
        };

        let event = match keyword {
            "scan-started" => LifecycleEvent::ScanStarted {
                target: require_arg("scan-started")?,
            },
            "pre-shutdown" => LifecycleEvent::PreShutdown,
            "spider-started" => LifecycleEvent::SpiderStarted {
                url: require_arg("spider-started")?,
            },
            "spider-completed" => LifecycleEvent::SpiderCompleted,
            "active-scan-started" => LifecycleEvent::ActiveScanStarted {
                url: require_arg("active-scan-started")?,
            },
            "active-scan-completed" => LifecycleEvent::ActiveScanCompleted,
            "alerts" => LifecycleEvent::AlertsReady,
            "plan-started" => LifecycleEvent::PlanStarted {
                plan: require_arg("plan-started")?,
            },
            "plan-finished" => LifecycleEvent::PlanFinished {
                plan: require_arg("plan-finished")?,
            },
            other => bail!("unknown lifecycle event '{}'", other),
        };
        Ok(event)
    }
}

impl std::fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LifecycleEvent::ScanStarted { target } => write!(f, "scan-started {}", target),
            LifecycleEvent::PreShutdown => write!(f, "pre-shutdown"),
            LifecycleEvent::SpiderStarted { url } => write!(f, "spider-started {}", url),
            LifecycleEvent::SpiderCompleted => write!(f, "spider-completed"),
            LifecycleEvent::ActiveScanStarted { url } => write!(f, "active-scan-started {}", url),
            LifecycleEvent::ActiveScanCompleted => write!(f, "active-scan-completed"),
            LifecycleEvent::AlertsReady => write!(f, "alerts"),
            LifecycleEvent::PlanStarted { plan } => write!(f, "plan-started {}", plan),
            LifecycleEvent::PlanFinished { plan } => write!(f, "plan-finished {}", plan),
        }
    }
}

/// Routes an event onto the matching hook handler.
pub fn dispatch(
    hooks: &LifecycleHooks,
    engine: &mut dyn ScanEngine,
    event: &LifecycleEvent,
) -> anyhow::Result<()> {
    match event {
        LifecycleEvent::ScanStarted { target } => hooks.scan_started(engine, target),
        LifecycleEvent::PreShutdown => hooks.pre_shutdown(engine),
        LifecycleEvent::SpiderStarted { url } => hooks.spider_started(engine, url),
        LifecycleEvent::SpiderCompleted => hooks.spider_completed(engine),
        LifecycleEvent::ActiveScanStarted { url } => hooks.active_scan_started(engine, url),
        LifecycleEvent::ActiveScanCompleted => hooks.active_scan_completed(engine),
        LifecycleEvent::AlertsReady => hooks.alerts(engine),
        LifecycleEvent::PlanStarted { plan } => hooks.automation_plan_started(engine, plan),
        LifecycleEvent::PlanFinished { plan } => hooks.automation_plan_finished(engine, plan),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::recorded::RecordedEngine;
    use crate::{ConsoleSink, HookConfig};

    #[test]
    fn test_parses_events_with_arguments() {
        assert_eq!(
            "scan-started http://example.com"
                .parse::<LifecycleEvent>()
                .unwrap(),
            LifecycleEvent::ScanStarted {
                target: "http://example.com".to_string()
            }
        );
        assert_eq!(
            "plan-finished nightly-api".parse::<LifecycleEvent>().unwrap(),
            LifecycleEvent::PlanFinished {
                plan: "nightly-api".to_string()
            }
        );
    }

    #[test]
    fn test_parses_bare_events() {
        for (line, expected) in [
            ("pre-shutdown", LifecycleEvent::PreShutdown),
            ("spider-completed", LifecycleEvent::SpiderCompleted),
            ("active-scan-completed", LifecycleEvent::ActiveScanCompleted),
            ("alerts", LifecycleEvent::AlertsReady),
        ] {
            assert_eq!(line.parse::<LifecycleEvent>().unwrap(), expected);
        }
    }

    #[test]
    fn test_rejects_unknown_and_malformed_lines() {
        assert!("spider-finished".parse::<LifecycleEvent>().is_err());
        assert!("scan-started".parse::<LifecycleEvent>().is_err());
        assert!("   ".parse::<LifecycleEvent>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let events = [
            LifecycleEvent::ScanStarted {
                target: "http://example.com".to_string(),
            },
            LifecycleEvent::AlertsReady,
            LifecycleEvent::PlanStarted {
                plan: "smoke".to_string(),
            },
        ];
        for event in events {
            assert_eq!(event.to_string().parse::<LifecycleEvent>().unwrap(), event);
        }
    }

    #[test]
    fn test_dispatch_reaches_every_handler() {
        let hooks = LifecycleHooks::new(HookConfig::default(), ConsoleSink::new_ref());
        let mut engine = RecordedEngine::new();

        let script = [
            "plan-started smoke",
            "scan-started http://example.com",
            "spider-started http://example.com",
            "spider-completed",
            "active-scan-started http://example.com",
            "active-scan-completed",
            "alerts",
            "pre-shutdown",
            "plan-finished smoke",
        ];
        for line in script {
            let event = line.parse::<LifecycleEvent>().unwrap();
            dispatch(&hooks, &mut engine, &event).unwrap();
        }

        // two options at scan start, three at active-scan start
        assert_eq!(engine.recorded_calls().len(), 5);
    }
}
