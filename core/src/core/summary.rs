use log::warn;

use crate::core::{Alert, Risk};

/// Per-severity alert counts for the end-of-scan summary.
///
/// Alerts whose risk label is not one of the four known values are counted
/// nowhere; `unrecognized` tracks how many were dropped so the caller can
/// surface the potential undercount.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AlertSummary {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub informational: usize,
    pub unrecognized: usize,
}

impl AlertSummary {
    pub fn tally(alerts: &[Alert]) -> Self {
        let mut summary = Self::default();
        for alert in alerts {
            match alert.risk_level() {
                Some(Risk::High) => summary.high += 1,
                Some(Risk::Medium) => summary.medium += 1,
                Some(Risk::Low) => summary.low += 1,
                Some(Risk::Informational) => summary.informational += 1,
                None => summary.unrecognized += 1,
            }
        }
        if summary.unrecognized > 0 {
            warn!(
                "{} alert(s) with unrecognized risk labels excluded from summary",
                summary.unrecognized
            );
        }
        summary
    }

    pub fn total_counted(&self) -> usize {
        self.high + self.medium + self.low + self.informational
    }
}

/// High-severity alerts in the order the engine returned them.
pub fn high_alerts(alerts: &[Alert]) -> impl Iterator<Item = &Alert> {
    alerts
        .iter()
        .filter(|a| a.risk_level() == Some(Risk::High))
}
