use crate::core::summary::{high_alerts, AlertSummary};
use crate::engine::ScanEngine;
use crate::{HookConfig, SinkRef};

/// Hook handlers invoked by the host engine at lifecycle checkpoints.
///
/// Each handler runs synchronously to completion, holds no state across
/// calls, and only touches the engine through the borrowed handle. The host
/// guarantees event ordering; nothing is enforced here.
pub struct LifecycleHooks {
    config: HookConfig,
    sink: SinkRef,
}

impl LifecycleHooks {
    pub fn new(config: HookConfig, sink: SinkRef) -> Self {
        Self { config, sink }
    }

    /// Engine start: applies the global request options before any phase runs.
    pub fn scan_started(&self, engine: &mut dyn ScanEngine, target: &str) -> anyhow::Result<()> {
        self.sink
            .on_log("phase", &format!("[*] Scan started, targeting: {}", target));

        engine.set_timeout_in_secs(self.config.timeout_secs)?;
        engine.set_single_cookie_request_header(self.config.single_cookie_header)?;

        self.sink
            .on_log("success", "[+] Global engine configuration applied");
        Ok(())
    }

    pub fn pre_shutdown(&self, _engine: &mut dyn ScanEngine) -> anyhow::Result<()> {
        self.sink
            .on_log("info", "[*] Engine shutting down, cleaning up...");
        Ok(())
    }

    pub fn spider_started(&self, _engine: &mut dyn ScanEngine, url: &str) -> anyhow::Result<()> {
        self.sink
            .on_log("phase", &format!("[*] Spider started for URL: {}", url));
        Ok(())
    }

    /// Spider done: reports how many URLs were discovered. An empty result
    /// reports 0, it is not an error.
    pub fn spider_completed(&self, engine: &mut dyn ScanEngine) -> anyhow::Result<()> {
        let urls_found = engine.spider_results()?.len();
        self.sink.on_log(
            "success",
            &format!("[+] Spider completed. URLs found: {}", urls_found),
        );
        Ok(())
    }

    /// Active scan start: applies the attack-phase options.
    pub fn active_scan_started(
        &self,
        engine: &mut dyn ScanEngine,
        url: &str,
    ) -> anyhow::Result<()> {
        self.sink.on_log(
            "phase",
            &format!("[*] Active scanner started for URL: {}", url),
        );

        engine.set_max_scan_duration_in_mins(self.config.max_scan_duration_mins)?;
        engine.set_threads_per_host(self.config.threads_per_host)?;
        engine.set_delay_in_ms(self.config.delay_ms)?;

        self.sink
            .on_log("success", "[+] Active scanner configuration applied");
        Ok(())
    }

    pub fn active_scan_completed(&self, _engine: &mut dyn ScanEngine) -> anyhow::Result<()> {
        self.sink.on_log("info", "[*] Active scanner completed");
        Ok(())
    }

    /// Alert reporting: per-severity summary plus a detail line for each
    /// High-severity finding, in the order the engine returned them.
    pub fn alerts(&self, engine: &mut dyn ScanEngine) -> anyhow::Result<()> {
        let alerts = engine.alerts()?;

        if alerts.is_empty() {
            self.sink.on_log("info", "[*] No alerts found");
            return Ok(());
        }

        let summary = AlertSummary::tally(&alerts);

        self.sink.on_log("info", "[+] Alerts summary:");
        self.sink
            .on_log("info", &format!("  High: {}", summary.high));
        self.sink
            .on_log("info", &format!("  Medium: {}", summary.medium));
        self.sink.on_log("info", &format!("  Low: {}", summary.low));
        self.sink
            .on_log("info", &format!("  Info: {}", summary.informational));

        if summary.high > 0 {
            self.sink
                .on_log("warn", "[!] High-risk vulnerabilities detected:");
            for alert in high_alerts(&alerts) {
                self.sink.on_high_alert(alert);
            }
        }
        Ok(())
    }

    pub fn automation_plan_started(
        &self,
        _engine: &mut dyn ScanEngine,
        plan: &str,
    ) -> anyhow::Result<()> {
        self.sink
            .on_log("phase", &format!("[*] Automation plan started: {}", plan));
        Ok(())
    }

    pub fn automation_plan_finished(
        &self,
        _engine: &mut dyn ScanEngine,
        plan: &str,
    ) -> anyhow::Result<()> {
        self.sink
            .on_log("success", &format!("[+] Automation plan finished: {}", plan));
        Ok(())
    }
}
