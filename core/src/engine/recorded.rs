use std::fs;

use anyhow::Context;

use crate::core::Alert;
use crate::engine::ScanEngine;
use crate::utils::read_lines;

/// One configuration mutation received by a [`RecordedEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionCall {
    TimeoutInSecs(u64),
    SingleCookieRequestHeader(bool),
    MaxScanDurationInMins(u64),
    ThreadsPerHost(u32),
    DelayInMs(u64),
}

/// In-memory engine handle backed by fixture data.
///
/// Answers spider and alert queries from preloaded values and records every
/// option call it receives. Used by the replay CLI and the test suite in
/// place of a live engine.
#[derive(Debug, Default)]
pub struct RecordedEngine {
    spider_urls: Vec<String>,
    alert_list: Vec<Alert>,
    calls: Vec<OptionCall>,
}

impl RecordedEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_spider_urls(mut self, urls: Vec<String>) -> Self {
        self.spider_urls = urls;
        self
    }

    pub fn with_alerts(mut self, alerts: Vec<Alert>) -> Self {
        self.alert_list = alerts;
        self
    }

    /// Loads fixtures from disk: a JSON array of alerts and a plain list of
    /// spider URLs, one per line. Either path may be absent.
    pub fn from_files(alerts_path: Option<&str>, spider_path: Option<&str>) -> anyhow::Result<Self> {
        let mut engine = Self::new();

        if let Some(path) = alerts_path {
            let data = fs::read_to_string(path)
                .with_context(|| format!("failed to read alerts fixture '{}'", path))?;
            engine.alert_list = serde_json::from_str(&data)
                .with_context(|| format!("invalid alerts fixture '{}'", path))?;
        }

        if let Some(path) = spider_path {
            engine.spider_urls = read_lines(path)
                .with_context(|| format!("failed to read spider fixture '{}'", path))?;
        }

        Ok(engine)
    }

    /// Option calls received so far, in call order.
    pub fn recorded_calls(&self) -> &[OptionCall] {
        &self.calls
    }
}

impl ScanEngine for RecordedEngine {
    fn set_timeout_in_secs(&mut self, secs: u64) -> anyhow::Result<()> {
        self.calls.push(OptionCall::TimeoutInSecs(secs));
        Ok(())
    }

    fn set_single_cookie_request_header(&mut self, enabled: bool) -> anyhow::Result<()> {
        self.calls.push(OptionCall::SingleCookieRequestHeader(enabled));
        Ok(())
    }

    fn set_max_scan_duration_in_mins(&mut self, mins: u64) -> anyhow::Result<()> {
        self.calls.push(OptionCall::MaxScanDurationInMins(mins));
        Ok(())
    }

    fn set_threads_per_host(&mut self, threads: u32) -> anyhow::Result<()> {
        self.calls.push(OptionCall::ThreadsPerHost(threads));
        Ok(())
    }

    fn set_delay_in_ms(&mut self, millis: u64) -> anyhow::Result<()> {
        self.calls.push(OptionCall::DelayInMs(millis));
        Ok(())
    }

    fn spider_results(&self) -> anyhow::Result<Vec<String>> {
        Ok(self.spider_urls.clone())
    }

    fn alerts(&self) -> anyhow::Result<Vec<Alert>> {
        Ok(self.alert_list.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_records_option_calls_in_order() {
        let mut engine = RecordedEngine::new();
        engine.set_timeout_in_secs(30).unwrap();
        engine.set_threads_per_host(2).unwrap();
        assert_eq!(
            engine.recorded_calls(),
            &[OptionCall::TimeoutInSecs(30), OptionCall::ThreadsPerHost(2)]
        );
    }

    #[test]
    fn test_from_files_loads_alerts_and_spider_fixtures() {
        let mut alerts = NamedTempFile::new().unwrap();
        write!(
            alerts,
            r#"[{{"name":"SQLi","url":"/a","risk":"High"}}]"#
        )
        .unwrap();

        let mut spider = NamedTempFile::new().unwrap();
        writeln!(spider, "http://example.com/").unwrap();
        writeln!(spider, "http://example.com/login").unwrap();

        let engine = RecordedEngine::from_files(
            Some(alerts.path().to_str().unwrap()),
            Some(spider.path().to_str().unwrap()),
        )
        .unwrap();

        assert_eq!(engine.alerts().unwrap().len(), 1);
        assert_eq!(engine.spider_results().unwrap().len(), 2);
    }

    #[test]
    fn test_from_files_with_no_paths_is_empty() {
        let engine = RecordedEngine::from_files(None, None).unwrap();
        assert!(engine.alerts().unwrap().is_empty());
        assert!(engine.spider_results().unwrap().is_empty());
    }

    #[test]
    fn test_from_files_rejects_malformed_alerts_json() {
        let mut alerts = NamedTempFile::new().unwrap();
        write!(alerts, "not json").unwrap();

        let result = RecordedEngine::from_files(Some(alerts.path().to_str().unwrap()), None);
        assert!(result.is_err());
    }
}
