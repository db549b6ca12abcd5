pub mod recorded;

use crate::core::Alert;

/// Handle onto the host scan engine, borrowed for the duration of each hook
/// call.
///
/// The surface is exactly the operations the hooks use: five option setters
/// and two read-only queries. Mutations and queries are fallible; a failure
/// from the engine propagates to the host unhandled.
pub trait ScanEngine {
    /// Per-request timeout for all engine traffic.
    fn set_timeout_in_secs(&mut self, secs: u64) -> anyhow::Result<()>;

    /// Fold all cookies into a single Cookie request header.
    fn set_single_cookie_request_header(&mut self, enabled: bool) -> anyhow::Result<()>;

    /// Upper bound on a single active-scan run.
    fn set_max_scan_duration_in_mins(&mut self, mins: u64) -> anyhow::Result<()>;

    /// Concurrent attack threads per scanned host.
    fn set_threads_per_host(&mut self, threads: u32) -> anyhow::Result<()>;

    /// Pause between consecutive attack requests.
    fn set_delay_in_ms(&mut self, millis: u64) -> anyhow::Result<()>;

    /// URLs discovered by the spider so far. Empty when the spider found
    /// nothing or has not run.
    fn spider_results(&self) -> anyhow::Result<Vec<String>>;

    /// All alerts raised so far, in the order the engine recorded them.
    fn alerts(&self) -> anyhow::Result<Vec<Alert>>;
}
