//! Configuration system for the dashboard.
//!
//! This module defines the configuration structures used to parameterize the dashboard.
//! It provides:
//! 1. **Defaults:** Baseline link endpoint, timeouts, refresh policy, and memory layout.
//! 2. **Structures:** Hierarchical config for the link, the refresh loop, and the layout.
//! 3. **Loading:** JSON deserialization from a string or a file, followed by validation.
//!
//! Every field is optional in JSON; missing fields fall back to `defaults`.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::common::{DashboardError, Result};

/// Default configuration constants for the dashboard.
mod defaults {
    /// Simulator endpoint (host:port).
    pub const ADDRESS: &str = "127.0.0.1:8080";

    /// Connection establishment timeout in milliseconds.
    pub const CONNECT_TIMEOUT_MS: u64 = 2_000;

    /// Per-request read/write timeout in milliseconds.
    ///
    /// Not applied to `run`, which may simulate an unbounded number of cycles.
    pub const IO_TIMEOUT_MS: u64 = 5_000;

    /// Longest accepted reply line in bytes.
    pub const MAX_REPLY_BYTES: u64 = 16 * 1024 * 1024;

    /// Additional snapshot fetch attempts after a transport failure.
    pub const FETCH_RETRIES: u32 = 2;

    /// Maximum number of actions waiting behind the one in flight.
    pub const QUEUE_DEPTH: usize = 8;

    /// Addressable bytes covered by one memory block row label step.
    pub const BLOCK_STRIDE: u64 = 64;

    /// Addressable bytes per word slot.
    pub const WORD_STRIDE: u64 = 4;

    /// Upper bound for either stride; keeps every label within `u64`.
    pub const MAX_STRIDE: u64 = 0xffff_ffff;

    /// Stage labels of the reference five-stage pipeline.
    pub const STAGE_NAMES: [&str; 5] = ["Fetch", "Decode", "Execute", "Memory", "Writeback"];
}

/// Root configuration structure containing all dashboard settings.
///
/// # Examples
///
/// ```
/// use pipedash_core::config::DashboardConfig;
///
/// let json = r#"{
///     "link": { "address": "10.0.0.2:9000" },
///     "refresh": { "tick_ms": 250 },
///     "layout": { "display_line": 4 }
/// }"#;
///
/// let config = DashboardConfig::from_json_str(json).unwrap();
/// assert_eq!(config.link.address, "10.0.0.2:9000");
/// assert_eq!(config.refresh.tick_ms, Some(250));
/// assert_eq!(config.layout.block_stride, 64);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Simulator connection settings
    pub link: LinkConfig,
    /// Refresh loop and retry policy
    pub refresh: RefreshConfig,
    /// Memory and pipeline layout
    pub layout: LayoutConfig,
}

impl DashboardConfig {
    /// Parses and validates a configuration from JSON text.
    ///
    /// # Arguments
    ///
    /// * `json` - JSON document; absent fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Config`] if the JSON is malformed or fails validation.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| DashboardError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a configuration file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Config`] if the file cannot be read or is invalid.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| DashboardError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }

    /// Checks cross-field constraints that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Config`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.link.address.trim().is_empty() {
            return Err(DashboardError::Config("link.address is empty".into()));
        }
        // Zero durations are rejected by the socket API.
        if self.link.connect_timeout_ms == 0 || self.link.io_timeout_ms == Some(0) {
            return Err(DashboardError::Config("link timeouts must be > 0".into()));
        }
        if self.link.max_reply_bytes == 0 {
            return Err(DashboardError::Config("link.max_reply_bytes must be > 0".into()));
        }
        if self.refresh.queue_depth == 0 {
            return Err(DashboardError::Config("refresh.queue_depth must be > 0".into()));
        }
        if self.refresh.tick_ms == Some(0) {
            return Err(DashboardError::Config("refresh.tick_ms must be > 0".into()));
        }
        let strides = 1..=defaults::MAX_STRIDE;
        if !strides.contains(&self.layout.block_stride)
            || !strides.contains(&self.layout.word_stride)
        {
            return Err(DashboardError::Config(format!(
                "layout strides must be between 1 and {}",
                defaults::MAX_STRIDE
            )));
        }
        Ok(())
    }
}

/// Simulator connection settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Simulator endpoint as `host:port`
    pub address: String,
    /// Connection establishment timeout in milliseconds
    pub connect_timeout_ms: u64,
    /// Per-request I/O timeout in milliseconds (`null` disables it)
    pub io_timeout_ms: Option<u64>,
    /// Longest accepted reply line in bytes; a longer reply drops the connection
    pub max_reply_bytes: u64,
}

impl LinkConfig {
    /// Returns the connect timeout as a `Duration`.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    /// Returns the I/O timeout as a `Duration`, if enabled.
    pub fn io_timeout(&self) -> Option<Duration> {
        self.io_timeout_ms.map(Duration::from_millis)
    }
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            address: defaults::ADDRESS.to_string(),
            connect_timeout_ms: defaults::CONNECT_TIMEOUT_MS,
            io_timeout_ms: Some(defaults::IO_TIMEOUT_MS),
            max_reply_bytes: defaults::MAX_REPLY_BYTES,
        }
    }
}

/// Refresh loop and retry policy.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// Periodic status refresh interval in milliseconds; `None` disables the tick
    pub tick_ms: Option<u64>,
    /// Additional snapshot fetch attempts after a transport failure
    pub fetch_retries: u32,
    /// Maximum number of queued actions
    pub queue_depth: usize,
}

impl RefreshConfig {
    /// Returns the tick interval as a `Duration`, if enabled.
    pub fn tick_interval(&self) -> Option<Duration> {
        self.tick_ms.map(Duration::from_millis)
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            tick_ms: None,
            fetch_retries: defaults::FETCH_RETRIES,
            queue_depth: defaults::QUEUE_DEPTH,
        }
    }
}

/// Memory grid and pipeline layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Address step between displayed memory rows
    pub block_stride: u64,
    /// Address step between word columns
    pub word_stride: u64,
    /// Initial memory display line requested with each snapshot
    pub display_line: u32,
    /// Stage labels, used when their count matches the pipeline length
    pub stage_names: Vec<String>,
}

impl LayoutConfig {
    /// Returns the label for stage `idx` of a pipeline with `len` stages.
    ///
    /// Falls back to `Stage {idx}` when the configured names do not cover the pipeline.
    pub fn stage_label(&self, idx: usize, len: usize) -> String {
        if self.stage_names.len() == len
            && let Some(name) = self.stage_names.get(idx)
        {
            return name.clone();
        }
        format!("Stage {idx}")
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            block_stride: defaults::BLOCK_STRIDE,
            word_stride: defaults::WORD_STRIDE,
            display_line: 0,
            stage_names: defaults::STAGE_NAMES.iter().map(ToString::to_string).collect(),
        }
    }
}
