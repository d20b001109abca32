//! Read-only distribution defaults.
//!
//! The config document lives beside the session store and is consumed
//! read-only here: per-target enabled flags, retry rounds, adapter call
//! timeout, and the sequential-mode pacing delay. A missing file yields
//! defaults; a malformed one is an error rather than a silent fallback.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

const CONFIG_FILE: &str = "config.json";

/// Per-target toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetConfig {
	#[serde(default = "default_enabled")]
	pub enabled: bool,
}

impl Default for TargetConfig {
	fn default() -> Self {
		Self { enabled: true }
	}
}

/// Batch-level defaults consumed by the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionConfig {
	#[serde(default)]
	pub targets: HashMap<String, TargetConfig>,
	/// Retry rounds driven by [`RetryCoordinator::run`](crate::retry::RetryCoordinator::run).
	#[serde(default = "default_retry_attempts")]
	pub retry_attempts: u32,
	/// Ceiling for one adapter submit call.
	#[serde(default = "default_timeout_ms")]
	pub timeout_ms: u64,
	/// Pause between successive calls in sequential mode.
	#[serde(default = "default_rate_limit_delay_ms")]
	pub rate_limit_delay_ms: u64,
}

impl Default for DistributionConfig {
	fn default() -> Self {
		Self {
			targets: HashMap::new(),
			retry_attempts: default_retry_attempts(),
			timeout_ms: default_timeout_ms(),
			rate_limit_delay_ms: default_rate_limit_delay_ms(),
		}
	}
}

impl DistributionConfig {
	/// Loads the document from an explicit path. Missing file means
	/// defaults; unreadable or malformed content is a [`Error::Config`].
	pub fn load(path: &Path) -> Result<Self> {
		let content = match fs::read_to_string(path) {
			Ok(content) => content,
			Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
				debug!(target: "crier.config", path = %path.display(), "no config document; using defaults");
				return Ok(Self::default());
			}
			Err(err) => {
				return Err(Error::Config(format!(
					"failed to read {}: {err}",
					path.display()
				)));
			}
		};
		serde_json::from_str(&content)
			.map_err(|err| Error::Config(format!("malformed {}: {err}", path.display())))
	}

	/// Loads from the fixed per-user location
	/// (`~/.config/crier/config.json` on Linux).
	pub fn load_default() -> Result<Self> {
		let dir = dirs::config_dir()
			.ok_or_else(|| Error::Config("no per-user config directory available".to_string()))?;
		Self::load(&dir.join("crier").join(CONFIG_FILE))
	}

	/// Whether a target is enabled. Targets absent from the document are
	/// enabled by default.
	pub fn is_enabled(&self, target: &str) -> bool {
		self.targets.get(target).is_none_or(|t| t.enabled)
	}
}

fn default_enabled() -> bool {
	true
}

fn default_retry_attempts() -> u32 {
	2
}

fn default_timeout_ms() -> u64 {
	30_000
}

fn default_rate_limit_delay_ms() -> u64 {
	2_000
}
