//! Persisted session record schema.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// One opaque key/value secret captured from a destination.
///
/// Order matters: adapters replay credentials in the order they were
/// captured, so the list is never sorted or deduplicated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
	pub name: String,
	pub value: String,
}

impl Credential {
	pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			value: value.into(),
		}
	}
}

/// Browser-environment viewport observed at capture time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
	pub width: u32,
	pub height: u32,
}

/// Optional environment metadata observed when a session was captured.
///
/// Adapters use this to restore a destination-plausible environment on the
/// next run. Unknown fields round-trip through `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservedContext {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub user_agent: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub viewport: Option<Viewport>,
	#[serde(flatten)]
	pub extra: HashMap<String, serde_json::Value>,
}

/// Captured authentication state for one target.
///
/// Owned exclusively by the [`SessionStore`](super::SessionStore); adapters
/// read records to restore state and produce fresh ones after a successful
/// use, but never persist them themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
	pub credentials: Vec<Credential>,
	pub captured_at: DateTime<Utc>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub observed_context: Option<ObservedContext>,
}

impl SessionRecord {
	/// Creates a record captured now, without environment metadata.
	pub fn new(credentials: Vec<Credential>) -> Self {
		Self {
			credentials,
			captured_at: Utc::now(),
			observed_context: None,
		}
	}

	pub fn with_observed_context(mut self, context: ObservedContext) -> Self {
		self.observed_context = Some(context);
		self
	}

	/// Age of the record relative to now, saturating at zero for records
	/// stamped in the future (clock skew).
	pub fn age(&self) -> Duration {
		(Utc::now() - self.captured_at).max(Duration::zero())
	}
}
