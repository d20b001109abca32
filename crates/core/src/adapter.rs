//! Platform adapter contract and registry.
//!
//! Each external destination is reached through one adapter implementing
//! [`PlatformAdapter`]. The orchestrator calls only through this trait and
//! never special-cases a concrete target; adapters are looked up in an
//! [`AdapterRegistry`] populated explicitly at startup.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::content::{Content, ContentKind};
use crate::error::Result;
use crate::session::SessionRecord;

/// Options for an interactive authentication flow.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticateOptions {
	/// Whether the adapter may block on an external interactive flow
	/// (e.g. a visible login page) rather than failing fast.
	#[serde(default)]
	pub interactive: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub timeout_ms: Option<u64>,
}

/// Receipt returned by a successful submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitReceipt {
	/// Destination-assigned identifier for the created post, when known.
	pub remote_id: Option<String>,
}

impl SubmitReceipt {
	pub fn with_remote_id(remote_id: impl Into<String>) -> Self {
		Self {
			remote_id: Some(remote_id.into()),
		}
	}
}

/// Size ceilings a destination enforces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityLimits {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub max_text_chars: Option<usize>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub max_media_bytes: Option<u64>,
}

/// What one destination accepts, declared by its adapter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
	pub supported_kinds: Vec<ContentKind>,
	#[serde(default)]
	pub limits: CapabilityLimits,
	#[serde(default)]
	pub required_fields: Vec<String>,
}

impl Capabilities {
	pub fn supports(&self, kind: ContentKind) -> bool {
		self.supported_kinds.contains(&kind)
	}
}

/// Contract every destination adapter implements.
///
/// `submit` validates content against the adapter's own declared
/// capabilities and returns expected domain failures as `Err`; the
/// orchestrator converts any `Err` into that target's failed outcome and
/// never lets it abort the batch.
#[async_trait]
pub trait PlatformAdapter: Send + Sync {
	/// The target id this adapter serves.
	fn id(&self) -> &str;

	/// Whether a usable authenticated state is currently available.
	async fn is_authenticated(&self) -> Result<bool>;

	/// Establishes fresh authentication. May block on an external
	/// interactive flow; no timing guarantees.
	async fn authenticate(&self, options: &AuthenticateOptions) -> Result<bool>;

	/// Submits content to the destination.
	async fn submit(&self, content: &Content) -> Result<SubmitReceipt>;

	/// Captures a fresh session snapshot after a successful use. The store
	/// persists it; adapters never write the document themselves.
	async fn capture_session(&self) -> Result<SessionRecord>;

	fn describe_capabilities(&self) -> Capabilities;
}

/// Lookup table from target id to adapter, populated at startup.
#[derive(Clone, Default)]
pub struct AdapterRegistry {
	adapters: HashMap<String, Arc<dyn PlatformAdapter>>,
}

impl AdapterRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers an adapter under its own id, replacing any previous
	/// registration for that id.
	pub fn register(&mut self, adapter: Arc<dyn PlatformAdapter>) {
		self.adapters.insert(adapter.id().to_string(), adapter);
	}

	pub fn get(&self, target: &str) -> Option<Arc<dyn PlatformAdapter>> {
		self.adapters.get(target).cloned()
	}

	pub fn contains(&self, target: &str) -> bool {
		self.adapters.contains_key(target)
	}

	/// Registered target ids, sorted.
	pub fn ids(&self) -> Vec<String> {
		let mut ids: Vec<String> = self.adapters.keys().cloned().collect();
		ids.sort();
		ids
	}

	pub fn len(&self) -> usize {
		self.adapters.len()
	}

	pub fn is_empty(&self) -> bool {
		self.adapters.is_empty()
	}
}

impl std::fmt::Debug for AdapterRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("AdapterRegistry").field("ids", &self.ids()).finish()
	}
}
