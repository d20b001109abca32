//! Error taxonomy for the distribution core.
//!
//! Per-target troubles (missing auth, adapter failures, timeouts) never
//! surface here during a batch; they are folded into that target's
//! [`PostOutcome`](crate::orchestrator::PostOutcome). Only pre-flight
//! validation, empty target resolution, and store-level persistence
//! failures escape as batch-level errors.

use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
	/// Content failed structural validation; nothing was attempted.
	#[error("content failed validation: {}", .0.join("; "))]
	Validation(Vec<String>),

	/// A target has no valid session. During a batch this lands in that
	/// target's outcome rather than escaping; the target id rides along for
	/// callers handling it directly.
	#[error("authentication required")]
	AuthenticationRequired(String),

	/// An adapter call failed. The message is the adapter's own, verbatim.
	#[error("{message}")]
	Adapter {
		target: String,
		message: String,
	},

	/// The session or config store could not be flushed to disk.
	#[error("failed to persist {}: {source}", path.display())]
	Persistence {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// The store document could not be serialized.
	#[error("could not serialize store document: {0}")]
	Serialize(#[from] serde_json::Error),

	/// An explicitly requested target has no registered adapter.
	#[error("target '{0}' has no registered adapter")]
	UnsupportedTarget(String),

	/// Target resolution produced an empty set.
	#[error("no target has a registered adapter and a valid session")]
	NoTargetsAvailable,

	/// The config document is unreadable or malformed.
	#[error("invalid config: {0}")]
	Config(String),
}

impl Error {
	/// Builds an adapter error carrying the destination's message verbatim.
	pub fn adapter(target: impl Into<String>, message: impl Into<String>) -> Self {
		Self::Adapter {
			target: target.into(),
			message: message.into(),
		}
	}
}
