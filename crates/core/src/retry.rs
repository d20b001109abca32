//! Selective retry over a previous batch result.

use tracing::{debug, info};

use crate::content::Content;
use crate::error::Result;
use crate::orchestrator::{AggregateResult, DispatchMode, Orchestrator};

/// Re-issues distribution for previously-failed targets only and merges the
/// fresh outcomes into the prior result.
pub struct RetryCoordinator<'a> {
	orchestrator: &'a Orchestrator,
}

impl<'a> RetryCoordinator<'a> {
	pub fn new(orchestrator: &'a Orchestrator) -> Self {
		Self { orchestrator }
	}

	/// One selective retry round.
	///
	/// Targets that already succeeded are never re-attempted and their
	/// outcomes are never altered; only entries for previously-failed
	/// targets are overwritten (last-write-wins per target). A prior result
	/// with no failures comes back equivalent, with zero adapter calls.
	pub async fn retry_failed(
		&self,
		previous: &AggregateResult,
		content: &Content,
		mode: DispatchMode,
	) -> Result<AggregateResult> {
		let failed = previous.failed_targets();
		if failed.is_empty() {
			info!(target: "crier.retry", "previous result has no failures; nothing to retry");
			return Ok(previous.clone());
		}

		info!(target: "crier.retry", count = failed.len(), "retrying failed targets");
		let fresh = self
			.orchestrator
			.distribute(content, Some(&failed), mode)
			.await?;

		let mut merged = previous.outcomes.clone();
		for (target, outcome) in fresh.outcomes {
			merged.insert(target, outcome);
		}
		Ok(AggregateResult::from_outcomes(merged.into_values()))
	}

	/// Runs up to `retry_attempts` (from config) rounds of
	/// [`retry_failed`](Self::retry_failed), stopping early once no
	/// failures remain.
	pub async fn run(
		&self,
		previous: &AggregateResult,
		content: &Content,
		mode: DispatchMode,
	) -> Result<AggregateResult> {
		let mut current = previous.clone();
		for round in 1..=self.orchestrator.config().retry_attempts {
			if current.failure_count == 0 {
				break;
			}
			debug!(
				target: "crier.retry",
				round,
				remaining = current.failure_count,
				"retry round"
			);
			current = self.retry_failed(&current, content, mode).await?;
		}
		Ok(current)
	}
}
