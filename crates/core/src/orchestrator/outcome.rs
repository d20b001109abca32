//! Per-target and batch-level distribution results.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of one distribution attempt against one target.
///
/// Exactly one outcome is produced per target per attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostOutcome {
	pub target: String,
	pub success: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub remote_id: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
	pub timestamp: DateTime<Utc>,
}

impl PostOutcome {
	pub fn succeeded(target: impl Into<String>, remote_id: Option<String>) -> Self {
		Self {
			target: target.into(),
			success: true,
			remote_id,
			error: None,
			timestamp: Utc::now(),
		}
	}

	pub fn failed(target: impl Into<String>, error: impl Into<String>) -> Self {
		Self {
			target: target.into(),
			success: false,
			remote_id: None,
			error: Some(error.into()),
			timestamp: Utc::now(),
		}
	}
}

/// Batch-level summary across all attempted targets.
///
/// `overall_success` follows at-least-one-success semantics, never
/// all-or-nothing, and is always derived from the outcome map rather than
/// stored independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResult {
	pub outcomes: HashMap<String, PostOutcome>,
	pub success_count: usize,
	pub failure_count: usize,
	pub overall_success: bool,
}

impl AggregateResult {
	/// Builds a result from outcomes, computing the counts. Later outcomes
	/// for the same target win.
	pub fn from_outcomes(outcomes: impl IntoIterator<Item = PostOutcome>) -> Self {
		let outcomes: HashMap<String, PostOutcome> = outcomes
			.into_iter()
			.map(|outcome| (outcome.target.clone(), outcome))
			.collect();
		let success_count = outcomes.values().filter(|o| o.success).count();
		let failure_count = outcomes.len() - success_count;
		Self {
			success_count,
			failure_count,
			overall_success: success_count > 0,
			outcomes,
		}
	}

	/// Targets whose outcome was a failure, sorted.
	pub fn failed_targets(&self) -> Vec<String> {
		let mut targets: Vec<String> = self
			.outcomes
			.values()
			.filter(|o| !o.success)
			.map(|o| o.target.clone())
			.collect();
		targets.sort();
		targets
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn zero_successes_means_overall_failure() {
		let result = AggregateResult::from_outcomes([
			PostOutcome::failed("a", "nope"),
			PostOutcome::failed("b", "still no"),
		]);
		assert_eq!(result.success_count, 0);
		assert_eq!(result.failure_count, 2);
		assert!(!result.overall_success);
	}

	#[test]
	fn one_success_among_many_failures_is_overall_success() {
		let mut outcomes = vec![PostOutcome::succeeded("win", Some("1".to_string()))];
		for i in 0..5 {
			outcomes.push(PostOutcome::failed(format!("lose{i}"), "err"));
		}
		let result = AggregateResult::from_outcomes(outcomes);
		assert_eq!(result.success_count, 1);
		assert_eq!(result.failure_count, 5);
		assert!(result.overall_success);
	}

	#[test]
	fn empty_batch_is_not_a_success() {
		let result = AggregateResult::from_outcomes([]);
		assert!(!result.overall_success);
		assert_eq!(result.failure_count, 0);
	}

	#[test]
	fn failed_targets_are_sorted() {
		let result = AggregateResult::from_outcomes([
			PostOutcome::failed("zeta", "x"),
			PostOutcome::succeeded("mid", None),
			PostOutcome::failed("alpha", "y"),
		]);
		assert_eq!(result.failed_targets(), vec!["alpha", "zeta"]);
	}

	#[test]
	fn later_outcome_for_same_target_wins() {
		let result = AggregateResult::from_outcomes([
			PostOutcome::failed("a", "first try"),
			PostOutcome::succeeded("a", Some("2".to_string())),
		]);
		assert_eq!(result.outcomes.len(), 1);
		assert!(result.outcomes["a"].success);
	}
}
