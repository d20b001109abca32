//! Selective retry semantics: failed targets only, successes untouched.

use std::sync::Arc;

use crier::{
	AdapterRegistry, Content, DispatchMode, DistributionConfig, Orchestrator, RetryCoordinator,
	SessionStore,
};
use crier_adapter_mock::MockAdapter;
use tempfile::TempDir;

fn orchestrator_with(
	dir: &TempDir,
	adapters: Vec<Arc<MockAdapter>>,
	retry_attempts: u32,
) -> Orchestrator {
	let mut registry = AdapterRegistry::new();
	for adapter in adapters {
		registry.register(adapter);
	}
	let store = Arc::new(SessionStore::open(dir.path().join("sessions.json")));
	let config = DistributionConfig {
		rate_limit_delay_ms: 0,
		timeout_ms: 1_000,
		retry_attempts,
		..Default::default()
	};
	Orchestrator::new(registry, store, config)
}

fn targets(ids: &[&str]) -> Vec<String> {
	ids.iter().map(|id| id.to_string()).collect()
}

#[tokio::test]
async fn retry_with_no_failures_is_a_no_op() {
	let dir = TempDir::new().unwrap();
	let a = Arc::new(MockAdapter::succeeding("a", "1"));
	let orchestrator = orchestrator_with(&dir, vec![a.clone()], 2);
	let content = Content::text("hi");

	let first = orchestrator
		.distribute(&content, Some(&targets(&["a"])), DispatchMode::Concurrent)
		.await
		.unwrap();
	assert_eq!(a.submit_count(), 1);

	let retried = RetryCoordinator::new(&orchestrator)
		.retry_failed(&first, &content, DispatchMode::Concurrent)
		.await
		.unwrap();

	assert_eq!(retried, first);
	assert_eq!(a.submit_count(), 1, "no adapter calls on all-success retry");
}

#[tokio::test]
async fn retry_reattempts_only_failed_targets() {
	let dir = TempDir::new().unwrap();
	let a = Arc::new(MockAdapter::succeeding("a", "42"));
	let b = Arc::new(MockAdapter::flaky("b", 1, "77"));
	let orchestrator = orchestrator_with(&dir, vec![a.clone(), b.clone()], 2);
	let content = Content::text("hi");

	let first = orchestrator
		.distribute(&content, Some(&targets(&["a", "b"])), DispatchMode::Concurrent)
		.await
		.unwrap();
	assert!(first.outcomes["a"].success);
	assert!(!first.outcomes["b"].success);

	let retried = RetryCoordinator::new(&orchestrator)
		.retry_failed(&first, &content, DispatchMode::Concurrent)
		.await
		.unwrap();

	assert_eq!(a.submit_count(), 1, "already-successful target not re-attempted");
	assert_eq!(b.submit_count(), 2);
	assert!(retried.outcomes["b"].success);
	assert_eq!(retried.outcomes["b"].remote_id.as_deref(), Some("77"));
	assert_eq!(retried.success_count, 2);
	assert_eq!(retried.failure_count, 0);
}

#[tokio::test]
async fn successful_outcomes_are_never_altered_by_retry() {
	let dir = TempDir::new().unwrap();
	let a = Arc::new(MockAdapter::succeeding("a", "42"));
	let b = Arc::new(MockAdapter::failing("b", "network down"));
	let orchestrator = orchestrator_with(&dir, vec![a, b], 2);
	let content = Content::text("hi");

	let first = orchestrator
		.distribute(&content, Some(&targets(&["a", "b"])), DispatchMode::Concurrent)
		.await
		.unwrap();
	let original_a = first.outcomes["a"].clone();

	let retried = RetryCoordinator::new(&orchestrator)
		.retry_failed(&first, &content, DispatchMode::Concurrent)
		.await
		.unwrap();

	// Identical including timestamp: the entry was carried over, not rebuilt.
	assert_eq!(retried.outcomes["a"], original_a);
	assert!(!retried.outcomes["b"].success);
}

#[tokio::test]
async fn run_drives_rounds_until_success_or_exhaustion() {
	let dir = TempDir::new().unwrap();
	let flaky = Arc::new(MockAdapter::flaky("f", 2, "done"));
	let orchestrator = orchestrator_with(&dir, vec![flaky.clone()], 3);
	let content = Content::text("hi");

	let first = orchestrator
		.distribute(&content, Some(&targets(&["f"])), DispatchMode::Concurrent)
		.await
		.unwrap();
	assert!(!first.overall_success);

	let settled = RetryCoordinator::new(&orchestrator)
		.run(&first, &content, DispatchMode::Concurrent)
		.await
		.unwrap();

	assert!(settled.overall_success);
	// Initial attempt, one failed round, one successful round; the third
	// permitted round is skipped because nothing is left to retry.
	assert_eq!(flaky.submit_count(), 3);
}

#[tokio::test]
async fn run_stops_at_configured_attempts_when_target_keeps_failing() {
	let dir = TempDir::new().unwrap();
	let b = Arc::new(MockAdapter::failing("b", "network down"));
	let orchestrator = orchestrator_with(&dir, vec![b.clone()], 2);
	let content = Content::text("hi");

	let first = orchestrator
		.distribute(&content, Some(&targets(&["b"])), DispatchMode::Concurrent)
		.await
		.unwrap();

	let settled = RetryCoordinator::new(&orchestrator)
		.run(&first, &content, DispatchMode::Concurrent)
		.await
		.unwrap();

	assert!(!settled.overall_success);
	assert_eq!(settled.outcomes["b"].error.as_deref(), Some("network down"));
	assert_eq!(b.submit_count(), 3, "initial attempt plus two retry rounds");
}
