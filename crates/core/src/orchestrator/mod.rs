//! Distribution orchestration: target resolution, fan-out, aggregation.
//!
//! The orchestrator owns no adapter logic. It resolves which targets to
//! attempt, drives each one through its registered
//! [`PlatformAdapter`](crate::adapter::PlatformAdapter), isolates every
//! per-target failure into that target's outcome, and refreshes session
//! state after successful use.

/// Per-target and batch-level result types.
pub mod outcome;

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};

use crate::adapter::{AdapterRegistry, AuthenticateOptions};
use crate::config::DistributionConfig;
use crate::content::{Content, ValidationReport, validate};
use crate::error::{Error, Result};
use crate::session::{SessionStore, default_max_age};

pub use outcome::{AggregateResult, PostOutcome};

/// How a batch fans out to its targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DispatchMode {
	/// All eligible adapter calls are issued before any is awaited;
	/// completion order is unspecified.
	#[default]
	Concurrent,
	/// Targets are processed one at a time in input order, with a pacing
	/// delay between successive calls to stay under destination-side
	/// anti-automation thresholds.
	Sequential,
}

/// Multi-target distribution orchestrator.
///
/// Constructed with its collaborators injected; no process-wide defaults.
pub struct Orchestrator {
	registry: AdapterRegistry,
	store: Arc<SessionStore>,
	config: DistributionConfig,
}

impl Orchestrator {
	pub fn new(registry: AdapterRegistry, store: Arc<SessionStore>, config: DistributionConfig) -> Self {
		Self {
			registry,
			store,
			config,
		}
	}

	pub fn registry(&self) -> &AdapterRegistry {
		&self.registry
	}

	pub fn store(&self) -> &Arc<SessionStore> {
		&self.store
	}

	pub fn config(&self) -> &DistributionConfig {
		&self.config
	}

	/// Structural content validation, independent of any target.
	pub fn validate(&self, content: &Content) -> ValidationReport {
		validate(content)
	}

	/// Targets that are dispatchable right now: a registered adapter plus a
	/// session within the freshness window.
	pub fn available_targets(&self) -> Vec<String> {
		self.store
			.list_valid(default_max_age())
			.into_iter()
			.filter(|target| self.registry.contains(target))
			.collect()
	}

	/// Drives a target's authentication flow and, when it completes,
	/// captures and stores the fresh session record.
	///
	/// Returns `Ok(false)` when the flow did not produce an authenticated
	/// state (e.g. the interactive login was abandoned).
	pub async fn authenticate(
		&self,
		target: &str,
		options: &AuthenticateOptions,
	) -> Result<bool> {
		let adapter = self
			.registry
			.get(target)
			.ok_or_else(|| Error::UnsupportedTarget(target.to_string()))?;

		if !adapter.authenticate(options).await? {
			warn!(target: "crier.session", target_id = target, "authentication flow did not complete");
			return Ok(false);
		}

		let record = adapter.capture_session().await?;
		self.store.set(target, record)?;
		info!(target: "crier.session", target_id = target, "authentication captured and stored");
		Ok(true)
	}

	/// Resolves the target set for a batch.
	///
	/// An explicit list is honored in order, minus ids with no registered
	/// adapter (each dropped with a warning) and duplicates. Without an
	/// explicit list, resolution falls back to every config-enabled target
	/// holding a valid session. An empty resolution is
	/// [`Error::NoTargetsAvailable`].
	pub fn resolve_targets(&self, explicit: Option<&[String]>) -> Result<Vec<String>> {
		let resolved: Vec<String> = match explicit {
			Some(requested) => {
				let mut seen = std::collections::HashSet::new();
				requested
					.iter()
					.filter(|target| {
						if !self.registry.contains(target.as_str()) {
							warn!(
								target: "crier.distribute",
								target_id = %target,
								"requested target has no registered adapter; dropping"
							);
							return false;
						}
						seen.insert(target.as_str())
					})
					.cloned()
					.collect()
			}
			None => self
				.available_targets()
				.into_iter()
				.filter(|target| {
					let enabled = self.config.is_enabled(target);
					if !enabled {
						debug!(target: "crier.distribute", target_id = %target, "target disabled by config");
					}
					enabled
				})
				.collect(),
		};

		if resolved.is_empty() {
			return Err(Error::NoTargetsAvailable);
		}
		Ok(resolved)
	}

	/// Distributes content to the resolved target set.
	///
	/// Validation failures and empty resolution return before any adapter
	/// is touched. Afterwards every resolved target yields exactly one
	/// outcome; per-target failures never abort the batch. Only a session
	/// store flush failure escapes as an error.
	pub async fn distribute(
		&self,
		content: &Content,
		targets: Option<&[String]>,
		mode: DispatchMode,
	) -> Result<AggregateResult> {
		let report = self.validate(content);
		if !report.valid {
			return Err(Error::Validation(report.errors));
		}

		let targets = self.resolve_targets(targets)?;
		info!(
			target: "crier.distribute",
			count = targets.len(),
			mode = ?mode,
			kind = ?content.kind(),
			"distributing content"
		);

		let outcomes = match mode {
			DispatchMode::Concurrent => {
				join_all(targets.iter().map(|target| self.attempt(target, content))).await
			}
			DispatchMode::Sequential => {
				let delay = Duration::from_millis(self.config.rate_limit_delay_ms);
				let mut outcomes = Vec::with_capacity(targets.len());
				for (index, target) in targets.iter().enumerate() {
					if index > 0 && !delay.is_zero() {
						sleep(delay).await;
					}
					outcomes.push(self.attempt(target, content).await);
				}
				outcomes
			}
		};

		self.refresh_sessions(&outcomes).await?;

		let result = AggregateResult::from_outcomes(outcomes);
		info!(
			target: "crier.distribute",
			succeeded = result.success_count,
			failed = result.failure_count,
			overall = result.overall_success,
			"batch settled"
		);
		Ok(result)
	}

	/// Drives one target through its adapter, folding every failure into
	/// the returned outcome.
	async fn attempt(&self, target: &str, content: &Content) -> PostOutcome {
		let Some(adapter) = self.registry.get(target) else {
			// Resolution drops unregistered ids before dispatch.
			return PostOutcome::failed(target, format!("no registered adapter for '{target}'"));
		};

		match adapter.is_authenticated().await {
			Ok(true) => {}
			Ok(false) => {
				debug!(target: "crier.distribute", target_id = target, "not authenticated; skipping submit");
				return PostOutcome::failed(
					target,
					Error::AuthenticationRequired(target.to_string()).to_string(),
				);
			}
			Err(err) => return PostOutcome::failed(target, err.to_string()),
		}

		let ceiling = Duration::from_millis(self.config.timeout_ms);
		match timeout(ceiling, adapter.submit(content)).await {
			Ok(Ok(receipt)) => {
				debug!(
					target: "crier.distribute",
					target_id = target,
					remote_id = receipt.remote_id.as_deref().unwrap_or("-"),
					"submit succeeded"
				);
				PostOutcome::succeeded(target, receipt.remote_id)
			}
			Ok(Err(err)) => PostOutcome::failed(target, err.to_string()),
			Err(_) => PostOutcome::failed(
				target,
				format!("submit timed out after {}ms", self.config.timeout_ms),
			),
		}
	}

	/// Captures and persists a fresh session record for every successful
	/// target, extending freshness as a side effect of successful use.
	///
	/// Store writes happen here, after the batch settles, so the
	/// whole-document rewrites are naturally serialized. A capture failure
	/// is destination trouble and only logs; a flush failure is
	/// infrastructure trouble and propagates.
	async fn refresh_sessions(&self, outcomes: &[PostOutcome]) -> Result<()> {
		for outcome in outcomes.iter().filter(|o| o.success) {
			let Some(adapter) = self.registry.get(&outcome.target) else {
				continue;
			};
			match adapter.capture_session().await {
				Ok(record) => self.store.set(&outcome.target, record)?,
				Err(err) => warn!(
					target: "crier.session",
					target_id = %outcome.target,
					error = %err,
					"session capture failed after successful submit"
				),
			}
		}
		Ok(())
	}
}
