//! Scriptable in-memory platform adapter for exercising distribution flows.
//!
//! `MockAdapter` implements the full [`PlatformAdapter`] contract with
//! behavior fixed at construction: succeed with a remote id, fail with a
//! message, fail a set number of times before succeeding, or report itself
//! unauthenticated. Every call is recorded so tests can assert on counts
//! and, through a shared journal, on cross-adapter ordering.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crier::{
	AuthenticateOptions, Capabilities, CapabilityLimits, Content, ContentKind, Credential, Error,
	PlatformAdapter, Result, SessionRecord, SubmitReceipt,
};

/// One recorded call against a mock adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockCall {
	IsAuthenticated,
	Authenticate,
	Submit,
	CaptureSession,
}

/// Cross-adapter submit journal for ordering assertions.
pub type Journal = Arc<Mutex<Vec<String>>>;

pub fn journal() -> Journal {
	Arc::new(Mutex::new(Vec::new()))
}

enum SubmitBehavior {
	Succeed { remote_id: Option<String> },
	Fail { message: String },
	FlakyThenSucceed { failures_left: u32, remote_id: String },
}

/// Scriptable adapter standing in for one destination.
pub struct MockAdapter {
	id: String,
	authenticated: Mutex<bool>,
	auth_check_error: Option<String>,
	capture_error: Option<String>,
	behavior: Mutex<SubmitBehavior>,
	latency: Option<Duration>,
	journal: Option<Journal>,
	calls: Mutex<Vec<MockCall>>,
}

impl MockAdapter {
	fn with_behavior(id: &str, behavior: SubmitBehavior) -> Self {
		Self {
			id: id.to_string(),
			authenticated: Mutex::new(true),
			auth_check_error: None,
			capture_error: None,
			behavior: Mutex::new(behavior),
			latency: None,
			journal: None,
			calls: Mutex::new(Vec::new()),
		}
	}

	/// An authenticated adapter whose every submit succeeds.
	pub fn succeeding(id: &str, remote_id: &str) -> Self {
		Self::with_behavior(
			id,
			SubmitBehavior::Succeed {
				remote_id: Some(remote_id.to_string()),
			},
		)
	}

	/// An authenticated adapter whose every submit fails with `message`.
	pub fn failing(id: &str, message: &str) -> Self {
		Self::with_behavior(
			id,
			SubmitBehavior::Fail {
				message: message.to_string(),
			},
		)
	}

	/// Fails `failures` submits, then succeeds with `remote_id`.
	pub fn flaky(id: &str, failures: u32, remote_id: &str) -> Self {
		Self::with_behavior(
			id,
			SubmitBehavior::FlakyThenSucceed {
				failures_left: failures,
				remote_id: remote_id.to_string(),
			},
		)
	}

	/// An adapter with no usable authentication state.
	pub fn unauthenticated(id: &str) -> Self {
		let adapter = Self::succeeding(id, "unused");
		*adapter.authenticated.lock() = false;
		adapter
	}

	/// Makes `is_authenticated` itself return an error.
	pub fn with_auth_check_error(mut self, message: &str) -> Self {
		self.auth_check_error = Some(message.to_string());
		self
	}

	/// Makes `capture_session` return an error.
	pub fn with_capture_error(mut self, message: &str) -> Self {
		self.capture_error = Some(message.to_string());
		self
	}

	/// Adds artificial latency to every submit.
	pub fn with_latency(mut self, latency: Duration) -> Self {
		self.latency = Some(latency);
		self
	}

	/// Records each submit's adapter id into a shared journal.
	pub fn with_journal(mut self, journal: Journal) -> Self {
		self.journal = Some(journal);
		self
	}

	pub fn set_authenticated(&self, authenticated: bool) {
		*self.authenticated.lock() = authenticated;
	}

	pub fn calls(&self) -> Vec<MockCall> {
		self.calls.lock().clone()
	}

	pub fn submit_count(&self) -> usize {
		self.calls
			.lock()
			.iter()
			.filter(|call| **call == MockCall::Submit)
			.count()
	}

	pub fn capture_count(&self) -> usize {
		self.calls
			.lock()
			.iter()
			.filter(|call| **call == MockCall::CaptureSession)
			.count()
	}

	fn record(&self, call: MockCall) {
		self.calls.lock().push(call);
	}
}

#[async_trait]
impl PlatformAdapter for MockAdapter {
	fn id(&self) -> &str {
		&self.id
	}

	async fn is_authenticated(&self) -> Result<bool> {
		self.record(MockCall::IsAuthenticated);
		if let Some(message) = &self.auth_check_error {
			return Err(Error::adapter(&self.id, message));
		}
		Ok(*self.authenticated.lock())
	}

	async fn authenticate(&self, _options: &AuthenticateOptions) -> Result<bool> {
		self.record(MockCall::Authenticate);
		*self.authenticated.lock() = true;
		Ok(true)
	}

	async fn submit(&self, _content: &Content) -> Result<SubmitReceipt> {
		self.record(MockCall::Submit);
		if let Some(journal) = &self.journal {
			journal.lock().push(self.id.clone());
		}
		if let Some(latency) = self.latency {
			tokio::time::sleep(latency).await;
		}
		let mut behavior = self.behavior.lock();
		match &mut *behavior {
			SubmitBehavior::Succeed { remote_id } => Ok(SubmitReceipt {
				remote_id: remote_id.clone(),
			}),
			SubmitBehavior::Fail { message } => Err(Error::adapter(&self.id, message.clone())),
			SubmitBehavior::FlakyThenSucceed {
				failures_left,
				remote_id,
			} => {
				if *failures_left > 0 {
					*failures_left -= 1;
					Err(Error::adapter(&self.id, "transient failure"))
				} else {
					Ok(SubmitReceipt::with_remote_id(remote_id.clone()))
				}
			}
		}
	}

	async fn capture_session(&self) -> Result<SessionRecord> {
		self.record(MockCall::CaptureSession);
		if let Some(message) = &self.capture_error {
			return Err(Error::adapter(&self.id, message));
		}
		Ok(SessionRecord::new(vec![Credential::new(
			"session_cookie",
			format!("{}-fresh", self.id),
		)]))
	}

	fn describe_capabilities(&self) -> Capabilities {
		Capabilities {
			supported_kinds: vec![
				ContentKind::Text,
				ContentKind::Link,
				ContentKind::Media,
				ContentKind::MediaLink,
			],
			limits: CapabilityLimits {
				max_text_chars: Some(5000),
				max_media_bytes: None,
			},
			required_fields: Vec::new(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn flaky_adapter_fails_then_succeeds() {
		let adapter = MockAdapter::flaky("a", 2, "99");
		let content = Content::text("hi");
		assert!(adapter.submit(&content).await.is_err());
		assert!(adapter.submit(&content).await.is_err());
		let receipt = adapter.submit(&content).await.unwrap();
		assert_eq!(receipt.remote_id.as_deref(), Some("99"));
		assert_eq!(adapter.submit_count(), 3);
	}

	#[tokio::test]
	async fn unauthenticated_adapter_reports_false_until_authenticate() {
		let adapter = MockAdapter::unauthenticated("a");
		assert!(!adapter.is_authenticated().await.unwrap());
		adapter
			.authenticate(&AuthenticateOptions::default())
			.await
			.unwrap();
		assert!(adapter.is_authenticated().await.unwrap());
	}

	#[tokio::test]
	async fn failure_message_is_verbatim() {
		let adapter = MockAdapter::failing("b", "network down");
		let err = adapter.submit(&Content::text("hi")).await.unwrap_err();
		assert_eq!(err.to_string(), "network down");
	}
}
