//! Pure freshness and shape checks over session records.

use chrono::Duration;

use super::record::SessionRecord;

/// Default freshness window applied when the caller does not override it.
pub const DEFAULT_MAX_AGE_HOURS: i64 = 24;

pub fn default_max_age() -> Duration {
	Duration::hours(DEFAULT_MAX_AGE_HOURS)
}

/// Returns whether a stored record can still be trusted.
///
/// False when the record is absent, its credential list is empty, or it is
/// older than `max_age`. An empty credential list is never valid regardless
/// of recency: freshness cannot substitute for presence of credentials.
pub fn is_valid(record: Option<&SessionRecord>, max_age: Duration) -> bool {
	let Some(record) = record else {
		return false;
	};
	if record.credentials.is_empty() {
		return false;
	}
	record.age() <= max_age
}

#[cfg(test)]
mod tests {
	use chrono::Utc;

	use super::*;
	use crate::session::record::Credential;

	fn record_with_age(hours: i64) -> SessionRecord {
		SessionRecord {
			credentials: vec![Credential::new("session_id", "secret")],
			captured_at: Utc::now() - Duration::hours(hours),
			observed_context: None,
		}
	}

	#[test]
	fn absent_record_is_invalid() {
		assert!(!is_valid(None, default_max_age()));
	}

	#[test]
	fn fresh_record_with_credentials_is_valid() {
		assert!(is_valid(Some(&record_with_age(1)), default_max_age()));
	}

	#[test]
	fn empty_credentials_are_invalid_even_when_captured_now() {
		let record = SessionRecord::new(Vec::new());
		assert!(!is_valid(Some(&record), default_max_age()));
	}

	#[test]
	fn record_older_than_window_is_invalid_despite_credentials() {
		assert!(!is_valid(Some(&record_with_age(30)), default_max_age()));
	}

	#[test]
	fn future_captured_at_counts_as_fresh() {
		let record = record_with_age(-2);
		assert!(is_valid(Some(&record), default_max_age()));
	}

	#[test]
	fn custom_window_is_honored() {
		assert!(!is_valid(Some(&record_with_age(2)), Duration::hours(1)));
		assert!(is_valid(Some(&record_with_age(2)), Duration::hours(3)));
	}
}
