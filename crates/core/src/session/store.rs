//! File-backed session store with whole-document replace semantics.
//!
//! The persisted document is a single JSON mapping from target id to
//! [`SessionRecord`], rewritten in full on every mutation. In-memory state
//! is updated first and then flushed; a flush failure surfaces as
//! [`Error::Persistence`] and leaves memory ahead of disk until the next
//! successful write. The write itself is best-effort `fs::write` without a
//! temp-file rename. Cross-process use of the same document is unsupported.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Duration;
use parking_lot::Mutex;
use tracing::{debug, warn};

use super::record::SessionRecord;
use super::validity::is_valid;
use crate::error::{Error, Result};

const STORE_FILE: &str = "sessions.json";

/// Durable mapping from target id to captured session record.
///
/// Mutating methods take `&self`: the map sits behind a mutex so concurrent
/// adapter completions within one batch serialize their read-modify-write
/// of the document (single-writer discipline).
#[derive(Debug)]
pub struct SessionStore {
	path: PathBuf,
	sessions: Mutex<HashMap<String, SessionRecord>>,
}

impl SessionStore {
	/// Opens a store at an explicit path, loading whatever is there.
	///
	/// A missing or unreadable document yields an empty store rather than
	/// an error; the next successful mutation rewrites it.
	pub fn open(path: impl Into<PathBuf>) -> Self {
		let path = path.into();
		let sessions = fs::read_to_string(&path)
			.ok()
			.and_then(|content| {
				serde_json::from_str::<HashMap<String, SessionRecord>>(&content)
					.map_err(|err| {
						warn!(
							target: "crier.session",
							path = %path.display(),
							error = %err,
							"session document malformed; starting empty"
						);
					})
					.ok()
			})
			.unwrap_or_default();
		debug!(
			target: "crier.session",
			path = %path.display(),
			targets = sessions.len(),
			"session store opened"
		);
		Self {
			path,
			sessions: Mutex::new(sessions),
		}
	}

	/// Opens the store at its fixed per-user location
	/// (`~/.config/crier/sessions.json` on Linux).
	pub fn open_default() -> Result<Self> {
		let dir = dirs::config_dir()
			.ok_or_else(|| Error::Config("no per-user config directory available".to_string()))?;
		Ok(Self::open(dir.join("crier").join(STORE_FILE)))
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Returns the stored record for a target, if any.
	pub fn get(&self, target: &str) -> Option<SessionRecord> {
		self.sessions.lock().get(target).cloned()
	}

	/// Stores a record and rewrites the persisted document before returning.
	pub fn set(&self, target: &str, record: SessionRecord) -> Result<()> {
		let mut sessions = self.sessions.lock();
		sessions.insert(target.to_string(), record);
		self.flush(&sessions)?;
		debug!(target: "crier.session", target_id = target, "session record stored");
		Ok(())
	}

	/// Removes a target's record. Returns whether anything was removed; the
	/// document is only rewritten when it was.
	pub fn clear(&self, target: &str) -> Result<bool> {
		let mut sessions = self.sessions.lock();
		if sessions.remove(target).is_none() {
			return Ok(false);
		}
		self.flush(&sessions)?;
		debug!(target: "crier.session", target_id = target, "session record cleared");
		Ok(true)
	}

	/// Target ids with a record currently within the freshness window,
	/// sorted for deterministic iteration.
	pub fn list_valid(&self, max_age: Duration) -> Vec<String> {
		let sessions = self.sessions.lock();
		let mut targets: Vec<String> = sessions
			.iter()
			.filter(|(_, record)| is_valid(Some(record), max_age))
			.map(|(target, _)| target.clone())
			.collect();
		targets.sort();
		targets
	}

	/// All target ids present in the document, valid or not.
	pub fn targets(&self) -> Vec<String> {
		let sessions = self.sessions.lock();
		let mut targets: Vec<String> = sessions.keys().cloned().collect();
		targets.sort();
		targets
	}

	fn flush(&self, sessions: &HashMap<String, SessionRecord>) -> Result<()> {
		if let Some(parent) = self.path.parent() {
			fs::create_dir_all(parent).map_err(|source| Error::Persistence {
				path: self.path.clone(),
				source,
			})?;
		}
		let json = serde_json::to_string_pretty(sessions)?;
		fs::write(&self.path, json).map_err(|source| Error::Persistence {
			path: self.path.clone(),
			source,
		})
	}
}
