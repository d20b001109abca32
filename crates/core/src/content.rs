//! Content model and structural validation.
//!
//! A [`Content`] value is an explicit tagged variant chosen by the caller at
//! construction time; nothing downstream infers a "kind" from which optional
//! fields happen to be present. Validation here is target-independent:
//! per-destination limits live behind each adapter's
//! [`describe_capabilities`](crate::adapter::PlatformAdapter::describe_capabilities).

use serde::{Deserialize, Serialize};
use url::Url;

/// Discriminant for the content variants, as adapters advertise support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentKind {
	Text,
	Link,
	Media,
	MediaLink,
}

/// One piece of content to distribute, tagged by shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Content {
	/// Plain text.
	Text { text: String },
	/// An absolute link with optional accompanying text.
	Link {
		link: String,
		#[serde(default)]
		text: Option<String>,
	},
	/// A media reference with optional accompanying text.
	Media {
		media_ref: String,
		#[serde(default)]
		text: Option<String>,
	},
	/// Media plus link, optional text.
	MediaLink {
		media_ref: String,
		link: String,
		#[serde(default)]
		text: Option<String>,
	},
}

impl Content {
	/// Convenience constructor for a plain text post.
	pub fn text(text: impl Into<String>) -> Self {
		Self::Text { text: text.into() }
	}

	/// Convenience constructor for a link post without text.
	pub fn link(link: impl Into<String>) -> Self {
		Self::Link {
			link: link.into(),
			text: None,
		}
	}

	pub fn kind(&self) -> ContentKind {
		match self {
			Self::Text { .. } => ContentKind::Text,
			Self::Link { .. } => ContentKind::Link,
			Self::Media { .. } => ContentKind::Media,
			Self::MediaLink { .. } => ContentKind::MediaLink,
		}
	}

	/// Accompanying text, when present and non-empty.
	pub fn body_text(&self) -> Option<&str> {
		let text = match self {
			Self::Text { text } => Some(text.as_str()),
			Self::Link { text, .. } | Self::Media { text, .. } | Self::MediaLink { text, .. } => {
				text.as_deref()
			}
		};
		text.filter(|t| !t.trim().is_empty())
	}

	pub fn link_ref(&self) -> Option<&str> {
		match self {
			Self::Link { link, .. } | Self::MediaLink { link, .. } => Some(link.as_str()),
			_ => None,
		}
	}

	pub fn media_ref(&self) -> Option<&str> {
		match self {
			Self::Media { media_ref, .. } | Self::MediaLink { media_ref, .. } => {
				Some(media_ref.as_str())
			}
			_ => None,
		}
	}
}

/// Outcome of structural validation, with every applicable error collected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
	pub valid: bool,
	pub errors: Vec<String>,
}

impl ValidationReport {
	fn from_errors(errors: Vec<String>) -> Self {
		Self {
			valid: errors.is_empty(),
			errors,
		}
	}
}

/// Checks a content value for structural validity, accumulating all errors
/// rather than stopping at the first so callers can report every problem
/// at once.
pub fn validate(content: &Content) -> ValidationReport {
	let mut errors = Vec::new();

	let has_payload = content.body_text().is_some()
		|| content.link_ref().is_some_and(|l| !l.trim().is_empty())
		|| content.media_ref().is_some_and(|m| !m.trim().is_empty());
	if !has_payload {
		errors.push("content is empty: provide text, a link, or a media reference".to_string());
	}

	if let Some(link) = content.link_ref() {
		if link.trim().is_empty() {
			errors.push("link must not be empty".to_string());
		} else if !is_absolute_uri(link) {
			errors.push(format!("link is not an absolute URI: {link}"));
		}
	}

	if let Some(media_ref) = content.media_ref() {
		if media_ref.trim().is_empty() {
			errors.push("media reference must not be empty".to_string());
		}
	}

	ValidationReport::from_errors(errors)
}

fn is_absolute_uri(link: &str) -> bool {
	Url::parse(link).is_ok()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_text_is_invalid() {
		let report = validate(&Content::text("   "));
		assert!(!report.valid);
		assert!(!report.errors.is_empty());
	}

	#[test]
	fn plain_text_is_valid() {
		let report = validate(&Content::text("hello"));
		assert!(report.valid);
		assert!(report.errors.is_empty());
	}

	#[test]
	fn relative_link_is_invalid() {
		let report = validate(&Content::link("/relative/path"));
		assert!(!report.valid);
		assert!(report.errors.iter().any(|e| e.contains("absolute URI")));
	}

	#[test]
	fn absolute_link_is_valid() {
		let report = validate(&Content::link("https://example.com/post"));
		assert!(report.valid);
	}

	#[test]
	fn errors_accumulate_rather_than_short_circuit() {
		let content = Content::MediaLink {
			media_ref: "  ".to_string(),
			link: "not a uri".to_string(),
			text: None,
		};
		let report = validate(&content);
		assert!(!report.valid);
		// Bad link and empty media ref are both reported.
		assert!(report.errors.len() >= 2, "errors: {:?}", report.errors);
	}

	#[test]
	fn empty_link_variant_reports_empty_payload_and_empty_link() {
		let content = Content::Link {
			link: String::new(),
			text: None,
		};
		let report = validate(&content);
		assert!(!report.valid);
		assert!(report.errors.len() >= 2, "errors: {:?}", report.errors);
	}

	#[test]
	fn media_post_without_text_is_valid() {
		let content = Content::Media {
			media_ref: "uploads/pic.png".to_string(),
			text: None,
		};
		assert!(validate(&content).valid);
	}

	#[test]
	fn kind_matches_variant() {
		assert_eq!(Content::text("x").kind(), ContentKind::Text);
		assert_eq!(
			Content::MediaLink {
				media_ref: "m".into(),
				link: "https://example.com".into(),
				text: None,
			}
			.kind(),
			ContentKind::MediaLink
		);
	}
}
