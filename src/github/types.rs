use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A published release, normalized from the API payload.
///
/// Records without a publish timestamp (drafts) are dropped at the fetch
/// boundary, so `published_at` is always present here.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Release {
    /// Version tag (e.g., "v1.0.0"); unique within one repository.
    pub tag: String,
    /// Human label; falls back to the tag when the API sends none.
    pub title: String,
    /// Publication timestamp, the sole ordering and filtering key.
    pub published_at: DateTime<Utc>,
    /// Free-text release notes; may be empty.
    pub body: String,
    /// Canonical link to the release page.
    pub url: String,
}
