//! Represents the remote metadata of a stored object.

use chrono::{DateTime, Utc};

/// Metadata the object store reports for a single object.
///
/// Assembled from the headers of a metadata fetch, not from a JSON body.
/// `hash` is the store's own MD5 over the object content and is the value
/// the delete-after gate compares against the locally computed digest.
#[derive(Clone, Debug)]
pub struct ObjectMetadata {
    /// Object name within its container.
    pub name: String,

    /// Hex MD5 digest computed server-side over the stored content.
    pub hash: String,

    /// Stored size in bytes.
    pub size_bytes: u64,

    /// Server-reported modification time, when the header parses.
    pub last_modified: Option<DateTime<Utc>>,
}
