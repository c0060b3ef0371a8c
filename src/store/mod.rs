//! Object-store boundary for the backup pipeline.
//!
//! The pipeline only ever talks to the store through `ObjectStore`, which
//! keeps the upload/verify logic independent of the HTTP client behind it.
//! `swift` holds the production implementation.

pub mod swift;

use std::fs::File;

use crate::errors::BackupResult;
use crate::models::object::ObjectMetadata;

/// Operations an authenticated store session offers to the pipeline.
///
/// All calls block until completion; the tool is strictly sequential.
pub trait ObjectStore {
    /// Names of every container visible to the account.
    fn container_names(&self) -> BackupResult<Vec<String>>;

    /// Store the bytes of `body` as `name` inside `container`, replacing any
    /// existing object of that name. `content_hash` is the hex MD5 digest
    /// the server checks the received bytes against before committing.
    fn create_object(
        &self,
        container: &str,
        name: &str,
        content_hash: &str,
        body: File,
    ) -> BackupResult<()>;

    /// Metadata of a stored object, including its server-side content hash.
    fn object_metadata(&self, container: &str, name: &str) -> BackupResult<ObjectMetadata>;
}
