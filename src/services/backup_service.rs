//! The backup pipeline: validate the target container, hash and upload the
//! source file, and optionally delete the source once the remote copy's
//! hash has been fetched and matched against the local digest.

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::config::Config;
use crate::errors::{BackupError, BackupResult};
use crate::store::ObjectStore;

const HASH_BUF_LEN: usize = 64 * 1024;

/// What a completed run did, for the final summary line.
#[derive(Debug)]
pub struct BackupOutcome {
    pub object: String,
    pub bytes: u64,
    pub content_hash: String,
    pub source_removed: bool,
}

/// Run the full pipeline against an authenticated store session.
///
/// Stages run strictly in order and the first failure aborts the run:
/// container check, local hash, upload, then (only when requested) the
/// verify-and-delete gate. The source file is never removed unless the
/// store's reported hash equals the locally computed digest.
pub fn run_backup<S: ObjectStore>(store: &S, config: &Config) -> BackupResult<BackupOutcome> {
    let target = target_name(&config.source)?;
    debug!("Target object name: {}", target);

    let containers = store.container_names()?;
    debug!("Containers: {:?}", containers);
    if !containers.iter().any(|name| name == &config.container) {
        return Err(BackupError::ContainerNotFound(config.container.clone()));
    }

    let content_hash = md5_hex(&config.source)?;
    debug!("Hash: {}", content_hash);

    // Reopen rather than seek: the hashing read left its handle at EOF, a
    // fresh handle is guaranteed to start at position zero.
    let body = File::open(&config.source)?;
    let bytes = body.metadata()?.len();
    store.create_object(&config.container, &target, &content_hash, body)?;
    debug!("Copied {} bytes", bytes);

    let mut source_removed = false;
    if config.delete_after {
        let metadata = store.object_metadata(&config.container, &target)?;
        debug!(
            "Remote object {}: {} bytes, last modified {:?}",
            metadata.name, metadata.size_bytes, metadata.last_modified
        );
        debug!("Remote hash: {}", metadata.hash);
        debug!("Local hash:  {}", content_hash);
        // Hex digests compare case-insensitively; the case carries no meaning.
        if !metadata.hash.eq_ignore_ascii_case(&content_hash) {
            return Err(BackupError::HashMismatch {
                local: content_hash,
                remote: metadata.hash,
            });
        }
        debug!("Hashes match, deleting source file");
        fs::remove_file(&config.source).map_err(|source| BackupError::RemoveSource {
            path: config.source.clone(),
            source,
        })?;
        source_removed = true;
    }

    Ok(BackupOutcome {
        object: target,
        bytes,
        content_hash,
        source_removed,
    })
}

/// The remote object is named after the source's final path component,
/// never the full path.
fn target_name(source: &Path) -> BackupResult<String> {
    source
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| BackupError::InvalidSourcePath(source.to_path_buf()))
}

/// Stream the file through an MD5 accumulator and hex-encode the digest.
/// The handle is dropped on return; the caller reopens for the transfer.
fn md5_hex(path: &Path) -> BackupResult<String> {
    let mut file = File::open(path)?;
    let mut digest = md5::Context::new();
    let mut buf = [0u8; HASH_BUF_LEN];
    loop {
        let read = file.read(&mut buf)?;
        if read == 0 {
            break;
        }
        digest.consume(&buf[..read]);
    }
    Ok(format!("{:x}", digest.compute()))
}
