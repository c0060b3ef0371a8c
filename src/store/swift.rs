//! Swift client: Keystone v2.0 authentication plus the storage calls the
//! pipeline needs (container listing, object creation, metadata fetch).

use std::fs::File;

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::{self, HeaderMap};
use tracing::debug;

use crate::config::Credentials;
use crate::errors::{BackupError, BackupResult};
use crate::models::auth::{AuthRequest, AuthResponse};
use crate::models::container::ContainerEntry;
use crate::models::object::ObjectMetadata;
use crate::store::ObjectStore;

const MAX_IDLE_PER_HOST: usize = 2048;

/// Unauthenticated client holding the credentials and the configured
/// transport. `authenticate` consumes it and yields a usable session.
pub struct SwiftClient {
    http: Client,
    credentials: Credentials,
}

impl SwiftClient {
    /// Build the transport. Certificate verification is disabled: the
    /// endpoints this tool targets run semi-trusted certificates.
    /// Proxy settings are picked up from the environment by default.
    pub fn new(credentials: Credentials) -> BackupResult<Self> {
        let http = Client::builder()
            .danger_accept_invalid_certs(true)
            .pool_max_idle_per_host(MAX_IDLE_PER_HOST)
            .build()?;
        Ok(Self { http, credentials })
    }

    /// Authenticate against Keystone and resolve the object-store endpoint
    /// for the configured region.
    ///
    /// The identity service reports bad credentials as a plain 400, which
    /// maps to `AuthenticationDenied`; any other non-success status maps to
    /// `AuthenticationFailed`. A success response that yields no token or no
    /// endpoint for the region is `NotAuthenticated`.
    pub fn authenticate(self) -> BackupResult<SwiftSession> {
        let url = format!("{}/tokens", self.credentials.auth_url.trim_end_matches('/'));
        let request = AuthRequest::new(
            &self.credentials.username,
            &self.credentials.password,
            &self.credentials.project,
        );

        let response = self.http.post(&url).json(&request).send()?;
        match response.status() {
            StatusCode::BAD_REQUEST => return Err(BackupError::AuthenticationDenied),
            status if !status.is_success() => {
                return Err(BackupError::AuthenticationFailed(status));
            }
            _ => {}
        }

        let auth: AuthResponse = response.json()?;
        let storage_url = auth
            .storage_url(&self.credentials.region)
            .ok_or_else(|| {
                BackupError::NotAuthenticated(format!(
                    "no object-store endpoint for region `{}`",
                    self.credentials.region
                ))
            })?
            .to_string();
        let token = auth.access.token.id;
        if token.is_empty() {
            return Err(BackupError::NotAuthenticated(
                "identity service returned an empty token".into(),
            ));
        }
        debug!("Storage endpoint: {}", storage_url);

        Ok(SwiftSession {
            http: self.http,
            token,
            storage_url,
        })
    }
}

/// An authenticated session against one region's object store.
///
/// Valid for a single run; there is no explicit teardown beyond process
/// exit, matching the one-shot lifecycle of the tool.
pub struct SwiftSession {
    http: Client,
    token: String,
    storage_url: String,
}

impl SwiftSession {
    fn object_url(&self, container: &str, name: &str) -> String {
        format!(
            "{}/{}/{}",
            self.storage_url.trim_end_matches('/'),
            container,
            name
        )
    }
}

impl ObjectStore for SwiftSession {
    fn container_names(&self) -> BackupResult<Vec<String>> {
        let url = format!("{}?format=json", self.storage_url.trim_end_matches('/'));
        let response = self
            .http
            .get(&url)
            .header("X-Auth-Token", &self.token)
            .send()?;
        if !response.status().is_success() {
            return Err(BackupError::UnexpectedStatus {
                operation: "listing containers",
                status: response.status(),
            });
        }
        let entries: Vec<ContainerEntry> = response.json()?;
        for entry in &entries {
            debug!(
                "Container {}: {} objects, {} bytes",
                entry.name, entry.count, entry.bytes
            );
        }
        Ok(entries.into_iter().map(|entry| entry.name).collect())
    }

    fn create_object(
        &self,
        container: &str,
        name: &str,
        content_hash: &str,
        body: File,
    ) -> BackupResult<()> {
        let url = self.object_url(container, name);
        let response = self
            .http
            .put(&url)
            .header("X-Auth-Token", &self.token)
            .header(header::ETAG, content_hash)
            .body(body)
            .send()?;
        // A 422 here is the server rejecting the transfer because its own
        // digest of the received bytes disagrees with the supplied ETag.
        let status = response.status();
        if !status.is_success() {
            return Err(BackupError::UnexpectedStatus {
                operation: "uploading object",
                status,
            });
        }
        Ok(())
    }

    fn object_metadata(&self, container: &str, name: &str) -> BackupResult<ObjectMetadata> {
        let url = self.object_url(container, name);
        let response = self
            .http
            .head(&url)
            .header("X-Auth-Token", &self.token)
            .send()?;
        match response.status() {
            StatusCode::NOT_FOUND => {
                return Err(BackupError::ObjectNotFound {
                    container: container.to_string(),
                    object: name.to_string(),
                });
            }
            status if !status.is_success() => {
                return Err(BackupError::UnexpectedStatus {
                    operation: "fetching object metadata",
                    status,
                });
            }
            _ => {}
        }
        Ok(metadata_from_headers(name, response.headers()))
    }
}

/// Assemble object metadata from the headers of a metadata response.
/// A missing or unparsable `Etag` yields an empty hash, which can never
/// match a real digest, so verification fails closed.
fn metadata_from_headers(name: &str, headers: &HeaderMap) -> ObjectMetadata {
    let hash = headers
        .get(header::ETAG)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim_matches('"').to_string())
        .unwrap_or_default();
    let size_bytes = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
        .unwrap_or(0);
    let last_modified = headers
        .get(header::LAST_MODIFIED)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| DateTime::parse_from_rfc2822(value).ok())
        .map(|value| value.with_timezone(&Utc));

    ObjectMetadata {
        name: name.to_string(),
        hash,
        size_bytes,
        last_modified,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn session(storage_url: &str) -> SwiftSession {
        SwiftSession {
            http: Client::new(),
            token: "tok-123".into(),
            storage_url: storage_url.into(),
        }
    }

    #[test]
    fn object_url_joins_container_and_name() {
        let session = session("https://storage.example/v1/AUTH_abc");
        assert_eq!(
            session.object_url("backups", "report.csv"),
            "https://storage.example/v1/AUTH_abc/backups/report.csv"
        );
    }

    #[test]
    fn object_url_tolerates_a_trailing_slash() {
        let session = session("https://storage.example/v1/AUTH_abc/");
        assert_eq!(
            session.object_url("backups", "report.csv"),
            "https://storage.example/v1/AUTH_abc/backups/report.csv"
        );
    }

    #[test]
    fn metadata_parses_etag_size_and_date() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ETAG,
            HeaderValue::from_static("5eb63bbbe01eeed093cb22bb8f5acdc3"),
        );
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("11"));
        headers.insert(
            header::LAST_MODIFIED,
            HeaderValue::from_static("Wed, 05 Aug 2026 10:30:00 GMT"),
        );

        let metadata = metadata_from_headers("report.csv", &headers);
        assert_eq!(metadata.name, "report.csv");
        assert_eq!(metadata.hash, "5eb63bbbe01eeed093cb22bb8f5acdc3");
        assert_eq!(metadata.size_bytes, 11);
        let stamp = metadata.last_modified.expect("date should parse");
        assert_eq!(
            stamp,
            DateTime::parse_from_rfc3339("2026-08-05T10:30:00Z").unwrap()
        );
    }

    #[test]
    fn metadata_strips_quotes_around_the_etag() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ETAG,
            HeaderValue::from_static("\"5eb63bbbe01eeed093cb22bb8f5acdc3\""),
        );
        let metadata = metadata_from_headers("report.csv", &headers);
        assert_eq!(metadata.hash, "5eb63bbbe01eeed093cb22bb8f5acdc3");
    }

    #[test]
    fn missing_etag_yields_an_empty_hash() {
        let metadata = metadata_from_headers("report.csv", &HeaderMap::new());
        assert!(metadata.hash.is_empty());
        assert_eq!(metadata.size_bytes, 0);
        assert!(metadata.last_modified.is_none());
    }
}
