//! Keystone v2.0 authentication wire types.
//!
//! The identity service takes tenant-scoped password credentials and answers
//! with a token plus a service catalog; the object-store endpoint for the
//! configured region is looked up from that catalog.

use serde::{Deserialize, Serialize};

/// Body of `POST <authurl>/tokens`.
#[derive(Serialize, Debug)]
pub struct AuthRequest {
    pub auth: AuthPayload,
}

#[derive(Serialize, Debug)]
pub struct AuthPayload {
    #[serde(rename = "passwordCredentials")]
    pub password_credentials: PasswordCredentials,

    #[serde(rename = "tenantName")]
    pub tenant_name: String,
}

#[derive(Serialize, Debug)]
pub struct PasswordCredentials {
    pub username: String,
    pub password: String,
}

impl AuthRequest {
    pub fn new(username: &str, password: &str, tenant: &str) -> Self {
        Self {
            auth: AuthPayload {
                password_credentials: PasswordCredentials {
                    username: username.to_string(),
                    password: password.to_string(),
                },
                tenant_name: tenant.to_string(),
            },
        }
    }
}

/// Successful response from the identity service.
#[derive(Deserialize, Debug)]
pub struct AuthResponse {
    pub access: Access,
}

#[derive(Deserialize, Debug)]
pub struct Access {
    pub token: Token,

    #[serde(rename = "serviceCatalog", default)]
    pub service_catalog: Vec<CatalogEntry>,
}

#[derive(Deserialize, Debug)]
pub struct Token {
    /// The value subsequent calls send as `X-Auth-Token`.
    pub id: String,
}

/// One service advertised in the catalog.
#[derive(Deserialize, Debug)]
pub struct CatalogEntry {
    #[serde(rename = "type")]
    pub service_type: String,

    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
}

#[derive(Deserialize, Debug)]
pub struct Endpoint {
    #[serde(default)]
    pub region: Option<String>,

    #[serde(rename = "publicURL")]
    pub public_url: String,
}

impl AuthResponse {
    /// Public object-store URL for `region`, if the catalog advertises one.
    /// Region comparison is exact; the catalog is case-preserving.
    pub fn storage_url(&self, region: &str) -> Option<&str> {
        self.access
            .service_catalog
            .iter()
            .filter(|entry| entry.service_type == "object-store")
            .flat_map(|entry| entry.endpoints.iter())
            .find(|endpoint| endpoint.region.as_deref() == Some(region))
            .map(|endpoint| endpoint.public_url.as_str())
    }
}
