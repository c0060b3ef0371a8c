//! Wire and metadata models for the Swift object-storage API.
//!
//! `auth` carries the Keystone v2.0 request/response bodies, `container`
//! the account listing entries, and `object` the metadata assembled from a
//! metadata fetch. Serialization is plain `serde` JSON where the API speaks
//! JSON; object metadata comes from response headers instead.

pub mod auth;
pub mod container;
pub mod object;
