//! Represents one container in the account's container listing.

use serde::Deserialize;

/// A container as returned by `GET <storage-url>?format=json`.
///
/// The listing is the authoritative source for the pre-upload existence
/// check; only `name` takes part in that check, the counters ride along for
/// debug narration.
#[derive(Deserialize, Clone, Debug)]
pub struct ContainerEntry {
    /// Container name, unique within the account.
    pub name: String,

    /// Number of objects currently stored in the container.
    #[serde(default)]
    pub count: u64,

    /// Total size of the stored objects in bytes.
    #[serde(default)]
    pub bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_an_account_listing() {
        let body = r#"[
            {"name": "backups", "count": 12, "bytes": 4096},
            {"name": "logs", "count": 0, "bytes": 0}
        ]"#;
        let entries: Vec<ContainerEntry> = serde_json::from_str(body).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "backups");
        assert_eq!(entries[0].count, 12);
        assert_eq!(entries[1].bytes, 0);
    }

    #[test]
    fn counters_are_optional() {
        let entries: Vec<ContainerEntry> =
            serde_json::from_str(r#"[{"name": "backups"}]"#).unwrap();
        assert_eq!(entries[0].count, 0);
    }
}
