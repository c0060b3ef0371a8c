use anyhow::{Result, bail};
use clap::Parser;
use std::fmt;
use std::path::PathBuf;

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub container: String,
    pub source: PathBuf,
    pub delete_after: bool,
}

/// Swift credentials, resolved once at startup and handed to the client.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub project: String,
    pub auth_url: String,
    pub region: String,
}

// Manual Debug so the password never reaches a log sink in clear text.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.masked_password())
            .field("project", &self.project)
            .field("auth_url", &self.auth_url)
            .field("region", &self.region)
            .finish()
    }
}

impl Credentials {
    /// Asterisks of equal length, for debug narration.
    pub fn masked_password(&self) -> String {
        "*".repeat(self.password.len())
    }

    fn ensure_complete(&self) -> Result<()> {
        let fields = [
            ("os-username", &self.username),
            ("os-password", &self.password),
            ("os-project", &self.project),
            ("os-authurl", &self.auth_url),
            ("os-region", &self.region),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                bail!("credential field `{}` must not be empty", name);
            }
        }
        Ok(())
    }
}

/// Command-line + environment configuration.
#[derive(Parser, Debug)]
#[command(author, version, about = "Back up a single file to an OpenStack Swift container")]
pub struct Args {
    /// Swift username (overrides OS_USERNAME)
    #[arg(long = "os-username")]
    pub username: Option<String>,

    /// Swift password (overrides OS_PASSWORD)
    #[arg(long = "os-password")]
    pub password: Option<String>,

    /// Project name (overrides OS_PROJECT_NAME)
    #[arg(long = "os-project")]
    pub project: Option<String>,

    /// Keystone endpoint (overrides OS_AUTH_URL)
    #[arg(long = "os-authurl")]
    pub auth_url: Option<String>,

    /// Region name (overrides OS_REGION_NAME)
    #[arg(long = "os-region")]
    pub region: Option<String>,

    /// Delete the source file once the remote copy is verified
    #[arg(long = "delete-after")]
    pub delete_after: bool,

    /// Target container
    pub container: String,

    /// File to upload
    pub file: PathBuf,
}

impl Config {
    /// Parse environment variables + CLI args into a Config.
    pub fn from_env_and_args(args: Args) -> Result<Self> {
        Self::resolve(args, |name| std::env::var(name).ok())
    }

    /// Merge rule: flag beats environment beats default. The environment is
    /// injected so the merge can be exercised without process-global state.
    fn resolve(args: Args, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let pick = |flag: Option<String>, var: &str, default: &str| {
            flag.or_else(|| env(var))
                .unwrap_or_else(|| default.to_string())
        };

        let credentials = Credentials {
            username: pick(args.username, "OS_USERNAME", "admin"),
            password: pick(args.password, "OS_PASSWORD", "password"),
            project: pick(args.project, "OS_PROJECT_NAME", "admin"),
            auth_url: pick(
                args.auth_url,
                "OS_AUTH_URL",
                "https://os.ch-ti1.server.one/v2.0/",
            ),
            region: pick(args.region, "OS_REGION_NAME", "ch-ti1"),
        };
        credentials.ensure_complete()?;

        Ok(Self {
            credentials,
            container: args.container,
            source: args.file,
            delete_after: args.delete_after,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args(extra: &[&str]) -> Args {
        let mut argv = vec!["swift-backup"];
        argv.extend_from_slice(extra);
        argv.extend_from_slice(&["backups", "report.csv"]);
        Args::try_parse_from(argv).expect("arguments should parse")
    }

    #[test]
    fn defaults_match_the_shipped_sample_endpoint() {
        let cfg = Config::resolve(base_args(&[]), |_| None).unwrap();
        assert_eq!(cfg.credentials.username, "admin");
        assert_eq!(cfg.credentials.password, "password");
        assert_eq!(cfg.credentials.project, "admin");
        assert_eq!(cfg.credentials.auth_url, "https://os.ch-ti1.server.one/v2.0/");
        assert_eq!(cfg.credentials.region, "ch-ti1");
        assert_eq!(cfg.container, "backups");
        assert_eq!(cfg.source, PathBuf::from("report.csv"));
        assert!(!cfg.delete_after);
    }

    #[test]
    fn flag_beats_environment_beats_default() {
        let env = |name: &str| match name {
            "OS_USERNAME" => Some("env-user".to_string()),
            "OS_REGION_NAME" => Some("env-region".to_string()),
            _ => None,
        };
        let cfg = Config::resolve(base_args(&["--os-username", "flag-user"]), env).unwrap();
        assert_eq!(cfg.credentials.username, "flag-user");
        assert_eq!(cfg.credentials.region, "env-region");
        assert_eq!(cfg.credentials.project, "admin");
    }

    #[test]
    fn empty_credential_field_is_rejected() {
        let err = Config::resolve(base_args(&["--os-password", ""]), |_| None)
            .expect_err("empty password must not resolve");
        assert!(err.to_string().contains("os-password"));
    }

    #[test]
    fn exactly_two_positionals_are_required() {
        assert!(Args::try_parse_from(["swift-backup", "backups"]).is_err());
        assert!(Args::try_parse_from(["swift-backup", "backups", "a.csv", "b.csv"]).is_err());
        assert!(Args::try_parse_from(["swift-backup", "backups", "a.csv"]).is_ok());
    }

    #[test]
    fn delete_after_switch_parses() {
        let args =
            Args::try_parse_from(["swift-backup", "--delete-after", "backups", "a.csv"]).unwrap();
        assert!(args.delete_after);
    }

    #[test]
    fn debug_output_masks_the_password() {
        let cfg = Config::resolve(base_args(&["--os-password", "hunter2"]), |_| None).unwrap();
        let rendered = format!("{:?}", cfg.credentials);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("*******"));
    }
}
