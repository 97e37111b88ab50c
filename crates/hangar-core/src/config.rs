//! Configuration management for the Hangar console.
//!
//! Configuration is loaded once at startup from (in priority order):
//! 1. Environment variables (`HANGAR__` prefix, `__` separator,
//!    e.g. `HANGAR__NEO4J__URI`)
//! 2. Config file (`hangar.toml`, prefix selectable)
//! 3. Defaults
//!
//! `gate.password` has no default; loading fails without it.

use serde::Deserialize;

use crate::HangarError;

/// Default token lifetime: one hour.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HangarConfig {
    #[serde(default)]
    pub gate: GateSettings,

    #[serde(default)]
    pub neo4j: Neo4jSettings,

    #[serde(default)]
    pub console: ConsoleSettings,
}

/// Session gate settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GateSettings {
    /// The single shared console password.
    #[serde(default)]
    pub password: String,

    /// Token lifetime in seconds.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: i64,
}

/// Neo4j connection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Neo4jSettings {
    #[serde(default = "default_uri")]
    pub uri: String,

    #[serde(default = "default_user")]
    pub user: String,

    #[serde(default)]
    pub password: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_fetch_size")]
    pub fetch_size: usize,
}

/// Console presentation settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConsoleSettings {
    /// Directory to write graph-view JSON into after list actions.
    #[serde(default)]
    pub export_dir: Option<String>,
}

impl HangarConfig {
    /// Load from `<file_prefix>.toml` (optional) overlaid by `HANGAR__` env vars.
    pub fn load(file_prefix: &str) -> Result<Self, HangarError> {
        let cfg = config::Config::builder()
            .add_source(config::File::with_name(file_prefix).required(false))
            .add_source(
                config::Environment::with_prefix("HANGAR")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let loaded: HangarConfig = cfg.try_deserialize()?;
        loaded.validate()?;
        tracing::debug!(uri = %loaded.neo4j.uri, user = %loaded.neo4j.user, "Configuration loaded");
        Ok(loaded)
    }

    /// Reject configurations the console cannot start with.
    pub fn validate(&self) -> Result<(), HangarError> {
        if self.gate.password.is_empty() {
            return Err(HangarError::Config(
                "gate.password is required (set HANGAR__GATE__PASSWORD)".to_string(),
            ));
        }
        if self.gate.token_ttl_secs <= 0 {
            return Err(HangarError::Config(format!(
                "gate.token_ttl_secs must be positive, got {}",
                self.gate.token_ttl_secs
            )));
        }
        Ok(())
    }
}

fn default_token_ttl() -> i64 {
    DEFAULT_TOKEN_TTL_SECS
}

fn default_uri() -> String {
    "bolt://localhost:7687".to_string()
}

fn default_user() -> String {
    "neo4j".to_string()
}

fn default_max_connections() -> u32 {
    16
}

fn default_fetch_size() -> usize {
    256
}

impl Default for GateSettings {
    fn default() -> Self {
        Self {
            password: String::new(),
            token_ttl_secs: default_token_ttl(),
        }
    }
}

impl Default for Neo4jSettings {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            user: default_user(),
            password: String::new(),
            max_connections: default_max_connections(),
            fetch_size: default_fetch_size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HangarConfig::default();
        assert_eq!(config.neo4j.uri, "bolt://localhost:7687");
        assert_eq!(config.neo4j.user, "neo4j");
        assert_eq!(config.neo4j.max_connections, 16);
        assert_eq!(config.gate.token_ttl_secs, 3600);
        assert!(config.console.export_dir.is_none());
    }

    #[test]
    fn test_missing_password_is_rejected() {
        let config = HangarConfig::default();
        assert!(matches!(config.validate(), Err(HangarError::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hangar.toml");
        std::fs::write(
            &path,
            r#"
[gate]
password = "hunter2"

[neo4j]
uri = "neo4j+s://fleet.example.com"
user = "ops"
password = "secret"

[console]
export_dir = "/tmp/views"
"#,
        )
        .unwrap();

        let prefix = dir.path().join("hangar");
        let config = HangarConfig::load(prefix.to_str().unwrap()).unwrap();
        assert_eq!(config.gate.password, "hunter2");
        assert_eq!(config.gate.token_ttl_secs, 3600);
        assert_eq!(config.neo4j.uri, "neo4j+s://fleet.example.com");
        assert_eq!(config.neo4j.user, "ops");
        assert_eq!(config.neo4j.fetch_size, 256);
        assert_eq!(config.console.export_dir.as_deref(), Some("/tmp/views"));
    }

    #[test]
    fn test_non_positive_ttl_is_rejected() {
        let mut config = HangarConfig::default();
        config.gate.password = "pw".to_string();
        config.gate.token_ttl_secs = 0;
        assert!(config.validate().is_err());
    }
}
