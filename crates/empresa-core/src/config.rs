//! Configuration management for Empresa services.
//!
//! Configuration is loaded from (in priority order):
//! 1. Environment variables (EMPRESA_ prefix, `__` as section separator,
//!    e.g. `EMPRESA__STORE__NEO4J__URI`)
//! 2. Config file (`empresa.toml` by default)
//! 3. Defaults

use serde::Deserialize;

use crate::error::ConfigError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EmpresaConfig {
    pub server: ServerConfig,
    pub store: StoreSettings,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4000,
        }
    }
}

/// Which store backend to run against.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Neo4j,
    /// Process-local store; contents are lost on exit.
    Memory,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    pub backend: StoreBackend,
    pub neo4j: Neo4jSettings,
}

/// Connection settings for the Neo4j backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Neo4jSettings {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub max_connections: u32,
    pub fetch_size: usize,
}

impl Default for Neo4jSettings {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: "empresa-dev".to_string(),
            max_connections: 10,
            fetch_size: 256,
        }
    }
}

impl EmpresaConfig {
    /// Load from `{file_prefix}.toml` (optional) overlaid with `EMPRESA__*` env vars.
    pub fn load(file_prefix: &str) -> Result<Self, ConfigError> {
        let cfg = config::Config::builder()
            .add_source(config::File::with_name(file_prefix).required(false))
            .add_source(
                config::Environment::with_prefix("EMPRESA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let loaded: EmpresaConfig = cfg.try_deserialize()?;
        tracing::debug!(
            backend = ?loaded.store.backend,
            port = loaded.server.port,
            "Configuration loaded"
        );
        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EmpresaConfig::default();
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.store.backend, StoreBackend::Neo4j);
        assert_eq!(config.store.neo4j.uri, "bolt://localhost:7687");
        assert_eq!(config.store.neo4j.max_connections, 10);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let cfg = config::Config::builder()
            .add_source(config::File::from_str(
                "[server]\nport = 8080\n\n[store]\nbackend = \"memory\"\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();

        let loaded: EmpresaConfig = cfg.try_deserialize().unwrap();
        assert_eq!(loaded.server.port, 8080);
        assert_eq!(loaded.server.host, "0.0.0.0");
        assert_eq!(loaded.store.backend, StoreBackend::Memory);
        assert_eq!(loaded.store.neo4j.user, "neo4j");
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let loaded = EmpresaConfig::load("does-not-exist-empresa").unwrap();
        assert_eq!(loaded.server.port, 4000);
    }
}
