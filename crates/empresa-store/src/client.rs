//! Neo4j connection management and shared graph client.

use neo4rs::{query, ConfigBuilder, Graph, Query};

use empresa_core::config::Neo4jSettings;

use crate::error::{Result, StoreError};

/// Configuration for connecting to Neo4j.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub max_connections: u32,
    pub fetch_size: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Neo4jSettings::default().into()
    }
}

impl From<Neo4jSettings> for GraphConfig {
    fn from(settings: Neo4jSettings) -> Self {
        Self {
            uri: settings.uri,
            user: settings.user,
            password: settings.password,
            max_connections: settings.max_connections,
            fetch_size: settings.fetch_size,
        }
    }
}

/// Uniqueness constraints backing the store contract.
const CONSTRAINTS: &[&str] = &[
    "CREATE CONSTRAINT empleado_id IF NOT EXISTS FOR (n:Empleado) REQUIRE n.id IS UNIQUE",
    "CREATE CONSTRAINT gerente_id IF NOT EXISTS FOR (n:Gerente) REQUIRE n.id IS UNIQUE",
    "CREATE CONSTRAINT gerente_email IF NOT EXISTS FOR (n:Gerente) REQUIRE n.email IS UNIQUE",
    "CREATE CONSTRAINT departamento_id IF NOT EXISTS FOR (n:Departamento) REQUIRE n.id IS UNIQUE",
    "CREATE CONSTRAINT departamento_nombre IF NOT EXISTS FOR (n:Departamento) REQUIRE n.nombre IS UNIQUE",
];

/// Thread-safe Neo4j client with connection pooling.
///
/// Each collection is a node label; each document is a node.
/// Clone is cheap (inner Arc).
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
}

impl GraphClient {
    /// Connect to Neo4j with the given configuration.
    pub async fn connect(config: &GraphConfig) -> Result<Self> {
        let neo_config = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .max_connections(config.max_connections as usize)
            .fetch_size(config.fetch_size)
            .build()
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let graph = Graph::connect(neo_config)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        tracing::info!(uri = %config.uri, "Connected to Neo4j");
        Ok(Self { graph })
    }

    /// Create the id, email, and department-name uniqueness constraints if missing.
    pub async fn ensure_constraints(&self) -> Result<()> {
        for statement in CONSTRAINTS {
            self.run(query(statement)).await?;
        }
        tracing::debug!(count = CONSTRAINTS.len(), "Uniqueness constraints ensured");
        Ok(())
    }

    /// Execute a write-only query (CREATE, SET, DELETE).
    pub async fn run(&self, query: Query) -> Result<()> {
        self.graph.run(query).await?;
        Ok(())
    }

    /// Execute a read query and collect all rows.
    pub async fn query_rows(&self, query: Query) -> Result<Vec<neo4rs::Row>> {
        let mut stream = self.graph.execute(query).await?;
        let mut rows = Vec::new();
        while let Some(row) = stream.next().await? {
            rows.push(row);
        }
        Ok(rows)
    }

    /// Execute a read query and return the first row, if any.
    pub async fn query_one(&self, query: Query) -> Result<Option<neo4rs::Row>> {
        let mut stream = self.graph.execute(query).await?;
        Ok(stream.next().await?)
    }
}

/// Whether a Neo4j failure is a uniqueness constraint rejection.
pub(crate) fn is_constraint_violation(err: &StoreError) -> bool {
    match err {
        StoreError::Query(e) => {
            let message = e.to_string();
            message.contains("ConstraintValidationFailed") || message.contains("already exists with")
        }
        _ => false,
    }
}
