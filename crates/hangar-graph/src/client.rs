//! Neo4j connection management and shared graph client.

use neo4rs::{ConfigBuilder, Graph, Query};

use hangar_core::config::Neo4jSettings;

/// Errors from graph operations.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Neo4j connection error: {0}")]
    Connection(String),

    #[error("Neo4j query error: {0}")]
    Query(#[from] neo4rs::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Graph store unavailable: {0}")]
    Unavailable(String),
}

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
        Self::from(&Neo4jSettings::default())
    }
}

impl From<&Neo4jSettings> for GraphConfig {
    fn from(settings: &Neo4jSettings) -> Self {
        Self {
            uri: settings.uri.clone(),
            user: settings.user.clone(),
            password: settings.password.clone(),
            max_connections: settings.max_connections,
            fetch_size: settings.fetch_size,
        }
    }
}

/// Neo4j graph client with connection pooling.
///
/// Connected once per process; every call checks a connection out of the
/// pool for the duration of one statement. Clone is cheap (inner Arc).
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
}

impl GraphClient {
    /// Connect to Neo4j with the given configuration.
    pub async fn connect(config: &GraphConfig) -> Result<Self, GraphError> {
        let neo_config = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .max_connections(config.max_connections as usize)
            .fetch_size(config.fetch_size)
            .build()
            .map_err(|e| GraphError::Connection(e.to_string()))?;

        let graph = Graph::connect(neo_config)
            .await
            .map_err(|e| GraphError::Connection(e.to_string()))?;

        tracing::info!(uri = %config.uri, "Connected to Neo4j");
        Ok(Self { graph })
    }

    /// Execute a write-only query (CREATE, DELETE).
    pub async fn run(&self, query: Query) -> Result<(), GraphError> {
        self.graph.run(query).await?;
        Ok(())
    }

    /// Execute a query and collect all rows.
    pub async fn query_rows(&self, query: Query) -> Result<Vec<neo4rs::Row>, GraphError> {
        let mut stream = self.graph.execute(query).await?;
        let mut rows = Vec::new();
        while let Some(row) = stream.next().await? {
            rows.push(row);
        }
        Ok(rows)
    }

    /// Execute a query and return the first row, if any.
    pub async fn query_one(&self, query: Query) -> Result<Option<neo4rs::Row>, GraphError> {
        let mut stream = self.graph.execute(query).await?;
        Ok(stream.next().await?)
    }
}

/// Read a required string column from a result row.
pub(crate) fn column(row: &neo4rs::Row, key: &str) -> Result<String, GraphError> {
    row.get::<String>(key)
        .map_err(|e| GraphError::Serialization(format!("Failed to read column {key}: {e}")))
}

/// Read a required integer column, such as a `count(..)` result.
pub(crate) fn count_column(row: &neo4rs::Row, key: &str) -> Result<i64, GraphError> {
    row.get::<i64>(key)
        .map_err(|e| GraphError::Serialization(format!("Failed to read column {key}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use neo4rs::{BoltList, BoltType, Row};

    fn row(key: &str, value: BoltType) -> Row {
        Row::new(
            BoltList::from(vec![BoltType::from(key)]),
            BoltList::from(vec![value]),
        )
    }

    #[test]
    fn test_count_column_reads_integer() {
        let row = row("cnt", BoltType::from(3_i64));
        assert_eq!(count_column(&row, "cnt").unwrap(), 3);
    }

    #[test]
    fn test_count_column_rejects_wrong_type() {
        let row = row("cnt", BoltType::from("three"));
        assert!(matches!(
            count_column(&row, "cnt"),
            Err(GraphError::Serialization(_))
        ));
    }

    #[test]
    fn test_count_column_rejects_missing_key() {
        let row = row("total", BoltType::from(1_i64));
        assert!(matches!(
            count_column(&row, "cnt"),
            Err(GraphError::Serialization(_))
        ));
    }
}
