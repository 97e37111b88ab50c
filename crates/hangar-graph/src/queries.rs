//! Read operations against the fleet graph.
//!
//! Labels and relationship types are interpolated only from closed enums;
//! every user-supplied value is bound as a parameter.

use neo4rs::query;

use hangar_core::{EntityKind, EntityRecord, RelationshipRecord};

use crate::client::{column, count_column, GraphClient, GraphError};

impl GraphClient {
    // ── Single Node Lookups ──────────────────────────────────────

    /// Find the first node of `kind` carrying `name`.
    pub async fn find_entity_by_name(
        &self,
        kind: EntityKind,
        name: &str,
    ) -> Result<Option<EntityRecord>, GraphError> {
        let label = kind.label();
        let cypher = format!(
            "MATCH (n:{label} {{name: $name}})
             RETURN n.name AS name, n.uuid AS uuid, n.brand AS brand
             LIMIT 1"
        );

        let q = query(&cypher).param("name", name.to_string());

        match self.query_one(q).await? {
            Some(row) => Ok(Some(row_to_entity(&row, kind)?)),
            None => Ok(None),
        }
    }

    // ── List Queries ─────────────────────────────────────────────

    /// List all nodes of a given kind, ordered by name.
    pub async fn list_entities(&self, kind: EntityKind) -> Result<Vec<EntityRecord>, GraphError> {
        let label = kind.label();
        let cypher = format!(
            "MATCH (n:{label})
             RETURN n.name AS name, n.uuid AS uuid, n.brand AS brand
             ORDER BY name"
        );

        let rows = self.query_rows(query(&cypher)).await?;
        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            results.push(row_to_entity(&row, kind)?);
        }
        Ok(results)
    }

    /// List every edge from `from` nodes to `to` nodes, whatever its type.
    pub async fn list_relationships(
        &self,
        from: EntityKind,
        to: EntityKind,
    ) -> Result<Vec<RelationshipRecord>, GraphError> {
        let from_label = from.label();
        let to_label = to.label();
        let cypher = format!(
            "MATCH (a:{from_label})-[r]->(b:{to_label})
             RETURN a.name AS source, b.name AS target, type(r) AS relation
             ORDER BY source, target"
        );

        let rows = self.query_rows(query(&cypher)).await?;
        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            results.push(RelationshipRecord {
                from: column(&row, "source")?,
                to: column(&row, "target")?,
                relation: column(&row, "relation")?,
            });
        }
        Ok(results)
    }

    /// Count nodes of a given kind.
    pub async fn count_entities(&self, kind: EntityKind) -> Result<i64, GraphError> {
        let label = kind.label();
        let cypher = format!("MATCH (n:{label}) RETURN count(n) AS cnt");

        match self.query_one(query(&cypher)).await? {
            Some(row) => count_column(&row, "cnt"),
            None => Ok(0),
        }
    }
}

/// Convert a `name, uuid, brand` row into an entity record.
pub(crate) fn row_to_entity(row: &neo4rs::Row, kind: EntityKind) -> Result<EntityRecord, GraphError> {
    Ok(EntityRecord {
        kind,
        name: column(row, "name")?,
        uuid: column(row, "uuid")?,
        // Null for aircraft and soldiers.
        brand: row.get::<String>("brand").ok(),
    })
}
