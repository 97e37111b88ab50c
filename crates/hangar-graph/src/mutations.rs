//! Write operations for the fleet graph.
//!
//! Nodes are created with CREATE (no upsert): the uuid is generated by the
//! caller and names other than drone names may repeat.

use neo4rs::query;

use hangar_core::{DroneRecord, EntityKind, EntityRecord, RelationType, RelationshipRecord};

use crate::client::{column, count_column, GraphClient, GraphError};
use crate::queries::row_to_entity;
use crate::store::NewDrone;

impl GraphClient {
    // ── Node Creation ────────────────────────────────────────────

    /// Create a node of `kind` with the given name and uuid.
    pub async fn create_entity(
        &self,
        kind: EntityKind,
        name: &str,
        uuid: &str,
    ) -> Result<Option<EntityRecord>, GraphError> {
        let label = kind.label();
        let cypher = format!(
            "CREATE (n:{label} {{name: $name, uuid: $uuid}})
             RETURN n.name AS name, n.uuid AS uuid, n.brand AS brand"
        );

        let q = query(&cypher)
            .param("name", name.to_string())
            .param("uuid", uuid.to_string());

        match self.query_one(q).await? {
            Some(row) => Ok(Some(row_to_entity(&row, kind)?)),
            None => Ok(None),
        }
    }

    /// Create a drone and link it to every aircraft and soldier with the
    /// given names.
    ///
    /// Endpoints are resolved before the CREATE, so an unknown aircraft or
    /// soldier leaves the graph untouched.
    pub async fn create_linked_drone(
        &self,
        drone: &NewDrone,
    ) -> Result<Option<DroneRecord>, GraphError> {
        let q = query(
            "MATCH (a:Aircraft {name: $aircraft})
             WITH collect(a) AS aircraft
             MATCH (s:Soldier {name: $soldier})
             WITH aircraft, collect(s) AS soldiers
             WHERE size(aircraft) > 0 AND size(soldiers) > 0
             CREATE (d:Drone {name: $name, uuid: $uuid, brand: $brand})
             FOREACH (a IN aircraft | CREATE (a)-[:HAS]->(d))
             FOREACH (s IN soldiers | CREATE (s)-[:RESPONSIBLE_FOR]->(d))
             RETURN d.name AS name, d.uuid AS uuid, d.brand AS brand",
        )
        .param("aircraft", drone.aircraft.clone())
        .param("soldier", drone.soldier.clone())
        .param("name", drone.name.clone())
        .param("uuid", drone.uuid.clone())
        .param("brand", drone.brand.clone());

        match self.query_one(q).await? {
            Some(row) => Ok(Some(DroneRecord {
                name: column(&row, "name")?,
                uuid: column(&row, "uuid")?,
                brand: column(&row, "brand")?,
            })),
            None => Ok(None),
        }
    }

    // ── Edge Creation ────────────────────────────────────────────

    /// Create `(from)-[relation]->(to)` between nodes matched by name.
    pub async fn create_edge_by_names(
        &self,
        from: (EntityKind, &str),
        to: (EntityKind, &str),
        relation: RelationType,
    ) -> Result<Vec<RelationshipRecord>, GraphError> {
        let from_label = from.0.label();
        let to_label = to.0.label();
        let rel_type = relation.as_cypher();
        let cypher = format!(
            "MATCH (a:{from_label} {{name: $from}}), (b:{to_label} {{name: $to}})
             CREATE (a)-[:{rel_type}]->(b)
             RETURN a.name AS source, b.name AS target"
        );

        let q = query(&cypher)
            .param("from", from.1.to_string())
            .param("to", to.1.to_string());

        let rows = self.query_rows(q).await?;
        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            results.push(RelationshipRecord::new(
                column(&row, "source")?,
                column(&row, "target")?,
                relation,
            ));
        }
        Ok(results)
    }

    // ── Deletion ─────────────────────────────────────────────────

    /// Delete a node by kind and uuid, along with all its relationships.
    /// Returns the count of deleted nodes.
    pub async fn delete_entity(&self, kind: EntityKind, uuid: &str) -> Result<i64, GraphError> {
        let label = kind.label();
        let cypher = format!(
            "MATCH (n:{label} {{uuid: $uuid}})
             DETACH DELETE n
             RETURN count(n) AS cnt"
        );

        let q = query(&cypher).param("uuid", uuid.to_string());

        match self.query_one(q).await? {
            Some(row) => count_column(&row, "cnt"),
            None => Ok(0),
        }
    }
}
