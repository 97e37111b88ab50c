//! The store seam: raw graph operations without error containment.

use async_trait::async_trait;

use hangar_core::{DroneRecord, EntityKind, EntityRecord, RelationType, RelationshipRecord};

use crate::client::{GraphClient, GraphError};

/// Everything needed to create a drone together with its links.
#[derive(Debug, Clone)]
pub struct NewDrone {
    pub name: String,
    pub uuid: String,
    pub brand: String,
    /// Name of the carrying aircraft (`HAS` edge).
    pub aircraft: String,
    /// Name of the responsible soldier (`RESPONSIBLE_FOR` edge).
    pub soldier: String,
}

/// Graph operations backing the fleet repository.
///
/// Implementations report failures as [`GraphError`]; the repository
/// decides what callers see.
#[async_trait]
pub trait FleetStore: Send + Sync {
    /// Create one node of `kind`. `None` if the statement returned no row.
    async fn create_entity(
        &self,
        kind: EntityKind,
        name: &str,
        uuid: &str,
    ) -> Result<Option<EntityRecord>, GraphError>;

    /// Look up a drone by name.
    async fn find_drone(&self, name: &str) -> Result<Option<EntityRecord>, GraphError>;

    /// Create a drone linked to its aircraft and soldier in one statement.
    ///
    /// Nothing is written unless both endpoints resolve; `None` then.
    async fn create_linked_drone(&self, drone: &NewDrone) -> Result<Option<DroneRecord>, GraphError>;

    /// Create `(from)-[relation]->(to)` between nodes matched by name.
    ///
    /// Returns one record per edge created; empty if either side is missing.
    async fn create_edge(
        &self,
        from: (EntityKind, &str),
        to: (EntityKind, &str),
        relation: RelationType,
    ) -> Result<Vec<RelationshipRecord>, GraphError>;

    async fn list_entities(&self, kind: EntityKind) -> Result<Vec<EntityRecord>, GraphError>;

    /// All edges of any type from `from` nodes to `to` nodes.
    async fn list_relationships(
        &self,
        from: EntityKind,
        to: EntityKind,
    ) -> Result<Vec<RelationshipRecord>, GraphError>;

    /// Detach-delete the node of `kind` with `uuid`. Returns the number removed.
    async fn delete_entity(&self, kind: EntityKind, uuid: &str) -> Result<i64, GraphError>;

    async fn count_entities(&self, kind: EntityKind) -> Result<i64, GraphError>;
}

#[async_trait]
impl FleetStore for GraphClient {
    async fn create_entity(
        &self,
        kind: EntityKind,
        name: &str,
        uuid: &str,
    ) -> Result<Option<EntityRecord>, GraphError> {
        GraphClient::create_entity(self, kind, name, uuid).await
    }

    async fn find_drone(&self, name: &str) -> Result<Option<EntityRecord>, GraphError> {
        self.find_entity_by_name(EntityKind::Drone, name).await
    }

    async fn create_linked_drone(&self, drone: &NewDrone) -> Result<Option<DroneRecord>, GraphError> {
        GraphClient::create_linked_drone(self, drone).await
    }

    async fn create_edge(
        &self,
        from: (EntityKind, &str),
        to: (EntityKind, &str),
        relation: RelationType,
    ) -> Result<Vec<RelationshipRecord>, GraphError> {
        self.create_edge_by_names(from, to, relation).await
    }

    async fn list_entities(&self, kind: EntityKind) -> Result<Vec<EntityRecord>, GraphError> {
        GraphClient::list_entities(self, kind).await
    }

    async fn list_relationships(
        &self,
        from: EntityKind,
        to: EntityKind,
    ) -> Result<Vec<RelationshipRecord>, GraphError> {
        GraphClient::list_relationships(self, from, to).await
    }

    async fn delete_entity(&self, kind: EntityKind, uuid: &str) -> Result<i64, GraphError> {
        GraphClient::delete_entity(self, kind, uuid).await
    }

    async fn count_entities(&self, kind: EntityKind) -> Result<i64, GraphError> {
        GraphClient::count_entities(self, kind).await
    }
}
