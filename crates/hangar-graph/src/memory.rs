//! In-process [`FleetStore`] with the same matching semantics as the
//! Cypher statements in this crate.
//!
//! Useful for tests and for exercising the console without a database.
//! Failures can be injected with [`MemoryStore::set_unavailable`].

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use hangar_core::{DroneRecord, EntityKind, EntityRecord, RelationType, RelationshipRecord};

use crate::client::GraphError;
use crate::store::{FleetStore, NewDrone};

#[derive(Debug, Clone)]
struct MemEdge {
    from: String,
    to: String,
    relation: RelationType,
}

#[derive(Debug, Default)]
struct MemGraph {
    nodes: Vec<EntityRecord>,
    edges: Vec<MemEdge>,
    unavailable: Option<String>,
}

impl MemGraph {
    fn find(&self, uuid: &str) -> Option<&EntityRecord> {
        self.nodes.iter().find(|n| n.uuid == uuid)
    }

    fn uuids_named(&self, kind: EntityKind, name: &str) -> Vec<String> {
        self.nodes
            .iter()
            .filter(|n| n.kind == kind && n.name == name)
            .map(|n| n.uuid.clone())
            .collect()
    }
}

/// A graph held in memory behind a mutex.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<MemGraph>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with `GraphError::Unavailable`,
    /// or restore normal operation with `None`.
    pub fn set_unavailable(&self, reason: Option<&str>) {
        let mut graph = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        graph.unavailable = reason.map(str::to_string);
    }

    /// Total number of edges of any type.
    pub fn edge_count(&self) -> usize {
        let graph = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        graph.edges.len()
    }

    fn graph(&self) -> Result<MutexGuard<'_, MemGraph>, GraphError> {
        let graph = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        match &graph.unavailable {
            Some(reason) => Err(GraphError::Unavailable(reason.clone())),
            None => Ok(graph),
        }
    }
}

#[async_trait]
impl FleetStore for MemoryStore {
    async fn create_entity(
        &self,
        kind: EntityKind,
        name: &str,
        uuid: &str,
    ) -> Result<Option<EntityRecord>, GraphError> {
        let mut graph = self.graph()?;
        let record = EntityRecord {
            kind,
            name: name.to_string(),
            uuid: uuid.to_string(),
            brand: None,
        };
        graph.nodes.push(record.clone());
        Ok(Some(record))
    }

    async fn find_drone(&self, name: &str) -> Result<Option<EntityRecord>, GraphError> {
        let graph = self.graph()?;
        Ok(graph
            .nodes
            .iter()
            .find(|n| n.kind == EntityKind::Drone && n.name == name)
            .cloned())
    }

    async fn create_linked_drone(&self, drone: &NewDrone) -> Result<Option<DroneRecord>, GraphError> {
        let mut graph = self.graph()?;
        let aircraft = graph.uuids_named(EntityKind::Aircraft, &drone.aircraft);
        let soldiers = graph.uuids_named(EntityKind::Soldier, &drone.soldier);
        if aircraft.is_empty() || soldiers.is_empty() {
            return Ok(None);
        }

        graph.nodes.push(EntityRecord {
            kind: EntityKind::Drone,
            name: drone.name.clone(),
            uuid: drone.uuid.clone(),
            brand: Some(drone.brand.clone()),
        });
        for a in aircraft {
            graph.edges.push(MemEdge {
                from: a,
                to: drone.uuid.clone(),
                relation: RelationType::Has,
            });
        }
        for s in soldiers {
            graph.edges.push(MemEdge {
                from: s,
                to: drone.uuid.clone(),
                relation: RelationType::ResponsibleFor,
            });
        }

        Ok(Some(DroneRecord {
            name: drone.name.clone(),
            uuid: drone.uuid.clone(),
            brand: drone.brand.clone(),
        }))
    }

    async fn create_edge(
        &self,
        from: (EntityKind, &str),
        to: (EntityKind, &str),
        relation: RelationType,
    ) -> Result<Vec<RelationshipRecord>, GraphError> {
        let mut graph = self.graph()?;
        let sources = graph.uuids_named(from.0, from.1);
        let targets = graph.uuids_named(to.0, to.1);

        // Cartesian product, like a two-pattern MATCH.
        let mut created = Vec::new();
        for s in &sources {
            for t in &targets {
                graph.edges.push(MemEdge {
                    from: s.clone(),
                    to: t.clone(),
                    relation,
                });
                created.push(RelationshipRecord::new(from.1, to.1, relation));
            }
        }
        Ok(created)
    }

    async fn list_entities(&self, kind: EntityKind) -> Result<Vec<EntityRecord>, GraphError> {
        let graph = self.graph()?;
        let mut nodes: Vec<EntityRecord> =
            graph.nodes.iter().filter(|n| n.kind == kind).cloned().collect();
        nodes.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(nodes)
    }

    async fn list_relationships(
        &self,
        from: EntityKind,
        to: EntityKind,
    ) -> Result<Vec<RelationshipRecord>, GraphError> {
        let graph = self.graph()?;
        let mut records = Vec::new();
        for edge in &graph.edges {
            if let (Some(a), Some(b)) = (graph.find(&edge.from), graph.find(&edge.to)) {
                if a.kind == from && b.kind == to {
                    records.push(RelationshipRecord::new(&a.name, &b.name, edge.relation));
                }
            }
        }
        records.sort_by(|x, y| (&x.from, &x.to).cmp(&(&y.from, &y.to)));
        Ok(records)
    }

    async fn delete_entity(&self, kind: EntityKind, uuid: &str) -> Result<i64, GraphError> {
        let mut graph = self.graph()?;
        let before = graph.nodes.len();
        graph.nodes.retain(|n| !(n.kind == kind && n.uuid == uuid));
        let removed = (before - graph.nodes.len()) as i64;
        if removed > 0 {
            graph.edges.retain(|e| e.from != uuid && e.to != uuid);
        }
        Ok(removed)
    }

    async fn count_entities(&self, kind: EntityKind) -> Result<i64, GraphError> {
        let graph = self.graph()?;
        Ok(graph.nodes.iter().filter(|n| n.kind == kind).count() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_edge_needs_both_endpoints() {
        let store = MemoryStore::new();
        store
            .create_entity(EntityKind::Aircraft, "A1", "a-1")
            .await
            .unwrap();

        let created = store
            .create_edge(
                (EntityKind::Aircraft, "A1"),
                (EntityKind::Drone, "ghost"),
                RelationType::Monitors,
            )
            .await
            .unwrap();
        assert!(created.is_empty());
        assert_eq!(store.edge_count(), 0);
    }

    #[tokio::test]
    async fn test_delete_requires_matching_kind() {
        let store = MemoryStore::new();
        store
            .create_entity(EntityKind::Soldier, "S1", "s-1")
            .await
            .unwrap();

        assert_eq!(store.delete_entity(EntityKind::Aircraft, "s-1").await.unwrap(), 0);
        assert_eq!(store.count_entities(EntityKind::Soldier).await.unwrap(), 1);
        assert_eq!(store.delete_entity(EntityKind::Soldier, "s-1").await.unwrap(), 1);
        assert_eq!(store.count_entities(EntityKind::Soldier).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_every_call() {
        let store = MemoryStore::new();
        store.set_unavailable(Some("connection reset"));
        let err = store.count_entities(EntityKind::Drone).await.unwrap_err();
        assert!(matches!(err, GraphError::Unavailable(_)));

        store.set_unavailable(None);
        assert_eq!(store.count_entities(EntityKind::Drone).await.unwrap(), 0);
    }
}
