//! The fleet repository: validation, id generation, and error containment
//! on top of a [`FleetStore`].
//!
//! No store error crosses this boundary. A failed call yields an empty
//! [`Outcome`], so "nothing happened" always looks the same to callers
//! that only inspect rows; callers that care can ask [`Outcome::failure`]
//! whether the emptiness came from the store or from a rejection.

use hangar_core::types::new_entity_uuid;
use hangar_core::{
    AircraftDroneRelation, DroneRecord, EntityKind, EntityRecord, RelationType,
    RelationshipRecord, Statistics,
};

use crate::client::GraphError;
use crate::store::{FleetStore, NewDrone};

/// Why an operation produced no rows.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("{0}")]
    Store(#[from] GraphError),

    #[error("Drone with name '{name}' already exists")]
    DuplicateDroneName { name: String },

    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

/// Rows produced by a repository call, plus the reason if there are none
/// because something went wrong.
#[derive(Debug)]
pub struct Outcome<T> {
    rows: Vec<T>,
    failure: Option<RepositoryError>,
}

impl<T> Outcome<T> {
    pub fn from_rows(rows: Vec<T>) -> Self {
        Self { rows, failure: None }
    }

    pub fn failed(err: impl Into<RepositoryError>) -> Self {
        Self {
            rows: Vec::new(),
            failure: Some(err.into()),
        }
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<T> {
        self.rows
    }

    pub fn first(&self) -> Option<&T> {
        self.rows.first()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// `None` both on success and on "no matching data".
    pub fn failure(&self) -> Option<&RepositoryError> {
        self.failure.as_ref()
    }

    pub fn is_failure(&self) -> bool {
        self.failure.is_some()
    }
}

impl<T> IntoIterator for Outcome<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

/// Contain a store result, logging failures.
fn contain<T>(op: &'static str, result: Result<Vec<T>, GraphError>) -> Outcome<T> {
    match result {
        Ok(rows) => Outcome::from_rows(rows),
        Err(e) => {
            tracing::error!(op, error = %e, "Graph store call failed");
            Outcome::failed(e)
        }
    }
}

fn require(field: &'static str, value: &str) -> Result<(), RepositoryError> {
    if value.trim().is_empty() {
        return Err(RepositoryError::MissingField(field));
    }
    Ok(())
}

/// CRUD over aircraft, soldiers, drones and their relationships.
pub struct FleetRepository<S> {
    store: S,
}

impl<S: FleetStore> FleetRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // ── Creation ─────────────────────────────────────────────────

    /// Create an entity with a freshly generated uuid. Names may repeat.
    pub async fn add_entity(&self, kind: EntityKind, name: &str) -> Outcome<EntityRecord> {
        if let Err(e) = require("name", name) {
            return Outcome::failed(e);
        }
        let uuid = new_entity_uuid();
        let result = self.store.create_entity(kind, name, &uuid).await;
        let outcome = contain("add_entity", result.map(|r| r.into_iter().collect()));
        if !outcome.is_empty() {
            tracing::info!(kind = %kind, name, uuid = %uuid, "Entity added");
        }
        outcome
    }

    /// Create a drone with a unique name, carried by `aircraft` and
    /// operated by `soldier`.
    ///
    /// The name check is a separate read before the write; two concurrent
    /// callers can both pass it.
    pub async fn add_drone(
        &self,
        aircraft: &str,
        drone: &str,
        soldier: &str,
        brand: &str,
    ) -> Outcome<DroneRecord> {
        for (field, value) in [
            ("aircraft", aircraft),
            ("drone", drone),
            ("soldier", soldier),
            ("brand", brand),
        ] {
            if let Err(e) = require(field, value) {
                return Outcome::failed(e);
            }
        }

        match self.store.find_drone(drone).await {
            Ok(Some(_)) => {
                tracing::warn!(drone, "Rejected duplicate drone name");
                return Outcome::failed(RepositoryError::DuplicateDroneName {
                    name: drone.to_string(),
                });
            }
            Ok(None) => {}
            Err(e) => return contain("add_drone", Err(e)),
        }

        let new_drone = NewDrone {
            name: drone.to_string(),
            uuid: new_entity_uuid(),
            brand: brand.to_string(),
            aircraft: aircraft.to_string(),
            soldier: soldier.to_string(),
        };
        let result = self.store.create_linked_drone(&new_drone).await;
        let outcome = contain("add_drone", result.map(|r| r.into_iter().collect()));
        match outcome.first() {
            Some(d) => tracing::info!(drone = %d.name, uuid = %d.uuid, aircraft, soldier, "Drone added"),
            None if !outcome.is_failure() => {
                tracing::warn!(drone, aircraft, soldier, "Drone not added: aircraft or soldier not found")
            }
            None => {}
        }
        outcome
    }

    /// Draw an allow-listed relationship from an aircraft to a drone.
    pub async fn add_relationship(
        &self,
        aircraft: &str,
        drone: &str,
        relation: AircraftDroneRelation,
    ) -> Outcome<RelationshipRecord> {
        let result = self
            .store
            .create_edge(
                (EntityKind::Aircraft, aircraft),
                (EntityKind::Drone, drone),
                relation.relation_type(),
            )
            .await;
        let outcome = contain("add_relationship", result);
        if !outcome.is_empty() {
            tracing::info!(aircraft, drone, relation = %relation, edges = outcome.len(), "Relationship added");
        }
        outcome
    }

    /// Make `soldier` responsible for `drone`.
    pub async fn assign_soldier(&self, soldier: &str, drone: &str) -> Outcome<RelationshipRecord> {
        let result = self
            .store
            .create_edge(
                (EntityKind::Soldier, soldier),
                (EntityKind::Drone, drone),
                RelationType::ResponsibleFor,
            )
            .await;
        let outcome = contain("assign_soldier", result);
        if !outcome.is_empty() {
            tracing::info!(soldier, drone, "Soldier assigned");
        }
        outcome
    }

    // ── Reads ────────────────────────────────────────────────────

    pub async fn list(&self, kind: EntityKind) -> Outcome<EntityRecord> {
        contain("list", self.store.list_entities(kind).await)
    }

    /// Names of every entity of `kind`, for pick lists.
    pub async fn names(&self, kind: EntityKind) -> Outcome<String> {
        let result = self
            .store
            .list_entities(kind)
            .await
            .map(|rows| rows.into_iter().map(|r| r.name).collect());
        contain("names", result)
    }

    pub async fn list_relationships(
        &self,
        from: EntityKind,
        to: EntityKind,
    ) -> Outcome<RelationshipRecord> {
        contain(
            "list_relationships",
            self.store.list_relationships(from, to).await,
        )
    }

    /// Node counts; one row, or none if any count failed.
    pub async fn statistics(&self) -> Outcome<Statistics> {
        let counts = async {
            Ok::<_, GraphError>(Statistics {
                aircraft: self.store.count_entities(EntityKind::Aircraft).await?,
                soldiers: self.store.count_entities(EntityKind::Soldier).await?,
                drones: self.store.count_entities(EntityKind::Drone).await?,
            })
        }
        .await;
        contain("statistics", counts.map(|s| vec![s]))
    }

    // ── Deletion ─────────────────────────────────────────────────

    /// Detach-delete the entity with `uuid`. Yields the uuid when a node
    /// was removed.
    pub async fn delete(&self, kind: EntityKind, uuid: &str) -> Outcome<String> {
        if let Err(e) = require("uuid", uuid) {
            return Outcome::failed(e);
        }
        let result = self
            .store
            .delete_entity(kind, uuid)
            .await
            .map(|removed| if removed > 0 { vec![uuid.to_string()] } else { Vec::new() });
        let outcome = contain("delete", result);
        if !outcome.is_empty() {
            tracing::info!(kind = %kind, uuid, "Entity deleted");
        }
        outcome
    }
}
