//! Core domain types for the Hangar fleet graph.
//!
//! These types describe the nodes and edges stored in Neo4j and the
//! records handed back to the console for display.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::HangarError;

// ── Entities ──────────────────────────────────────────────────────

/// The node kinds held in the fleet graph.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Aircraft,
    Soldier,
    Drone,
}

impl EntityKind {
    /// Every kind, in the order the console lists them.
    pub const ALL: [EntityKind; 3] = [EntityKind::Aircraft, EntityKind::Soldier, EntityKind::Drone];

    /// The Neo4j node label for this kind.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Aircraft => "Aircraft",
            Self::Soldier => "Soldier",
            Self::Drone => "Drone",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EntityKind {
    type Err = HangarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "aircraft" | "aircrafts" => Ok(Self::Aircraft),
            "soldier" | "soldiers" => Ok(Self::Soldier),
            "drone" | "drones" => Ok(Self::Drone),
            other => Err(HangarError::InvalidInput(format!(
                "unknown entity kind: {other} (expected aircraft, soldier or drone)"
            ))),
        }
    }
}

/// Generate a fresh entity identifier.
///
/// Identifiers are assigned once at creation and never reassigned.
pub fn new_entity_uuid() -> String {
    Uuid::new_v4().to_string()
}

/// A node as listed from the graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntityRecord {
    pub kind: EntityKind,
    pub name: String,
    pub uuid: String,
    /// Only drones carry a brand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
}

/// A drone as returned by drone creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DroneRecord {
    pub name: String,
    pub uuid: String,
    pub brand: String,
}

// ── Relationships ─────────────────────────────────────────────────

/// Every relationship type the console can create.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationType {
    /// Aircraft carries a drone; created with the drone.
    Has,
    /// Soldier operates a drone.
    ResponsibleFor,
    ConnectedTo,
    Supports,
    Monitors,
}

impl RelationType {
    /// The Cypher relationship type string.
    pub fn as_cypher(&self) -> &'static str {
        match self {
            Self::Has => "HAS",
            Self::ResponsibleFor => "RESPONSIBLE_FOR",
            Self::ConnectedTo => "CONNECTED_TO",
            Self::Supports => "SUPPORTS",
            Self::Monitors => "MONITORS",
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_cypher())
    }
}

/// The allow-list of relationship types an operator may draw from an
/// aircraft to a drone.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AircraftDroneRelation {
    ConnectedTo,
    Supports,
    Monitors,
}

impl AircraftDroneRelation {
    pub const ALL: [AircraftDroneRelation; 3] = [Self::ConnectedTo, Self::Supports, Self::Monitors];

    pub fn relation_type(&self) -> RelationType {
        match self {
            Self::ConnectedTo => RelationType::ConnectedTo,
            Self::Supports => RelationType::Supports,
            Self::Monitors => RelationType::Monitors,
        }
    }

    pub fn as_cypher(&self) -> &'static str {
        self.relation_type().as_cypher()
    }
}

impl fmt::Display for AircraftDroneRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_cypher())
    }
}

impl FromStr for AircraftDroneRelation {
    type Err = HangarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace('-', "_").as_str() {
            "CONNECTED_TO" => Ok(Self::ConnectedTo),
            "SUPPORTS" => Ok(Self::Supports),
            "MONITORS" => Ok(Self::Monitors),
            other => Err(HangarError::InvalidInput(format!(
                "relationship type {other} is not allowed (expected CONNECTED_TO, SUPPORTS or MONITORS)"
            ))),
        }
    }
}

/// A directed edge between two named nodes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RelationshipRecord {
    pub from: String,
    pub to: String,
    /// Raw Cypher type, e.g. `HAS`.
    pub relation: String,
}

impl RelationshipRecord {
    pub fn new(from: impl Into<String>, to: impl Into<String>, relation: RelationType) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            relation: relation.as_cypher().to_string(),
        }
    }
}

// ── Statistics ────────────────────────────────────────────────────

/// Node counts per kind.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Statistics {
    pub aircraft: i64,
    pub soldiers: i64,
    pub drones: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_kind_parse() {
        assert_eq!("Aircraft".parse::<EntityKind>().unwrap(), EntityKind::Aircraft);
        assert_eq!("soldiers".parse::<EntityKind>().unwrap(), EntityKind::Soldier);
        assert_eq!(" DRONE ".parse::<EntityKind>().unwrap(), EntityKind::Drone);
        assert!("tank".parse::<EntityKind>().is_err());
    }

    #[test]
    fn test_entity_kind_labels() {
        let labels: Vec<&str> = EntityKind::ALL.iter().map(|k| k.label()).collect();
        assert_eq!(labels, vec!["Aircraft", "Soldier", "Drone"]);
    }

    #[test]
    fn test_relation_allow_list() {
        assert_eq!(
            "connected_to".parse::<AircraftDroneRelation>().unwrap(),
            AircraftDroneRelation::ConnectedTo
        );
        assert_eq!(
            "MONITORS".parse::<AircraftDroneRelation>().unwrap().as_cypher(),
            "MONITORS"
        );
        // HAS is created with the drone, never drawn by hand.
        assert!("HAS".parse::<AircraftDroneRelation>().is_err());
        assert!("DELETE_ALL".parse::<AircraftDroneRelation>().is_err());
    }

    #[test]
    fn test_relation_serde_uses_cypher_names() {
        let json = serde_json::to_string(&RelationType::ResponsibleFor).unwrap();
        assert_eq!(json, "\"RESPONSIBLE_FOR\"");
    }

    #[test]
    fn test_uuids_are_unique() {
        assert_ne!(new_entity_uuid(), new_entity_uuid());
    }
}
