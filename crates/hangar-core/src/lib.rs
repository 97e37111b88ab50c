//! hangar-core: Shared types, configuration, and error handling for the Hangar fleet console.
//!
//! This crate provides the foundational types used across all Hangar components:
//! - Entity kinds (Aircraft, Soldier, Drone) stored in the fleet graph
//! - Relationship types, including the aircraft-drone allow-list
//! - Configuration management
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::HangarConfig;
pub use error::HangarError;
pub use types::{
    AircraftDroneRelation, DroneRecord, EntityKind, EntityRecord, RelationType,
    RelationshipRecord, Statistics,
};
