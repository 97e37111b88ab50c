//! Hangar Graph — the fleet repository over Neo4j.
//!
//! All graph reads and writes flow through [`FleetRepository`], which
//! absorbs store failures at its boundary: every operation returns an
//! [`Outcome`] whose rows are empty when nothing happened, with the cause
//! available separately through [`Outcome::failure`].
//!
//! The store itself sits behind the [`FleetStore`] trait, implemented by
//! [`GraphClient`] (Neo4j) and [`MemoryStore`] (in-process).

pub mod client;
pub mod memory;
pub mod mutations;
pub mod queries;
pub mod repository;
pub mod store;

pub use client::{GraphClient, GraphConfig, GraphError};
pub use memory::MemoryStore;
pub use repository::{FleetRepository, Outcome, RepositoryError};
pub use store::{FleetStore, NewDrone};
