//! Graph views handed to an external renderer.
//!
//! A view is a plain list of labelled, coloured nodes and titled edges,
//! serialised as JSON. Nothing flows back from the renderer.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use hangar_core::{EntityKind, EntityRecord, RelationshipRecord};

pub const PRIMARY_COLOR: &str = "blue";
pub const DRONE_COLOR: &str = "green";
pub const RESPONSIBILITY_COLOR: &str = "orange";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ViewNode {
    pub id: String,
    pub label: String,
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ViewEdge {
    pub from: String,
    pub to: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'static str>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GraphView {
    pub title: String,
    pub nodes: Vec<ViewNode>,
    pub edges: Vec<ViewEdge>,
    #[serde(skip)]
    seen: HashSet<String>,
}

impl GraphView {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Add a node unless one with the same id is already present.
    fn add_node(&mut self, id: String, label: &str, color: &'static str) {
        if self.seen.insert(id.clone()) {
            self.nodes.push(ViewNode {
                id,
                label: label.to_string(),
                color,
            });
        }
    }

    /// One node per listed entity; drones are keyed by brand and name.
    pub fn from_entities(title: impl Into<String>, entities: &[EntityRecord]) -> Self {
        let mut view = Self::new(title);
        for e in entities {
            let id = match (&e.kind, &e.brand) {
                (EntityKind::Drone, Some(brand)) => format!("{brand}-{}", e.name),
                _ => node_id(e.kind, &e.name),
            };
            view.add_node(id, &e.name, DRONE_COLOR);
        }
        view
    }

    /// Edges from `from` nodes to drones.
    pub fn from_relationships(
        title: impl Into<String>,
        from: EntityKind,
        relationships: &[RelationshipRecord],
    ) -> Self {
        let mut view = Self::new(title);
        for r in relationships {
            let source = node_id(from, &r.from);
            let target = node_id(EntityKind::Drone, &r.to);
            view.add_node(source.clone(), &r.from, PRIMARY_COLOR);
            view.add_node(target.clone(), &r.to, DRONE_COLOR);

            let (title, color) = match from {
                EntityKind::Soldier => ("Responsible for".to_string(), Some(RESPONSIBILITY_COLOR)),
                _ => (r.relation.clone(), None),
            };
            view.edges.push(ViewEdge {
                from: source,
                to: target,
                title,
                color,
            });
        }
        view
    }
}

fn node_id(kind: EntityKind, name: &str) -> String {
    format!("{}:{name}", kind.label())
}

/// Writes views as `<dir>/<name>.json`.
#[derive(Debug, Clone)]
pub struct ViewExporter {
    dir: PathBuf,
}

impl ViewExporter {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn export(&self, name: &str, view: &GraphView) -> anyhow::Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(format!("{name}.json"));
        fs::write(&path, serde_json::to_vec_pretty(view)?)?;
        tracing::debug!(path = %path.display(), nodes = view.nodes.len(), "Graph view exported");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hangar_core::RelationType;

    fn entity(kind: EntityKind, name: &str, brand: Option<&str>) -> EntityRecord {
        EntityRecord {
            kind,
            name: name.to_string(),
            uuid: format!("uuid-{name}"),
            brand: brand.map(str::to_string),
        }
    }

    #[test]
    fn test_drone_nodes_keyed_by_brand() {
        let view = GraphView::from_entities(
            "Drones",
            &[
                entity(EntityKind::Drone, "D1", Some("Acme")),
                entity(EntityKind::Drone, "D2", Some("Zephyr")),
            ],
        );
        let ids: Vec<&str> = view.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["Acme-D1", "Zephyr-D2"]);
        assert!(view.nodes.iter().all(|n| n.color == DRONE_COLOR));
        assert!(view.edges.is_empty());
    }

    #[test]
    fn test_same_named_entities_share_a_node() {
        let view = GraphView::from_entities(
            "Aircrafts",
            &[
                entity(EntityKind::Aircraft, "A1", None),
                entity(EntityKind::Aircraft, "A1", None),
            ],
        );
        assert_eq!(view.nodes.len(), 1);
    }

    #[test]
    fn test_aircraft_relationship_view() {
        let rels = vec![
            RelationshipRecord::new("A1", "D1", RelationType::Has),
            RelationshipRecord::new("A1", "D2", RelationType::Monitors),
        ];
        let view = GraphView::from_relationships("Aircraft-Drone", EntityKind::Aircraft, &rels);
        assert_eq!(view.nodes.len(), 3);
        assert_eq!(view.nodes[0].color, PRIMARY_COLOR);
        assert_eq!(view.edges[1].title, "MONITORS");
        assert_eq!(view.edges[1].color, None);
    }

    #[test]
    fn test_soldier_relationship_view() {
        let rels = vec![RelationshipRecord::new("S1", "D1", RelationType::ResponsibleFor)];
        let view = GraphView::from_relationships("Soldier-Drone", EntityKind::Soldier, &rels);
        assert_eq!(view.edges[0].title, "Responsible for");
        assert_eq!(view.edges[0].color, Some(RESPONSIBILITY_COLOR));
        assert_eq!(view.edges[0].from, "Soldier:S1");
        assert_eq!(view.edges[0].to, "Drone:D1");
    }

    #[test]
    fn test_export_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = ViewExporter::new(dir.path().join("views"));
        let view = GraphView::from_entities("Soldiers", &[entity(EntityKind::Soldier, "S1", None)]);

        let path = exporter.export("soldiers", &view).unwrap();
        let json: serde_json::Value =
            serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap();
        assert_eq!(json["title"], "Soldiers");
        assert_eq!(json["nodes"][0]["label"], "S1");
        assert!(json.get("seen").is_none());
    }
}
