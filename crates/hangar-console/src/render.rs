//! Table rendering for repository results.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use hangar_core::{EntityRecord, RelationshipRecord, Statistics};

#[derive(Tabled)]
struct EntityRow<'a> {
    #[tabled(rename = "Name")]
    name: &'a str,
    #[tabled(rename = "UUID")]
    uuid: &'a str,
}

#[derive(Tabled)]
struct DroneRow<'a> {
    #[tabled(rename = "Drone")]
    name: &'a str,
    #[tabled(rename = "UUID")]
    uuid: &'a str,
    #[tabled(rename = "Brand")]
    brand: &'a str,
}

#[derive(Tabled)]
struct RelationshipRow<'a> {
    #[tabled(rename = "From")]
    from: &'a str,
    #[tabled(rename = "Drone")]
    to: &'a str,
    #[tabled(rename = "Relationship")]
    relation: &'a str,
}

fn finish<T: Tabled>(rows: Vec<T>) -> String {
    Table::new(rows).with(Style::psql()).to_string()
}

pub fn entities(records: &[EntityRecord]) -> String {
    finish(
        records
            .iter()
            .map(|r| EntityRow {
                name: &r.name,
                uuid: &r.uuid,
            })
            .collect(),
    )
}

pub fn drones(records: &[EntityRecord]) -> String {
    finish(
        records
            .iter()
            .map(|r| DroneRow {
                name: &r.name,
                uuid: &r.uuid,
                brand: r.brand.as_deref().unwrap_or(""),
            })
            .collect(),
    )
}

pub fn relationships(records: &[RelationshipRecord]) -> String {
    finish(
        records
            .iter()
            .map(|r| RelationshipRow {
                from: &r.from,
                to: &r.to,
                relation: &r.relation,
            })
            .collect(),
    )
}

pub fn statistics(stats: &Statistics) -> String {
    format!(
        "Current Statistics:\n  Total Aircraft: {}\n  Total Soldiers: {}\n  Total Drones: {}",
        stats.aircraft, stats.soldiers, stats.drones
    )
}
