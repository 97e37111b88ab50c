//! End-to-end console behaviour over the in-memory store.

use hangar_console::{parse_line, Console, Flow, ViewExporter};
use hangar_gate::{ManualClock, SessionGate, SessionState};
use hangar_graph::{FleetRepository, MemoryStore};

const PASSWORD: &str = "tower-7";

fn console() -> (Console<MemoryStore, ManualClock>, ManualClock) {
    let clock = ManualClock::new(1_700_000_000);
    let gate = SessionGate::with_clock(PASSWORD, 3600, clock.clone());
    (Console::new(gate, FleetRepository::new(MemoryStore::new())), clock)
}

/// Run one line and return what the console printed.
async fn run(console: &mut Console<MemoryStore, ManualClock>, line: &str) -> String {
    let command = parse_line(line).unwrap().unwrap();
    let mut out = Vec::new();
    console.execute(command, &mut out).await.unwrap();
    String::from_utf8(out).unwrap()
}

async fn login(console: &mut Console<MemoryStore, ManualClock>) {
    let out = run(console, &format!("login {PASSWORD}")).await;
    assert!(out.contains("Login successful"), "{out}");
}

#[tokio::test]
async fn test_commands_are_gated() {
    let (mut console, _) = console();
    let out = run(&mut console, "aircraft add A1").await;
    assert!(out.contains("Not logged in"), "{out}");
    assert_eq!(console.repository().store().edge_count(), 0);

    let out = run(&mut console, "login wrong").await;
    assert!(out.contains("Incorrect password"), "{out}");
    assert_eq!(console.session().state(), SessionState::Unauthenticated);
}

#[tokio::test]
async fn test_actions_list_needs_no_login() {
    let (mut console, _) = console();
    let out = run(&mut console, "actions").await;
    assert!(out.contains("Statistics"));
    assert!(out.contains("Delete Entity"));
}

#[tokio::test]
async fn test_full_scenario() {
    let (mut console, _) = console();
    login(&mut console).await;

    assert!(run(&mut console, "aircraft add A1").await.contains("added successfully"));
    assert!(run(&mut console, "soldier add S1").await.contains("added successfully"));
    let out = run(&mut console, "drone add D1 --aircraft A1 --soldier S1 --brand Acme").await;
    assert!(out.contains("Drone 'D1' of brand 'Acme' added"), "{out}");

    let stats = run(&mut console, "stats").await;
    assert!(stats.contains("Total Aircraft: 1"));
    assert!(stats.contains("Total Soldiers: 1"));
    assert!(stats.contains("Total Drones: 1"));

    let dup = run(&mut console, "drone add D1 --aircraft A1 --soldier S1 --brand Other").await;
    assert!(dup.contains("already exists"), "{dup}");
    assert!(run(&mut console, "stats").await.contains("Total Drones: 1"));

    let rels = run(&mut console, "relations aircraft").await;
    assert!(rels.contains("HAS"), "{rels}");
    let rels = run(&mut console, "relations soldier").await;
    assert!(rels.contains("RESPONSIBLE_FOR"), "{rels}");

    let out = run(&mut console, "relate A1 D1 MONITORS").await;
    assert!(out.contains("Relationship MONITORS added"), "{out}");
    let out = run(&mut console, "relate A1 ghost MONITORS").await;
    assert!(out.contains("Check the entity names"), "{out}");
    assert!(out.contains("Known aircrafts: A1"), "{out}");
    assert!(out.contains("Known drones: D1"), "{out}");
}

#[tokio::test]
async fn test_unresolved_names_list_candidates() {
    let (mut console, _) = console();
    login(&mut console).await;
    run(&mut console, "aircraft add A1").await;
    run(&mut console, "aircraft add A2").await;

    let out = run(&mut console, "drone add D1 --aircraft A1 --soldier nobody --brand Acme").await;
    assert!(out.contains("Failed to add drone 'D1'"), "{out}");
    assert!(out.contains("Known aircrafts: A1, A2"), "{out}");
    assert!(out.contains("No soldiers recorded yet"), "{out}");
    assert!(run(&mut console, "stats").await.contains("Total Drones: 0"));
}

#[tokio::test]
async fn test_delete_by_uuid() {
    let (mut console, _) = console();
    login(&mut console).await;
    run(&mut console, "soldier add S1").await;

    let uuid = {
        let listed = console
            .repository()
            .list(hangar_core::EntityKind::Soldier)
            .await;
        listed.first().unwrap().uuid.clone()
    };

    let out = run(&mut console, &format!("delete soldier {uuid}")).await;
    assert!(out.contains("deleted successfully"), "{out}");
    let out = run(&mut console, "soldier list").await;
    assert!(out.contains("No soldiers found"), "{out}");

    let out = run(&mut console, &format!("delete soldier {uuid}")).await;
    assert!(out.contains("Failed to delete Soldier"), "{out}");
}

#[tokio::test]
async fn test_session_expires_after_an_hour() {
    let (mut console, clock) = console();
    login(&mut console).await;
    assert!(console.is_unlocked());

    clock.advance(3599);
    assert!(run(&mut console, "stats").await.contains("Total Aircraft"));

    clock.advance(1);
    let out = run(&mut console, "stats").await;
    assert!(out.contains("Session expired"), "{out}");
    assert_eq!(console.session().state(), SessionState::Unauthenticated);

    login(&mut console).await;
    assert!(run(&mut console, "stats").await.contains("Total Aircraft"));
}

#[tokio::test]
async fn test_logout_locks_console() {
    let (mut console, _) = console();
    login(&mut console).await;
    assert!(run(&mut console, "logout").await.contains("logged out"));
    assert!(!console.is_unlocked());
    assert!(run(&mut console, "stats").await.contains("Not logged in"));
}

#[tokio::test]
async fn test_store_failure_is_reported() {
    let (mut console, _) = console();
    login(&mut console).await;
    console
        .repository()
        .store()
        .set_unavailable(Some("connection refused"));

    let out = run(&mut console, "aircraft list").await;
    assert!(out.contains("Error executing query"), "{out}");
    assert!(out.contains("connection refused"), "{out}");
}

#[tokio::test]
async fn test_list_exports_graph_view() {
    let dir = tempfile::tempdir().unwrap();
    let (console, _) = console();
    let mut console = console.with_exporter(ViewExporter::new(dir.path()));
    login(&mut console).await;
    run(&mut console, "aircraft add \"Sky Tanker\"").await;

    let out = run(&mut console, "aircraft list").await;
    assert!(out.contains("Sky Tanker"), "{out}");
    assert!(out.contains("Graph view written"), "{out}");

    let json: serde_json::Value =
        serde_json::from_slice(&std::fs::read(dir.path().join("aircrafts.json")).unwrap()).unwrap();
    assert_eq!(json["nodes"][0]["label"], "Sky Tanker");
}

#[tokio::test]
async fn test_quit() {
    let (mut console, _) = console();
    let command = parse_line("quit").unwrap().unwrap();
    let mut out = Vec::new();
    assert_eq!(console.execute(command, &mut out).await.unwrap(), Flow::Quit);
}
