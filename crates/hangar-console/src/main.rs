//! CLI entry point for the Hangar fleet console.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use hangar_core::HangarConfig;
use hangar_gate::SessionGate;
use hangar_graph::{FleetRepository, FleetStore, GraphClient, GraphConfig, MemoryStore};

use hangar_console::{Console, ViewExporter};

#[derive(Parser)]
#[command(name = "hangar")]
#[command(about = "Password-gated console for the aircraft, drone and soldier graph")]
struct Cli {
    /// Config file prefix (default: hangar).
    #[arg(short, long, default_value = "hangar")]
    config: String,

    /// Keep the graph in memory instead of connecting to Neo4j.
    #[arg(long)]
    offline: bool,

    /// Write graph-view JSON here after list commands (overrides config).
    #[arg(long)]
    export_dir: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let config = HangarConfig::load(&cli.config)?;
    let gate = SessionGate::from_settings(&config.gate);
    let export_dir = cli.export_dir.or(config.console.export_dir.clone());

    if cli.offline {
        tracing::warn!("Running offline: changes are lost on exit");
        run(gate, MemoryStore::new(), export_dir).await
    } else {
        // Without a store there is nothing to administer.
        let graph = GraphClient::connect(&GraphConfig::from(&config.neo4j)).await?;
        run(gate, graph, export_dir).await
    }
}

async fn run<S: FleetStore>(
    gate: SessionGate,
    store: S,
    export_dir: Option<String>,
) -> anyhow::Result<()> {
    let mut console = Console::new(gate, FleetRepository::new(store));
    if let Some(dir) = export_dir {
        console = console.with_exporter(ViewExporter::new(dir));
    }
    console.run_interactive().await
}
