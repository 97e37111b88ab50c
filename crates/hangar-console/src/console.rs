//! The console session: gate every command, dispatch to the repository,
//! and render what comes back.

use std::io::Write;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use hangar_core::{EntityKind, EntityRecord, RelationshipRecord};
use hangar_gate::{AuthError, Clock, Session, SessionGate, SystemClock};
use hangar_graph::{FleetRepository, FleetStore, Outcome, RepositoryError};

use crate::actions::{parse_line, Action, Command, DroneOp, EntityOp, RelationScope};
use crate::render;
use crate::view::{GraphView, ViewExporter};

/// Whether the loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// One operator's console: a session, the gate guarding it, and the
/// repository behind it.
pub struct Console<S, C: Clock = SystemClock> {
    gate: SessionGate<C>,
    session: Session,
    repo: FleetRepository<S>,
    exporter: Option<ViewExporter>,
}

impl<S: FleetStore, C: Clock> Console<S, C> {
    pub fn new(gate: SessionGate<C>, repo: FleetRepository<S>) -> Self {
        Self {
            gate,
            session: Session::new(),
            repo,
            exporter: None,
        }
    }

    pub fn with_exporter(mut self, exporter: ViewExporter) -> Self {
        self.exporter = Some(exporter);
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn repository(&self) -> &FleetRepository<S> {
        &self.repo
    }

    pub fn is_unlocked(&self) -> bool {
        self.gate.is_authenticated(&self.session)
    }

    /// Run one command, writing user-facing output to `out`.
    pub async fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> anyhow::Result<Flow> {
        match command {
            Command::Login { password } => {
                let attempt = password.unwrap_or_default();
                match self.gate.login(&mut self.session, &attempt) {
                    Ok(()) => writeln!(out, "Login successful!")?,
                    Err(e) => writeln!(out, "{e}.")?,
                }
                return Ok(Flow::Continue);
            }
            Command::Logout => {
                self.gate.logout(&mut self.session);
                writeln!(out, "You have been logged out!")?;
                return Ok(Flow::Continue);
            }
            Command::Quit => return Ok(Flow::Quit),
            Command::Actions => {
                for action in Action::ALL {
                    writeln!(out, "{:<36} {}", action.label(), action.usage())?;
                }
                return Ok(Flow::Continue);
            }
            _ => {}
        }

        if let Err(e) = self.gate.check(&self.session) {
            if e == AuthError::Expired {
                // Drop the stale token so the prompt shows the console as locked.
                self.gate.logout(&mut self.session);
            }
            writeln!(out, "{e}. Use `login` first.")?;
            return Ok(Flow::Continue);
        }

        if let Some(action) = command.action() {
            tracing::debug!(action = %action, "Dispatching");
        }

        match command {
            Command::Stats => {
                let outcome = self.repo.statistics().await;
                match outcome.first() {
                    Some(stats) => writeln!(out, "{}", render::statistics(stats))?,
                    None => report_failure(out, &outcome, "Statistics are unavailable.")?,
                }
            }
            Command::Aircraft { op } => self.entity_op(EntityKind::Aircraft, op, out).await?,
            Command::Soldier { op } => self.entity_op(EntityKind::Soldier, op, out).await?,
            Command::Drone { op } => match op {
                DroneOp::Add {
                    name,
                    aircraft,
                    soldier,
                    brand,
                } => {
                    let outcome = self.repo.add_drone(&aircraft, &name, &soldier, &brand).await;
                    if outcome.is_empty() {
                        report_failure(
                            out,
                            &outcome,
                            &format!("Failed to add drone '{name}'. Check the aircraft and soldier names."),
                        )?;
                        if outcome.failure().is_none() {
                            self.known_names(EntityKind::Aircraft, out).await?;
                            self.known_names(EntityKind::Soldier, out).await?;
                        }
                    } else {
                        writeln!(
                            out,
                            "Drone '{name}' of brand '{brand}' added and assigned to Soldier '{soldier}'."
                        )?;
                    }
                }
                DroneOp::List => self.list(EntityKind::Drone, out).await?,
                DroneOp::Delete { uuid } => self.delete(EntityKind::Drone, &uuid, out).await?,
            },
            Command::Relate {
                aircraft,
                drone,
                relation,
            } => {
                let outcome = self.repo.add_relationship(&aircraft, &drone, relation).await;
                if outcome.is_empty() {
                    report_failure(out, &outcome, "Failed to add relationship. Check the entity names.")?;
                    if outcome.failure().is_none() {
                        self.known_names(EntityKind::Aircraft, out).await?;
                        self.known_names(EntityKind::Drone, out).await?;
                    }
                } else {
                    writeln!(out, "Relationship {relation} added between {aircraft} and {drone}.")?;
                }
            }
            Command::Assign { soldier, drone } => {
                let outcome = self.repo.assign_soldier(&soldier, &drone).await;
                if outcome.is_empty() {
                    report_failure(out, &outcome, &format!("Failed to assign Soldier to Drone '{drone}'."))?;
                    if outcome.failure().is_none() {
                        self.known_names(EntityKind::Soldier, out).await?;
                        self.known_names(EntityKind::Drone, out).await?;
                    }
                } else {
                    writeln!(out, "Soldier '{soldier}' has been assigned to Drone '{drone}'.")?;
                }
            }
            Command::Relations { from } => self.relations(from, out).await?,
            Command::Delete { kind, uuid } => self.delete(kind, &uuid, out).await?,
            Command::Login { .. } | Command::Logout | Command::Actions | Command::Quit => {}
        }

        Ok(Flow::Continue)
    }

    async fn entity_op<W: Write>(&self, kind: EntityKind, op: EntityOp, out: &mut W) -> anyhow::Result<()> {
        match op {
            EntityOp::Add { name } => {
                let outcome = self.repo.add_entity(kind, &name).await;
                if outcome.is_empty() {
                    report_failure(out, &outcome, &format!("Failed to add {kind} '{name}'."))?;
                } else {
                    writeln!(out, "{kind} '{name}' added successfully.")?;
                }
            }
            EntityOp::List => self.list(kind, out).await?,
            EntityOp::Delete { uuid } => self.delete(kind, &uuid, out).await?,
        }
        Ok(())
    }

    async fn list<W: Write>(&self, kind: EntityKind, out: &mut W) -> anyhow::Result<()> {
        let outcome = self.repo.list(kind).await;
        if outcome.is_empty() {
            let plural = plural(kind);
            return report_failure(out, &outcome, &format!("No {plural} found in the database."));
        }

        let records: Vec<EntityRecord> = outcome.into_rows();
        let table = match kind {
            EntityKind::Drone => render::drones(&records),
            _ => render::entities(&records),
        };
        writeln!(out, "All {} in the Database\n{table}", capitalize(plural(kind)))?;

        let view = GraphView::from_entities(capitalize(plural(kind)), &records);
        self.export(plural(kind), &view, out)
    }

    async fn relations<W: Write>(&self, from: RelationScope, out: &mut W) -> anyhow::Result<()> {
        let kind = from.kind();
        let outcome = self.repo.list_relationships(kind, EntityKind::Drone).await;
        if outcome.is_empty() {
            return report_failure(out, &outcome, "No relationships found.");
        }

        let records: Vec<RelationshipRecord> = outcome.into_rows();
        writeln!(
            out,
            "Relationships between {kind} and Drones\n{}",
            render::relationships(&records)
        )?;

        let name = match from {
            RelationScope::Aircraft => "aircraft-drone",
            RelationScope::Soldier => "soldier-drone",
        };
        let view = GraphView::from_relationships(format!("{kind}-Drone Relationships"), kind, &records);
        self.export(name, &view, out)
    }

    /// Print the names an unresolved endpoint could have matched.
    async fn known_names<W: Write>(&self, kind: EntityKind, out: &mut W) -> anyhow::Result<()> {
        let names = self.repo.names(kind).await;
        if names.is_failure() {
            return Ok(());
        }
        if names.is_empty() {
            writeln!(out, "  No {} recorded yet.", plural(kind))?;
        } else {
            writeln!(out, "  Known {}: {}", plural(kind), names.into_rows().join(", "))?;
        }
        Ok(())
    }

    async fn delete<W: Write>(&self, kind: EntityKind, uuid: &str, out: &mut W) -> anyhow::Result<()> {
        let outcome = self.repo.delete(kind, uuid).await;
        if outcome.is_empty() {
            report_failure(out, &outcome, &format!("Failed to delete {kind} with UUID {uuid}."))
        } else {
            writeln!(out, "{kind} with UUID {uuid} deleted successfully.")?;
            Ok(())
        }
    }

    fn export<W: Write>(&self, name: &str, view: &GraphView, out: &mut W) -> anyhow::Result<()> {
        if let Some(exporter) = &self.exporter {
            match exporter.export(name, view) {
                Ok(path) => writeln!(out, "Graph view written to {}", path.display())?,
                // Presentation only; a failed export never fails the action.
                Err(e) => {
                    tracing::warn!(error = %e, "Graph view export failed");
                    writeln!(out, "Could not write graph view: {e}")?;
                }
            }
        }
        Ok(())
    }

    /// Read-eval-print loop on the terminal until `quit` or EOF.
    pub async fn run_interactive(&mut self) -> anyhow::Result<()> {
        let mut editor = DefaultEditor::new()?;
        let mut stdout = std::io::stdout();
        writeln!(stdout, "Military Aircraft, Drone, and Soldier Network")?;
        writeln!(stdout, "Type `login` to unlock, `actions` for commands, `quit` to leave.")?;

        loop {
            let prompt = if self.is_unlocked() { "hangar> " } else { "hangar (locked)> " };
            let line = match editor.readline(prompt) {
                Ok(line) => line,
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
                Err(e) => return Err(e.into()),
            };

            let command = match parse_line(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    writeln!(stdout, "{e}")?;
                    continue;
                }
            };

            let command = match command {
                Command::Login { password: None } => Command::Login {
                    password: Some(rpassword::prompt_password("Enter Password: ")?),
                },
                Command::Login { password: Some(_) } => command,
                other => {
                    if let Err(e) = editor.add_history_entry(line.as_str()) {
                        tracing::debug!(error = %e, "History entry not recorded");
                    }
                    other
                }
            };

            if self.execute(command, &mut stdout).await? == Flow::Quit {
                break;
            }
        }

        self.gate.logout(&mut self.session);
        Ok(())
    }
}

/// Explain an empty outcome: the store or validation reason if there is
/// one, otherwise `fallback`.
fn report_failure<T, W: Write>(out: &mut W, outcome: &Outcome<T>, fallback: &str) -> anyhow::Result<()> {
    match outcome.failure() {
        Some(RepositoryError::Store(e)) => writeln!(out, "Error executing query: {e}")?,
        Some(other) => writeln!(out, "{other}.")?,
        None => writeln!(out, "{fallback}")?,
    }
    Ok(())
}

fn plural(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Aircraft => "aircrafts",
        EntityKind::Soldier => "soldiers",
        EntityKind::Drone => "drones",
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
