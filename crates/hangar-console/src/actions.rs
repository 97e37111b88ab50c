//! The console's action set and command-line grammar.
//!
//! [`Action`] is the fixed sidebar of dashboard sections; [`Command`] is
//! what an operator actually types. Every protected command belongs to
//! exactly one action.

use std::fmt;

use clap::{Parser, Subcommand, ValueEnum};

use hangar_core::{AircraftDroneRelation, EntityKind};

/// Dashboard sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Statistics,
    Aircrafts,
    Soldiers,
    Drones,
    AircraftDroneRelationships,
    SoldierDroneRelationships,
    DeleteEntity,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::Statistics,
        Action::Aircrafts,
        Action::Soldiers,
        Action::Drones,
        Action::AircraftDroneRelationships,
        Action::SoldierDroneRelationships,
        Action::DeleteEntity,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Statistics => "Statistics",
            Self::Aircrafts => "Aircrafts",
            Self::Soldiers => "Soldiers",
            Self::Drones => "Drones",
            Self::AircraftDroneRelationships => "Aircraft and Drones Relationships",
            Self::SoldierDroneRelationships => "Soldiers and Drones Relationships",
            Self::DeleteEntity => "Delete Entity",
        }
    }

    /// Commands that belong to this section.
    pub fn usage(&self) -> &'static str {
        match self {
            Self::Statistics => "stats",
            Self::Aircrafts => "aircraft add <name> | aircraft list | aircraft delete <uuid>",
            Self::Soldiers => "soldier add <name> | soldier list | soldier delete <uuid>",
            Self::Drones => {
                "drone add <name> --aircraft <a> --soldier <s> --brand <b> | drone list | drone delete <uuid>"
            }
            Self::AircraftDroneRelationships => {
                "relate <aircraft> <drone> <CONNECTED_TO|SUPPORTS|MONITORS> | relations aircraft"
            }
            Self::SoldierDroneRelationships => "assign <soldier> <drone> | relations soldier",
            Self::DeleteEntity => "delete <aircraft|soldier|drone> <uuid>",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One console input line.
#[derive(Parser, Debug)]
#[command(name = "hangar", no_binary_name = true, disable_help_flag = true)]
pub struct Line {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Unlock the console. Prompts for the password when omitted.
    Login { password: Option<String> },
    /// Lock the console.
    Logout,
    /// List dashboard sections and their commands.
    Actions,
    /// Count aircraft, soldiers and drones.
    Stats,
    /// Manage aircraft.
    Aircraft {
        #[command(subcommand)]
        op: EntityOp,
    },
    /// Manage soldiers.
    Soldier {
        #[command(subcommand)]
        op: EntityOp,
    },
    /// Manage drones.
    Drone {
        #[command(subcommand)]
        op: DroneOp,
    },
    /// Draw a relationship from an aircraft to a drone.
    Relate {
        aircraft: String,
        drone: String,
        relation: AircraftDroneRelation,
    },
    /// Make a soldier responsible for a drone.
    Assign { soldier: String, drone: String },
    /// Show relationships towards drones.
    Relations {
        #[arg(value_enum)]
        from: RelationScope,
    },
    /// Delete any entity by uuid.
    Delete { kind: EntityKind, uuid: String },
    /// Leave the console.
    #[command(alias = "exit")]
    Quit,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum EntityOp {
    Add { name: String },
    List,
    Delete { uuid: String },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum DroneOp {
    Add {
        name: String,
        #[arg(long)]
        aircraft: String,
        #[arg(long)]
        soldier: String,
        #[arg(long)]
        brand: String,
    },
    List,
    Delete { uuid: String },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationScope {
    Aircraft,
    Soldier,
}

impl RelationScope {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Aircraft => EntityKind::Aircraft,
            Self::Soldier => EntityKind::Soldier,
        }
    }
}

impl Command {
    /// The dashboard section this command belongs to; `None` for
    /// session and navigation commands, which need no login.
    pub fn action(&self) -> Option<Action> {
        match self {
            Self::Login { .. } | Self::Logout | Self::Actions | Self::Quit => None,
            Self::Stats => Some(Action::Statistics),
            Self::Aircraft { .. } => Some(Action::Aircrafts),
            Self::Soldier { .. } => Some(Action::Soldiers),
            Self::Drone { .. } => Some(Action::Drones),
            Self::Relate { .. } => Some(Action::AircraftDroneRelationships),
            Self::Assign { .. } => Some(Action::SoldierDroneRelationships),
            Self::Relations { from } => Some(match from {
                RelationScope::Aircraft => Action::AircraftDroneRelationships,
                RelationScope::Soldier => Action::SoldierDroneRelationships,
            }),
            Self::Delete { .. } => Some(Action::DeleteEntity),
        }
    }
}

/// Errors from reading a console line.
#[derive(Debug, thiserror::Error)]
pub enum LineError {
    #[error("unterminated quote")]
    UnterminatedQuote,

    #[error("{0}")]
    Usage(String),
}

/// Parse one input line. `Ok(None)` for blank lines.
pub fn parse_line(input: &str) -> Result<Option<Command>, LineError> {
    let words = split_words(input)?;
    if words.is_empty() {
        return Ok(None);
    }
    Line::try_parse_from(words)
        .map(|line| Some(line.command))
        .map_err(|e| LineError::Usage(e.to_string()))
}

/// Split on whitespace, honouring double quotes so names may contain spaces.
fn split_words(input: &str) -> Result<Vec<String>, LineError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_word = false;

    for c in input.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_word = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_word {
                    words.push(std::mem::take(&mut current));
                    has_word = false;
                }
            }
            c => {
                current.push(c);
                has_word = true;
            }
        }
    }
    if in_quotes {
        return Err(LineError::UnterminatedQuote);
    }
    if has_word {
        words.push(current);
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_words_quotes() {
        assert_eq!(
            split_words(r#"aircraft add "Sky Tanker 7""#).unwrap(),
            vec!["aircraft", "add", "Sky Tanker 7"]
        );
        assert_eq!(split_words("  stats  ").unwrap(), vec!["stats"]);
        assert_eq!(split_words(r#"soldier add """#).unwrap(), vec!["soldier", "add", ""]);
        assert!(matches!(
            split_words(r#"aircraft add "oops"#),
            Err(LineError::UnterminatedQuote)
        ));
    }

    #[test]
    fn test_parse_blank_line() {
        assert_eq!(parse_line("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_drone_add() {
        let cmd = parse_line("drone add D1 --aircraft A1 --soldier S1 --brand Acme")
            .unwrap()
            .unwrap();
        assert_eq!(
            cmd,
            Command::Drone {
                op: DroneOp::Add {
                    name: "D1".into(),
                    aircraft: "A1".into(),
                    soldier: "S1".into(),
                    brand: "Acme".into(),
                }
            }
        );
        assert_eq!(cmd.action(), Some(Action::Drones));
    }

    #[test]
    fn test_parse_relate_allow_list() {
        let cmd = parse_line("relate A1 D1 supports").unwrap().unwrap();
        assert_eq!(
            cmd,
            Command::Relate {
                aircraft: "A1".into(),
                drone: "D1".into(),
                relation: AircraftDroneRelation::Supports,
            }
        );
        assert!(matches!(
            parse_line("relate A1 D1 HAS"),
            Err(LineError::Usage(_))
        ));
    }

    #[test]
    fn test_parse_delete_kind() {
        let cmd = parse_line("delete drone 1234").unwrap().unwrap();
        assert_eq!(
            cmd,
            Command::Delete {
                kind: EntityKind::Drone,
                uuid: "1234".into()
            }
        );
        assert!(parse_line("delete tank 1234").is_err());
    }

    #[test]
    fn test_session_commands_have_no_action() {
        for line in ["login", "logout", "actions", "quit", "exit"] {
            let cmd = parse_line(line).unwrap().unwrap();
            assert_eq!(cmd.action(), None, "{line}");
        }
        assert_eq!(
            parse_line("relations soldier").unwrap().unwrap().action(),
            Some(Action::SoldierDroneRelationships)
        );
    }

    #[test]
    fn test_every_action_has_usage() {
        for action in Action::ALL {
            assert!(!action.usage().is_empty());
            assert!(!action.label().is_empty());
        }
    }
}
