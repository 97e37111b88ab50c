//! Hangar Console — the operator-facing surface of the fleet graph.
//!
//! Every command except `login`, `logout`, `actions` and `quit` passes the
//! session gate before it reaches the repository.

pub mod actions;
pub mod console;
pub mod render;
pub mod view;

pub use actions::{parse_line, Action, Command};
pub use console::{Console, Flow};
pub use view::{GraphView, ViewExporter};
