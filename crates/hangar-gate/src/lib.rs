//! Hangar Gate — the password gate in front of every console action.
//!
//! A successful login issues an opaque token of the form
//! `<64 hex chars>:<unix seconds>`. The token stays valid until
//! `ttl` seconds after issuance; activity does not extend it.
//!
//! ```
//! use hangar_gate::{ManualClock, Session, SessionGate};
//!
//! let clock = ManualClock::new(1_700_000_000);
//! let gate = SessionGate::with_clock("open sesame", 3600, clock.clone());
//! let mut session = Session::new();
//!
//! gate.login(&mut session, "open sesame").unwrap();
//! assert!(gate.check(&session).is_ok());
//!
//! clock.advance(3600);
//! assert!(gate.check(&session).is_err());
//! ```

pub mod clock;
pub mod error;
pub mod gate;
pub mod token;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::AuthError;
pub use gate::{Session, SessionGate, SessionState};
pub use token::Token;
