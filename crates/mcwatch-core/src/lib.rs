//! mcwatch-core: log-line classification and session tracking.
//! Turns prefix-stripped server log lines into [`Event`]s and folds them
//! into the online-player model, producing chat notification strings.
//! No IO boundary lives here except loading extra death patterns.

pub mod classify;
pub mod error;
pub mod event;
pub mod patterns;
pub mod tracker;

pub use classify::{classify, strip_prefix};
pub use error::PatternError;
pub use event::Event;
pub use patterns::DeathPatternSet;
pub use tracker::{DEFAULT_MAX_PLAYERS, SessionState, SessionTracker, apply, render_roster};
