//! Session Tracker: the online-player model and the notifications each
//! event produces.

use std::collections::BTreeSet;

use tracing::debug;

use crate::classify::{classify, strip_prefix};
use crate::event::Event;
use crate::patterns::DeathPatternSet;

/// Stock player cap until a roster line reports otherwise.
pub const DEFAULT_MAX_PLAYERS: u32 = 20;

/// Players currently believed online plus the last known cap.
///
/// Names are case-sensitive opaque strings. A `BTreeSet` keeps rendering
/// deterministic (sorted) without giving order any meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    online: BTreeSet<String>,
    max_players: u32,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            online: BTreeSet::new(),
            max_players: DEFAULT_MAX_PLAYERS,
        }
    }

    pub fn is_online(&self, name: &str) -> bool {
        self.online.contains(name)
    }

    /// Returns `false` if the player was already online.
    pub fn insert(&mut self, name: &str) -> bool {
        self.online.insert(name.to_owned())
    }

    /// Returns `false` if the player was not online.
    pub fn remove(&mut self, name: &str) -> bool {
        self.online.remove(name)
    }

    pub fn online(&self) -> &BTreeSet<String> {
        &self.online
    }

    pub fn online_count(&self) -> usize {
        self.online.len()
    }

    pub fn max_players(&self) -> u32 {
        self.max_players
    }

    fn clear(&mut self) {
        self.online.clear();
    }

    fn resync(&mut self, max: u32, names: BTreeSet<String>) {
        self.max_players = max;
        self.online = names;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

/// `[<online> / <max>] online`, plus `: a, b, c` when anyone is online.
pub fn render_roster(state: &SessionState) -> String {
    let mut out = format!("[{} / {}] online", state.online_count(), state.max_players());
    if !state.online.is_empty() {
        let names: Vec<&str> = state.online.iter().map(String::as_str).collect();
        out.push_str(": ");
        out.push_str(&names.join(", "));
    }
    out
}

/// Apply one event to the state and return the notifications it produces,
/// in emission order.
pub fn apply(event: Event, state: &mut SessionState, deaths: &DeathPatternSet) -> Vec<String> {
    match event {
        Event::ServerStarting { raw } | Event::ServerStopping { raw } => {
            state.clear();
            vec![raw]
        }
        Event::PlayerJoined { name } => {
            state.insert(&name);
            vec![format!("{name} joined. {}", render_roster(state))]
        }
        Event::PlayerLeft { name } => {
            state.remove(&name);
            vec![format!("{name} left. {}", render_roster(state))]
        }
        Event::RosterSnapshot { count, max, names } => {
            if usize::try_from(count).ok() != Some(names.len()) {
                // Tolerated: the name list is authoritative for membership.
                debug!(
                    reported = count,
                    listed = names.len(),
                    "roster count differs from listed names"
                );
            }
            state.resync(max, names);
            Vec::new()
        }
        Event::DeathCandidate { actor, rest, raw } => match deaths.first_match(&rest) {
            Some(pattern) => {
                debug!(actor = %actor, pattern, "death message recognised");
                vec![raw]
            }
            None => Vec::new(),
        },
        Event::Unclassified => Vec::new(),
    }
}

/// Owns the session state and the death catalogue for the engine loop.
#[derive(Debug, Clone)]
pub struct SessionTracker {
    state: SessionState,
    deaths: DeathPatternSet,
}

impl SessionTracker {
    pub fn new(deaths: DeathPatternSet) -> Self {
        Self {
            state: SessionState::new(),
            deaths,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Classify an already prefix-stripped line against the current state.
    pub fn classify(&self, trimmed: &str) -> Event {
        classify(trimmed, &self.state)
    }

    pub fn apply(&mut self, event: Event) -> Vec<String> {
        apply(event, &mut self.state, &self.deaths)
    }

    /// Full per-line step: strip, classify, apply. Lines without the log
    /// header produce nothing.
    pub fn handle_line(&mut self, line: &str) -> Vec<String> {
        let Some(trimmed) = strip_prefix(line) else {
            return Vec::new();
        };
        let event = self.classify(trimmed);
        if !matches!(event, Event::Unclassified) {
            debug!(kind = event.kind(), line = trimmed, "classified line");
        }
        self.apply(event)
    }
}

impl Default for SessionTracker {
    fn default() -> Self {
        Self::new(DeathPatternSet::builtin())
    }
}
