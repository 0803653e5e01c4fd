//! Event model produced by the classifier.

use std::collections::BTreeSet;

/// Semantic meaning of one prefix-stripped log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    PlayerJoined {
        name: String,
    },
    PlayerLeft {
        name: String,
    },
    /// Periodic `list` output. `count` is what the server reported; `names`
    /// is authoritative for membership and the two are not reconciled.
    RosterSnapshot {
        count: u32,
        max: u32,
        names: BTreeSet<String>,
    },
    ServerStarting {
        raw: String,
    },
    ServerStopping {
        raw: String,
    },
    /// A line whose first token is a currently online player. `rest` may or
    /// may not be a recognised death message.
    DeathCandidate {
        actor: String,
        rest: String,
        raw: String,
    },
    Unclassified,
}

impl Event {
    /// Short tag used in log output.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::PlayerJoined { .. } => "player_joined",
            Event::PlayerLeft { .. } => "player_left",
            Event::RosterSnapshot { .. } => "roster_snapshot",
            Event::ServerStarting { .. } => "server_starting",
            Event::ServerStopping { .. } => "server_stopping",
            Event::DeathCandidate { .. } => "death_candidate",
            Event::Unclassified => "unclassified",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_tags_are_distinct() {
        let events = [
            Event::PlayerJoined { name: "a".into() },
            Event::PlayerLeft { name: "a".into() },
            Event::RosterSnapshot {
                count: 0,
                max: 20,
                names: BTreeSet::new(),
            },
            Event::ServerStarting { raw: "x".into() },
            Event::ServerStopping { raw: "x".into() },
            Event::DeathCandidate {
                actor: "a".into(),
                rest: "fell".into(),
                raw: "a fell".into(),
            },
            Event::Unclassified,
        ];
        let tags: BTreeSet<&str> = events.iter().map(Event::kind).collect();
        assert_eq!(tags.len(), events.len());
    }
}
