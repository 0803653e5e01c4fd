//! Line Classifier: prefix strip plus rule-table evaluation.

use std::sync::LazyLock;

use regex::Regex;

use crate::event::Event;
use crate::patterns::LINE_RULES;
use crate::tracker::SessionState;

/// `[HH:MM:SS] [Server thread/INFO]: ` header written before every message
/// the server thread logs at INFO.
static PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[\d+:\d+:\d+\] \[Server thread/INFO\]: (.*)$").expect("valid regex")
});

/// Strip the timestamp/thread/level header. Lines without it are noise
/// and yield `None`.
pub fn strip_prefix(line: &str) -> Option<&str> {
    PREFIX_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Classify a prefix-stripped line against the rule table, falling back to
/// the death-candidate check against the current online set.
pub fn classify(trimmed: &str, state: &SessionState) -> Event {
    for rule in LINE_RULES {
        if let Some(event) = (rule.matcher)(trimmed) {
            return event;
        }
    }

    let (actor, rest) = trimmed
        .split_once(char::is_whitespace)
        .unwrap_or((trimmed, ""));

    if state.is_online(actor) {
        return Event::DeathCandidate {
            actor: actor.to_owned(),
            rest: rest.to_owned(),
            raw: trimmed.to_owned(),
        };
    }

    Event::Unclassified
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(names: &[&str]) -> SessionState {
        let mut state = SessionState::new();
        for name in names {
            state.insert(name);
        }
        state
    }

    #[test]
    fn strip_prefix_extracts_message() {
        assert_eq!(
            strip_prefix("[07:54:07] [Server thread/INFO]: 4poc joined the game"),
            Some("4poc joined the game")
        );
    }

    #[test]
    fn strip_prefix_rejects_other_threads_and_levels() {
        assert_eq!(
            strip_prefix("[07:54:07] [Server thread/WARN]: Can't keep up!"),
            None
        );
        assert_eq!(
            strip_prefix("[07:54:06] [User Authenticator #1/INFO]: UUID of player 4poc is x"),
            None
        );
        assert_eq!(strip_prefix("\tat java.base/java.lang.Thread.run"), None);
        assert_eq!(strip_prefix(""), None);
    }

    #[test]
    fn strip_prefix_keeps_empty_message() {
        assert_eq!(strip_prefix("[00:00:00] [Server thread/INFO]: "), Some(""));
    }

    #[test]
    fn join_line_classifies_as_join() {
        let ev = classify("4poc joined the game", &SessionState::new());
        assert_eq!(
            ev,
            Event::PlayerJoined {
                name: "4poc".into()
            }
        );
    }

    #[test]
    fn join_wins_over_death_candidate_for_online_player() {
        let state = state_with(&["4poc"]);
        let ev = classify("4poc joined the game", &state);
        assert!(matches!(ev, Event::PlayerJoined { .. }));
    }

    #[test]
    fn online_actor_yields_death_candidate() {
        let state = state_with(&["4poc"]);
        let ev = classify("4poc was slain by Zombie", &state);
        assert_eq!(
            ev,
            Event::DeathCandidate {
                actor: "4poc".into(),
                rest: "was slain by Zombie".into(),
                raw: "4poc was slain by Zombie".into(),
            }
        );
    }

    #[test]
    fn offline_actor_is_unclassified() {
        let state = state_with(&["Alice"]);
        assert_eq!(
            classify("Bob was slain by Zombie", &state),
            Event::Unclassified
        );
    }

    #[test]
    fn names_are_case_sensitive() {
        let state = state_with(&["Alice"]);
        assert_eq!(classify("alice drowned", &state), Event::Unclassified);
    }

    #[test]
    fn bare_actor_has_empty_rest() {
        let state = state_with(&["Alice"]);
        assert_eq!(
            classify("Alice", &state),
            Event::DeathCandidate {
                actor: "Alice".into(),
                rest: String::new(),
                raw: "Alice".into(),
            }
        );
    }

    #[test]
    fn malformed_roster_does_not_fall_through() {
        let state = state_with(&["There"]);
        let ev = classify(
            "There are 123456789012 of a max of 20 players online: fell",
            &state,
        );
        assert_eq!(ev, Event::Unclassified);
    }

    #[test]
    fn noise_is_unclassified() {
        assert_eq!(
            classify("Preparing spawn area: 83%", &SessionState::new()),
            Event::Unclassified
        );
    }
}
