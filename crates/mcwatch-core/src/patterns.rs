//! Pattern Table and death-message catalogue.
//!
//! Line rules are evaluated in declared order and the first rule that claims
//! a line wins. Roster parsing and join/leave text can share substrings, so
//! the order is part of the contract. Death phrases are data: extend
//! [`BUILTIN_DEATH_PATTERNS`] or load a TOML file, never touch control flow.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::error::PatternError;
use crate::event::Event;

// ─── Line rules ─────────────────────────────────────────────────

/// One entry of the line rule table.
///
/// `matcher` returns `None` to pass the line to the next rule, or
/// `Some(event)` to claim it. A rule may claim a line as
/// [`Event::Unclassified`] to stop evaluation (malformed roster numbers).
#[derive(Debug, Clone, Copy)]
pub struct LineRule {
    pub name: &'static str,
    pub matcher: fn(&str) -> Option<Event>,
}

/// Stateless rules in priority order. The death-candidate check runs after
/// these because it depends on the current online set.
pub const LINE_RULES: &[LineRule] = &[
    LineRule {
        name: "server_starting",
        matcher: match_server_starting,
    },
    LineRule {
        name: "server_stopping",
        matcher: match_server_stopping,
    },
    LineRule {
        name: "player_joined",
        matcher: match_joined,
    },
    LineRule {
        name: "player_left",
        matcher: match_left,
    },
    LineRule {
        name: "roster_snapshot",
        matcher: match_roster,
    },
];

const SERVER_STARTING_PREFIX: &str = "Starting minecraft server version";
const SERVER_STOPPING_PREFIX: &str = "Stopping the server";

static JOINED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\S+) joined the game").expect("valid regex"));
static LEFT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\S+) left the game").expect("valid regex"));
static ROSTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^There are (\d+) of a max of (\d+) players online:(.*)$").expect("valid regex")
});

fn match_server_starting(line: &str) -> Option<Event> {
    line.starts_with(SERVER_STARTING_PREFIX)
        .then(|| Event::ServerStarting {
            raw: line.to_owned(),
        })
}

fn match_server_stopping(line: &str) -> Option<Event> {
    line.starts_with(SERVER_STOPPING_PREFIX)
        .then(|| Event::ServerStopping {
            raw: line.to_owned(),
        })
}

fn match_joined(line: &str) -> Option<Event> {
    let caps = JOINED_RE.captures(line)?;
    Some(Event::PlayerJoined {
        name: caps[1].to_owned(),
    })
}

fn match_left(line: &str) -> Option<Event> {
    let caps = LEFT_RE.captures(line)?;
    Some(Event::PlayerLeft {
        name: caps[1].to_owned(),
    })
}

fn match_roster(line: &str) -> Option<Event> {
    let caps = ROSTER_RE.captures(line)?;

    // Digits that overflow u32 still claim the line, as Unclassified.
    let (Ok(count), Ok(max)) = (caps[1].parse::<u32>(), caps[2].parse::<u32>()) else {
        tracing::debug!(line, "roster line with unparseable numbers");
        return Some(Event::Unclassified);
    };

    Some(Event::RosterSnapshot {
        count,
        max,
        names: parse_roster_names(&caps[3]),
    })
}

/// Split the `list` tail on commas, trimming each name. Empty tail → empty set.
pub fn parse_roster_names(rest: &str) -> BTreeSet<String> {
    rest.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect()
}

// ─── Death patterns ─────────────────────────────────────────────

/// Death-message suffixes, matched against the text after the player name.
/// Each entry is anchored at both ends.
pub const BUILTIN_DEATH_PATTERNS: &[&str] = &[
    "was slain by .*",
    "was shot by .*",
    "was pummeled by .*",
    "was pricked to death.*",
    "walked into a cactus.*",
    "drowned.*",
    "died from dehydration.*",
    "experienced kinetic energy.*",
    "removed an elytra while flying.*",
    "blew up",
    "was blown up by .*",
    "was killed by .*",
    "was killed while trying to hurt .*",
    "hit the ground too hard.*",
    "fell.*",
    "was doomed to fall.*",
    "was squashed by .*",
    "was squished too much",
    "was skewered by a falling stalactite.*",
    "was impaled on a stalagmite.*",
    "was impaled by .*",
    "was speared by .*",
    "went up in flames",
    "walked into fire.*",
    "burned to death",
    "was burnt to a crisp.*",
    "went off with a bang.*",
    "tried to swim in lava.*",
    "was struck by lightning.*",
    "discovered the floor was lava",
    "walked into the danger zone due to .*",
    "froze to death",
    "was frozen to death by .*",
    "was fireballed by .*",
    "was stung to death.*",
    "was obliterated by a sonically-charged shriek.*",
    "was smashed by .*",
    "starved to death.*",
    "suffocated in a wall.*",
    "was poked to death by a sweet berry bush.*",
    "was roasted in dragon breath.*",
    "fell out of the world",
    "left the confines of this world.*",
    "didn't want to live in the same world as .*",
    "withered away.*",
    "died.*",
];

static BUILTIN: LazyLock<Vec<DeathPattern>> = LazyLock::new(|| {
    BUILTIN_DEATH_PATTERNS
        .iter()
        .map(|p| DeathPattern::compile(p).expect("valid builtin death pattern"))
        .collect()
});

#[derive(Debug, Clone)]
struct DeathPattern {
    source: String,
    regex: Regex,
}

impl DeathPattern {
    fn compile(pattern: &str) -> Result<Self, PatternError> {
        let regex =
            Regex::new(&format!("^(?:{pattern})$")).map_err(|source| PatternError::InvalidRegex {
                pattern: pattern.to_owned(),
                source,
            })?;
        Ok(Self {
            source: pattern.to_owned(),
            regex,
        })
    }
}

/// On-disk shape of an extra death pattern file.
#[derive(Debug, Deserialize)]
struct DeathPatternFile {
    #[serde(default)]
    patterns: Vec<String>,
}

/// Ordered, immutable list of recognised death phrases.
#[derive(Debug, Clone)]
pub struct DeathPatternSet {
    patterns: Vec<DeathPattern>,
}

impl DeathPatternSet {
    /// The stock catalogue.
    pub fn builtin() -> Self {
        Self {
            patterns: BUILTIN.clone(),
        }
    }

    /// Build a set from caller-supplied patterns only.
    pub fn from_patterns<I, S>(patterns: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| DeathPattern::compile(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Append patterns after the existing ones.
    pub fn with_extra<I, S>(mut self, extra: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for p in extra {
            self.patterns.push(DeathPattern::compile(p.as_ref())?);
        }
        Ok(self)
    }

    /// Parse a TOML document of the form `patterns = ["...", ...]` and append it.
    pub fn with_extra_toml(self, toml_str: &str) -> Result<Self, PatternError> {
        let file: DeathPatternFile = toml::from_str(toml_str)?;
        self.with_extra(file.patterns)
    }

    /// Read and append a TOML pattern file.
    pub fn with_extra_file(self, path: &Path) -> Result<Self, PatternError> {
        let content = std::fs::read_to_string(path)?;
        self.with_extra_toml(&content)
    }

    /// First pattern (in declared order) matching `rest`, as written.
    pub fn first_match(&self, rest: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|p| p.regex.is_match(rest))
            .map(|p| p.source.as_str())
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for DeathPatternSet {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_rule(line: &str) -> Option<(&'static str, Event)> {
        LINE_RULES
            .iter()
            .find_map(|rule| (rule.matcher)(line).map(|ev| (rule.name, ev)))
    }

    #[test]
    fn rule_order_is_fixed() {
        let names: Vec<&str> = LINE_RULES.iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            [
                "server_starting",
                "server_stopping",
                "player_joined",
                "player_left",
                "roster_snapshot"
            ]
        );
    }

    #[test]
    fn joined_takes_first_token() {
        let (rule, ev) = first_rule("4poc joined the game").expect("match");
        assert_eq!(rule, "player_joined");
        assert_eq!(
            ev,
            Event::PlayerJoined {
                name: "4poc".into()
            }
        );
    }

    #[test]
    fn joined_requires_token_at_line_start() {
        assert!(first_rule(" joined the game").is_none());
        assert!(first_rule("a b joined the game").is_none());
    }

    #[test]
    fn left_matches() {
        let (rule, ev) = first_rule("Alex left the game").expect("match");
        assert_eq!(rule, "player_left");
        assert_eq!(ev, Event::PlayerLeft { name: "Alex".into() });
    }

    #[test]
    fn lifecycle_lines_keep_raw_text() {
        let (_, ev) = first_rule("Starting minecraft server version 1.20.4").expect("match");
        assert_eq!(
            ev,
            Event::ServerStarting {
                raw: "Starting minecraft server version 1.20.4".into()
            }
        );
        let (_, ev) = first_rule("Stopping the server").expect("match");
        assert_eq!(
            ev,
            Event::ServerStopping {
                raw: "Stopping the server".into()
            }
        );
    }

    #[test]
    fn roster_parses_names_and_numbers() {
        let (rule, ev) =
            first_rule("There are 2 of a max of 20 players online: Alice, Bob").expect("match");
        assert_eq!(rule, "roster_snapshot");
        let Event::RosterSnapshot { count, max, names } = ev else {
            panic!("expected roster, got {ev:?}");
        };
        assert_eq!(count, 2);
        assert_eq!(max, 20);
        assert_eq!(
            names,
            BTreeSet::from(["Alice".to_owned(), "Bob".to_owned()])
        );
    }

    #[test]
    fn roster_empty_tail_yields_empty_set_regardless_of_count() {
        let (_, ev) = first_rule("There are 3 of a max of 10 players online:").expect("match");
        assert_eq!(
            ev,
            Event::RosterSnapshot {
                count: 3,
                max: 10,
                names: BTreeSet::new()
            }
        );
    }

    #[test]
    fn roster_overflow_is_unclassified() {
        let (rule, ev) =
            first_rule("There are 99999999999 of a max of 20 players online: a").expect("match");
        assert_eq!(rule, "roster_snapshot");
        assert_eq!(ev, Event::Unclassified);
    }

    #[test]
    fn roster_names_trim_and_skip_blanks() {
        let names = parse_roster_names("  a ,b,, c  ");
        assert_eq!(
            names,
            BTreeSet::from(["a".to_owned(), "b".to_owned(), "c".to_owned()])
        );
    }

    #[test]
    fn builtin_death_patterns_compile_and_match() {
        let set = DeathPatternSet::builtin();
        assert_eq!(set.len(), BUILTIN_DEATH_PATTERNS.len());
        assert_eq!(set.first_match("was slain by Zombie"), Some("was slain by .*"));
        assert_eq!(set.first_match("drowned"), Some("drowned.*"));
        assert_eq!(set.first_match("fell from a high place"), Some("fell.*"));
        assert_eq!(set.first_match("blew up"), Some("blew up"));
        assert_eq!(set.first_match("blew up a creeper"), None);
        assert_eq!(set.first_match("has made the advancement [Stone Age]"), None);
        assert_eq!(set.first_match("lost connection: Disconnected"), None);
    }

    #[test]
    fn patterns_are_anchored() {
        let set = DeathPatternSet::from_patterns(["burned to death"]).expect("test");
        assert!(set.first_match("burned to death").is_some());
        assert!(set.first_match("nearly burned to death").is_none());
        assert!(set.first_match("burned to deathly pale").is_none());
    }

    #[test]
    fn extra_patterns_append_after_builtin() {
        let set = DeathPatternSet::builtin()
            .with_extra_toml(r#"patterns = ["was eaten by .*"]"#)
            .expect("test");
        assert_eq!(set.len(), BUILTIN_DEATH_PATTERNS.len() + 1);
        assert_eq!(set.first_match("was eaten by a grue"), Some("was eaten by .*"));
    }

    #[test]
    fn invalid_extra_pattern_is_rejected() {
        let err = DeathPatternSet::builtin()
            .with_extra(["was (unbalanced"])
            .expect_err("invalid regex");
        assert!(matches!(err, PatternError::InvalidRegex { .. }));
    }

    #[test]
    fn malformed_toml_is_rejected() {
        let err = DeathPatternSet::builtin()
            .with_extra_toml("patterns = [")
            .expect_err("bad toml");
        assert!(matches!(err, PatternError::Toml(_)));
    }
}
