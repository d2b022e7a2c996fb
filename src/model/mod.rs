use std::collections::HashSet;

use serde::{Deserialize, Deserializer};

pub use schema::*;
pub use telemetry::*;

mod schema;
mod telemetry;

/// The league standings and the latest matches, as found in `summary.json`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StandingsSummary {
    /// Competitors, in the order they should be displayed.
    /// This order is decided by the league runner.
    pub competitors: Vec<RankedCompetitor>,

    /// The latest matches, most recent first.
    pub matches: Vec<MatchRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedCompetitor {
    pub id: String,

    /// The competitor's current rank, starting at 1, or `None` if it should be left blank.
    pub rank: Option<usize>,

    /// The competitor's rating, or `None` if it should be left blank.
    pub rating: Option<f64>,

    /// Results of the competitor's latest games, oldest first.
    pub recent_results: Vec<ResultMark>,
}

/// One entry in a competitor's result strip.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultMark {
    Win,
    Loss,

    /// A game tag, f.e. `"win"` or `"loss-ot"`, that names an indicator image.
    Game(String),
}

impl ResultMark {
    /// The name of the indicator image for this result.
    pub fn tag(&self) -> &str {
        match self {
            ResultMark::Win => "win",
            ResultMark::Loss => "loss",
            ResultMark::Game(tag) => tag,
        }
    }
}

impl From<bool> for ResultMark {
    fn from(won: bool) -> Self {
        if won {
            ResultMark::Win
        } else {
            ResultMark::Loss
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The match is still being played.
    Pending,
    BlueWin,
    OrangeWin,
}

impl Outcome {
    /// The outcome of a completed match. Like the league runner,
    /// anything that is not a blue win counts for orange.
    pub fn of_completed(blue_score: u32, orange_score: u32) -> Outcome {
        if blue_score > orange_score {
            Outcome::BlueWin
        } else {
            Outcome::OrangeWin
        }
    }

    /// The outcome of a match that may be complete, and may lack a score.
    /// A match without both scores is still pending.
    pub fn of(complete: bool, blue_score: Option<u32>, orange_score: Option<u32>) -> Outcome {
        match (complete, blue_score, orange_score) {
            (true, Some(blue), Some(orange)) => Outcome::of_completed(blue, orange),
            _ => Outcome::Pending,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchRecord {
    /// Up to three names.
    pub blue_roster: Vec<String>,

    /// Up to three names.
    pub orange_roster: Vec<String>,

    /// `None` if the score is unknown, and should be left blank.
    pub blue_score: Option<u32>,
    pub orange_score: Option<u32>,
    pub outcome: Outcome,

    /// Names of players that substitute a regular competitor in this match.
    pub surrogate_names: HashSet<String>,
}

impl MatchRecord {
    /// `True` if the blue side scored more goals. Unknown scores count as zero.
    pub fn blue_ahead(&self) -> bool {
        self.blue_score.unwrap_or(0) > self.orange_score.unwrap_or(0)
    }

    pub fn is_surrogate(&self, name: &str) -> bool {
        self.surrogate_names.contains(name)
    }
}

/// The participants of the current match, as found in `current_match.json`.
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct LiveMatchInfo {
    #[serde(default)]
    pub blue: Vec<CompetitorProfile>,

    #[serde(default)]
    pub orange: Vec<CompetitorProfile>,
}

impl LiveMatchInfo {
    /// The names of the players on either side.
    pub fn to_ref(&self) -> LiveMatchRef {
        let names = |side: &[CompetitorProfile]| side.iter().map(|p| p.name.clone()).collect();
        LiveMatchRef {
            blue: names(&self.blue),
            orange: names(&self.orange),
        }
    }

    /// Iterate the profiles of both sides, blue first.
    pub fn profiles(&self) -> impl Iterator<Item = &CompetitorProfile> {
        self.blue.iter().chain(self.orange.iter())
    }
}

/// Bot details, as configured by its developer.
///
/// Apart from the name, every field is optional, since a bot's config
/// might not list it.
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct CompetitorProfile {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default)]
    pub developer: Option<String>,

    /// The programming language the bot is written in.
    #[serde(default)]
    pub language: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub fun_fact: Option<String>,

    #[serde(default)]
    pub github: Option<String>,

    #[serde(default)]
    pub logo_path: Option<String>,

    #[serde(default)]
    pub rank: Option<usize>,

    #[serde(default)]
    pub mmr: Option<f64>,
}

/// Like `#[serde(default)]`, but also for explicit `null` values.
pub(crate) fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

/// The names of the players in the current match, used to highlight them
/// in the leaderboard.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LiveMatchRef {
    pub blue: HashSet<String>,
    pub orange: HashSet<String>,
}

/// A short piece of information about one of the bots in the current match.
#[derive(Debug, Clone, PartialEq)]
pub struct TipCard {
    pub title: String,
    pub text: String,
}
