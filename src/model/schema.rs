use std::collections::HashSet;

use serde::Deserialize;

use crate::model::*;

/// The shapes of `summary.json` written by different versions of the league runner.
///
/// Renderers only ever see the `StandingsSummary` that both shapes are parsed into.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVersion {
    /// Ranks without result strips, and matches that are always complete.
    Legacy,

    /// Ranks with win/loss history or game tags, and matches that may still
    /// be pending, and can include surrogates.
    Current,
}

impl Default for SchemaVersion {
    fn default() -> Self {
        SchemaVersion::Current
    }
}

impl SchemaVersion {
    pub fn parse_summary(self, json_str: &str) -> serde_json::Result<StandingsSummary> {
        match self {
            SchemaVersion::Legacy => serde_json::from_str::<LegacySummary>(json_str).map(Into::into),
            SchemaVersion::Current => {
                serde_json::from_str::<CurrentSummary>(json_str).map(Into::into)
            }
        }
    }
}

#[derive(Deserialize, Debug)]
struct LegacySummary {
    #[serde(default)]
    bots_by_rank: Vec<LegacyRank>,

    #[serde(default)]
    matches: Vec<LegacyMatch>,
}

#[derive(Deserialize, Debug)]
struct LegacyRank {
    #[serde(default, deserialize_with = "null_as_default")]
    bot_id: String,

    #[serde(default)]
    cur_rank: Option<usize>,

    #[serde(default)]
    mmr: Option<f64>,
}

#[derive(Deserialize, Debug)]
struct LegacyMatch {
    #[serde(default)]
    blue_names: Vec<String>,

    #[serde(default)]
    orange_names: Vec<String>,

    #[serde(default)]
    blue_goals: Option<u32>,

    #[serde(default)]
    orange_goals: Option<u32>,
}

impl From<LegacySummary> for StandingsSummary {
    fn from(summary: LegacySummary) -> Self {
        let competitors = summary
            .bots_by_rank
            .into_iter()
            .map(|bot| RankedCompetitor {
                id: bot.bot_id,
                rank: bot.cur_rank,
                rating: bot.mmr,
                recent_results: vec![],
            })
            .collect();

        let matches = summary
            .matches
            .into_iter()
            .map(|m| MatchRecord {
                outcome: Outcome::of(true, m.blue_goals, m.orange_goals),
                blue_roster: m.blue_names,
                orange_roster: m.orange_names,
                blue_score: m.blue_goals,
                orange_score: m.orange_goals,
                surrogate_names: HashSet::new(),
            })
            .collect();

        StandingsSummary {
            competitors,
            matches,
        }
    }
}

#[derive(Deserialize, Debug)]
struct CurrentSummary {
    #[serde(default)]
    bots_by_rank: Vec<CurrentRank>,

    #[serde(default)]
    matches: Vec<CurrentMatch>,
}

#[derive(Deserialize, Debug)]
struct CurrentRank {
    #[serde(default, deserialize_with = "null_as_default")]
    bot_id: String,

    #[serde(default)]
    cur_rank: Option<usize>,

    #[serde(default)]
    mmr: Option<f64>,

    /// `true` for every won game, `false` for every lost one.
    #[serde(default)]
    wins: Vec<bool>,

    /// Takes precedence over `wins` if present.
    #[serde(default)]
    games: Option<Vec<String>>,
}

#[derive(Deserialize, Debug)]
struct CurrentMatch {
    #[serde(default)]
    blue_names: Vec<String>,

    #[serde(default)]
    orange_names: Vec<String>,

    #[serde(default)]
    blue_goals: Option<u32>,

    #[serde(default)]
    orange_goals: Option<u32>,

    #[serde(default)]
    complete: bool,

    #[serde(default)]
    surrogate_names: HashSet<String>,
}

impl From<CurrentSummary> for StandingsSummary {
    fn from(summary: CurrentSummary) -> Self {
        let competitors = summary
            .bots_by_rank
            .into_iter()
            .map(|bot| {
                let recent_results = match bot.games {
                    Some(games) => games.into_iter().map(ResultMark::Game).collect(),
                    None => bot.wins.into_iter().map(ResultMark::from).collect(),
                };
                RankedCompetitor {
                    id: bot.bot_id,
                    rank: bot.cur_rank,
                    rating: bot.mmr,
                    recent_results,
                }
            })
            .collect();

        let matches = summary
            .matches
            .into_iter()
            .map(|m| MatchRecord {
                outcome: Outcome::of(m.complete, m.blue_goals, m.orange_goals),
                blue_roster: m.blue_names,
                orange_roster: m.orange_names,
                blue_score: m.blue_goals,
                orange_score: m.orange_goals,
                surrogate_names: m.surrogate_names,
            })
            .collect();

        StandingsSummary {
            competitors,
            matches,
        }
    }
}
