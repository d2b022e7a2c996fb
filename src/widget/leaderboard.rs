use serde::Serialize;

use crate::constants::INDICATOR_IMG_PREFIX;
use crate::model::{LiveMatchRef, StandingsSummary};
use crate::widget::formatters::{format_or_blank, format_rating};
use crate::widget::Widget;

/// A widget that lists every competitor with their rank, latest results
/// and rating.
///
/// # Displaying
/// - Display this widget whenever the summary changes.
/// - Display it again when a new match starts, so that the players
///   of that match are highlighted.
#[derive(Serialize, Debug)]
pub struct LeaderboardWidget<'a> {
    /// One row per competitor, in the order of the summary.
    pub rows: Vec<LeaderboardRow<'a>>,

    /// Indicator images are located at `<img_prefix><tag>.png`.
    pub img_prefix: &'static str,
}

#[derive(Serialize, Debug)]
pub struct LeaderboardRow<'a> {
    /// The competitor's rank, or blank.
    #[serde(serialize_with = "format_or_blank")]
    pub rank: Option<usize>,

    pub name: &'a str,

    /// Names of the indicator images for the competitor's latest results.
    pub indicators: Vec<&'a str>,

    /// The competitor's rating, or blank.
    #[serde(serialize_with = "format_rating")]
    pub rating: Option<f64>,

    pub highlight: RowHighlight,
}

/// The background of a leaderboard row.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RowHighlight {
    /// The competitor is playing for blue in the current match.
    PlayingBlue,

    /// The competitor is playing for orange in the current match.
    PlayingOrange,

    Odd,
    Even,
}

impl RowHighlight {
    /// Highlight players of the current match, and stripe every other row.
    /// `pos` starts at 0, which is an odd row.
    pub fn of(name: &str, pos: usize, live: Option<&LiveMatchRef>) -> RowHighlight {
        match live {
            Some(live) if live.blue.contains(name) => RowHighlight::PlayingBlue,
            Some(live) if live.orange.contains(name) => RowHighlight::PlayingOrange,
            _ if pos % 2 == 0 => RowHighlight::Odd,
            _ => RowHighlight::Even,
        }
    }
}

impl<'a> LeaderboardWidget<'a> {
    pub fn new(summary: &'a StandingsSummary, live: Option<&LiveMatchRef>) -> Self {
        let rows = summary
            .competitors
            .iter()
            .enumerate()
            .map(|(pos, competitor)| LeaderboardRow {
                rank: competitor.rank,
                name: &competitor.id,
                indicators: competitor.recent_results.iter().map(|r| r.tag()).collect(),
                rating: competitor.rating,
                highlight: RowHighlight::of(&competitor.id, pos, live),
            })
            .collect();

        LeaderboardWidget {
            rows,
            img_prefix: INDICATOR_IMG_PREFIX,
        }
    }
}

impl Widget for LeaderboardWidget<'_> {
    const FILE: &'static str = "leaderboard.j2";
    const REGION: &'static str = "leaderboard-table";
}
