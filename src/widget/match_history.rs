use serde::Serialize;

use crate::constants::TEAM_SIZE;
use crate::model::{MatchRecord, Outcome};
use crate::widget::formatters::format_or_blank;
use crate::widget::Widget;

/// A widget that lists the latest matches, with both rosters
/// and their scores.
///
/// # Displaying
/// - Display this widget whenever the summary changes.
#[derive(Serialize, Debug)]
pub struct MatchHistoryWidget<'a> {
    pub matches: Vec<MatchHistoryEntry<'a>>,
}

#[derive(Serialize, Debug)]
pub struct MatchHistoryEntry<'a> {
    /// f.e. `"blue-close"` or `"orange-win"`, or empty for pending matches.
    pub win_class: &'static str,

    /// Always three slots. Slots past the end of the roster are blank.
    pub blue: Vec<RosterSlot<'a>>,

    /// Always three slots. Slots past the end of the roster are blank.
    pub orange: Vec<RosterSlot<'a>>,

    /// The score of either side, or blank if it is unknown.
    #[serde(serialize_with = "format_or_blank")]
    pub blue_score: Option<u32>,

    #[serde(serialize_with = "format_or_blank")]
    pub orange_score: Option<u32>,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct RosterSlot<'a> {
    pub name: &'a str,

    /// `True` if this player substitutes a regular competitor.
    pub surrogate: bool,
}

/// Classify the margin of a match.
///
/// Returns `None` for pending matches. Otherwise, the side with more goals
/// is suffixed with `-close` if it won by a single goal, and with `-win` if not.
/// Unknown scores count as zero.
pub fn win_class(record: &MatchRecord) -> Option<&'static str> {
    if record.outcome == Outcome::Pending {
        return None;
    }

    let blue = i64::from(record.blue_score.unwrap_or(0));
    let orange = i64::from(record.orange_score.unwrap_or(0));
    let blue_ahead = record.blue_ahead();
    let close = (blue - orange).abs() == 1;
    Some(match (blue_ahead, close) {
        (true, true) => "blue-close",
        (true, false) => "blue-win",
        (false, true) => "orange-close",
        (false, false) => "orange-win",
    })
}

fn roster_slots<'a>(roster: &'a [String], record: &MatchRecord) -> Vec<RosterSlot<'a>> {
    (0..TEAM_SIZE)
        .map(|i| match roster.get(i) {
            Some(name) => RosterSlot {
                name,
                surrogate: record.is_surrogate(name),
            },
            None => RosterSlot {
                name: "",
                surrogate: false,
            },
        })
        .collect()
}

impl<'a> MatchHistoryWidget<'a> {
    pub fn new(matches: &'a [MatchRecord]) -> Self {
        let matches = matches
            .iter()
            .map(|record| MatchHistoryEntry {
                win_class: win_class(record).unwrap_or(""),
                blue: roster_slots(&record.blue_roster, record),
                orange: roster_slots(&record.orange_roster, record),
                blue_score: record.blue_score,
                orange_score: record.orange_score,
            })
            .collect();
        MatchHistoryWidget { matches }
    }
}

impl Widget for MatchHistoryWidget<'_> {
    const FILE: &'static str = "match_history.j2";
    const REGION: &'static str = "matches-table";
}
