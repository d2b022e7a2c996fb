use serde::Serialize;

use crate::model::{CompetitorProfile, LiveMatchInfo};
use crate::widget::Widget;

/// A widget that names the teams of the current match, and their developers.
///
/// # Displaying
/// - Display this widget whenever a new match starts.
#[derive(Serialize, Debug)]
pub struct MatchInfoWidget<'a> {
    pub blue: SideLabels<'a>,
    pub orange: SideLabels<'a>,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct SideLabels<'a> {
    /// The name of the first bot on this side.
    pub team_name: &'a str,

    /// f.e. `"Skyborg - java"`
    pub dev_label: String,
}

impl<'a> SideLabels<'a> {
    /// Labels for the first profile of a side. Blank if the side is empty.
    pub fn of(side: &'a [CompetitorProfile]) -> Self {
        match side.first() {
            Some(profile) => SideLabels {
                team_name: &profile.name,
                dev_label: dev_label(profile),
            },
            None => SideLabels {
                team_name: "",
                dev_label: String::new(),
            },
        }
    }
}

/// The developer's name, followed by the bot's language in lower case.
fn dev_label(profile: &CompetitorProfile) -> String {
    let mut label = profile.developer.clone().unwrap_or_default();
    match profile.language.as_deref() {
        Some(lang) if !lang.is_empty() => {
            label.push_str(" - ");
            label.push_str(&lang.to_lowercase());
        }
        _ => {}
    }
    label
}

impl<'a> MatchInfoWidget<'a> {
    pub fn new(info: &'a LiveMatchInfo) -> Self {
        MatchInfoWidget {
            blue: SideLabels::of(&info.blue),
            orange: SideLabels::of(&info.orange),
        }
    }
}

impl Widget for MatchInfoWidget<'_> {
    const FILE: &'static str = "match_info.j2";
    const REGION: &'static str = "match-info";
}
