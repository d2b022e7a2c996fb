use serde::Serialize;

use crate::model::TelemetrySnapshot;
use crate::widget::formatters::format_secs;
use crate::widget::Widget;

/// A widget that shows what every car announced over TMCP last.
///
/// # Displaying
/// - Display this widget whenever the tracker writes a new snapshot.
#[derive(Serialize, Debug)]
pub struct TelemetryWidget<'a> {
    /// `True` while the round is active.
    pub active: bool,

    /// One entry per car, ordered by car index.
    pub entries: Vec<TelemetryEntry<'a>>,
}

#[derive(Serialize, Debug)]
pub struct TelemetryEntry<'a> {
    pub name: &'a str,

    /// `"blue"`, `"orange"`, or `"unknown"` if the car never announced anything.
    pub team: &'static str,

    /// The icon of the latest action, or blank.
    pub icon: &'static str,

    /// Seconds since the latest action was announced.
    #[serde(serialize_with = "format_secs")]
    pub age: Option<f64>,
}

/// The icon for a TMCP action type.
pub fn action_icon(kind: &str) -> &'static str {
    match kind {
        "BALL" => "⚽",
        "BOOST" => "⛽",
        "DEMO" => "💣",
        "READY" => "✔️",
        "DEFEND" => "🛡️",
        _ => "",
    }
}

impl<'a> TelemetryWidget<'a> {
    pub fn new(snapshot: &'a TelemetrySnapshot) -> Self {
        let entries = snapshot
            .names
            .iter()
            .enumerate()
            .map(|(idx, name)| match snapshot.action_of(idx) {
                Some(tracked) => TelemetryEntry {
                    name,
                    team: if tracked.team == 0 { "blue" } else { "orange" },
                    icon: tracked
                        .action
                        .as_ref()
                        .map_or("", |action| action_icon(&action.kind)),
                    age: Some(snapshot.time - tracked.time),
                },
                None => TelemetryEntry {
                    name,
                    team: "unknown",
                    icon: "",
                    age: None,
                },
            })
            .collect();

        TelemetryWidget {
            active: snapshot.active,
            entries,
        }
    }
}

impl Widget for TelemetryWidget<'_> {
    const FILE: &'static str = "telemetry.j2";
    const REGION: &'static str = "tmcp";
}
