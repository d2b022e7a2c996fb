use std::collections::HashMap;

use serde::Deserialize;

use crate::model::null_as_default;

/// The state written by the TMCP tracker on every game tick.
///
/// TMCP is the protocol that teammates use to communicate their intentions,
/// f.e. going for the ball, or collecting boost.
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct TelemetrySnapshot {
    /// Maps a car index to the latest action announced by that car.
    #[serde(default)]
    pub actions: HashMap<String, TrackedAction>,

    /// Seconds elapsed in the game.
    #[serde(default)]
    pub time: f64,

    /// `True` while the round is active, `false` f.e. during kickoff countdowns.
    #[serde(default)]
    pub active: bool,

    /// The names of all cars, ordered by car index.
    #[serde(default)]
    pub names: Vec<String>,
}

impl TelemetrySnapshot {
    pub fn action_of(&self, car_index: usize) -> Option<&TrackedAction> {
        self.actions.get(&car_index.to_string())
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct TrackedAction {
    /// `None` if the tracker wrote no action, or `null`.
    #[serde(default)]
    pub action: Option<TmcpAction>,

    #[serde(default)]
    pub name: String,

    /// 0 for blue, 1 for orange.
    #[serde(default)]
    pub team: u8,

    /// The game time at which the action was announced.
    #[serde(default)]
    pub time: f64,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct TmcpAction {
    /// f.e. "BALL" or "BOOST"
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
}
