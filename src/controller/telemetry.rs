use crate::constants::TELEMETRY_FILE;
use crate::controller::{Feed, PollError};
use crate::model::TelemetrySnapshot;
use crate::network::SourceError;

/// The state of the TMCP telemetry panel.
#[derive(Debug)]
pub struct TelemetryState {
    feed: Feed,
    snapshot: Option<TelemetrySnapshot>,
}

impl Default for TelemetryState {
    fn default() -> Self {
        TelemetryState {
            feed: Feed::new(TELEMETRY_FILE),
            snapshot: None,
        }
    }
}

impl TelemetryState {
    pub fn feed_mut(&mut self) -> &mut Feed {
        &mut self.feed
    }

    pub fn snapshot(&self) -> Option<&TelemetrySnapshot> {
        self.snapshot.as_ref()
    }

    /// Handle a fetched `data.json`.
    ///
    /// Returns `true` if the snapshot changed.
    pub fn update(&mut self, fetched: Result<String, SourceError>) -> Result<bool, PollError> {
        let raw = match self.feed.complete(fetched)? {
            Some(raw) => raw,
            None => return Ok(false),
        };
        let snapshot: TelemetrySnapshot =
            serde_json::from_str(raw).map_err(|e| self.feed.parse_error(e))?;
        self.snapshot = Some(snapshot);
        Ok(true)
    }
}
