use crate::constants::SUMMARY_FILE;
use crate::controller::{Feed, PollError};
use crate::model::{SchemaVersion, StandingsSummary};
use crate::network::SourceError;

/// The state of the leaderboard and match history display.
#[derive(Debug)]
pub struct StandingsState {
    feed: Feed,
    schema: SchemaVersion,

    /// The latest parsed summary, or `None` if there was no valid one yet.
    summary: Option<StandingsSummary>,
}

impl StandingsState {
    pub fn new(schema: SchemaVersion) -> Self {
        StandingsState {
            feed: Feed::new(SUMMARY_FILE),
            schema,
            summary: None,
        }
    }

    pub fn feed_mut(&mut self) -> &mut Feed {
        &mut self.feed
    }

    pub fn summary(&self) -> Option<&StandingsSummary> {
        self.summary.as_ref()
    }

    /// Handle a fetched `summary.json`.
    ///
    /// Returns `true` if the summary changed, and has to be displayed again.
    pub fn update(&mut self, fetched: Result<String, SourceError>) -> Result<bool, PollError> {
        let raw = match self.feed.complete(fetched)? {
            Some(raw) => raw,
            None => return Ok(false),
        };
        let summary = self
            .schema
            .parse_summary(raw)
            .map_err(|e| self.feed.parse_error(e))?;

        log::info!(
            "new summary with {} ranks and {} matches",
            summary.competitors.len(),
            summary.matches.len()
        );
        self.summary = Some(summary);
        Ok(true)
    }
}
