use thiserror::Error;

use crate::network::SourceError;

/// Possible errors when handling a polled resource.
#[derive(Error, Debug)]
pub enum PollError {
    /// The league runner might not be running.
    #[error("failed to fetch {resource}: {source}")]
    Fetch {
        resource: &'static str,
        #[source]
        source: SourceError,
    },

    /// The file might have been read while it was being written.
    #[error("failed to parse {resource}: {source}")]
    Parse {
        resource: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Keeps track of a resource that is polled periodically.
///
/// - Only one fetch can be outstanding at a time: another fetch should not
///   begin until the previous one completed.
/// - Payloads are compared to the previously fetched one as raw text, so that
///   unchanged payloads can be skipped without parsing them.
#[derive(Debug)]
pub struct Feed {
    resource: &'static str,
    previous: Option<String>,
    in_flight: bool,
}

impl Feed {
    pub fn new(resource: &'static str) -> Self {
        Feed {
            resource,
            previous: None,
            in_flight: false,
        }
    }

    /// The name of the polled resource, f.e. `current_match.json`.
    pub fn resource(&self) -> &'static str {
        self.resource
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Mark the start of a fetch.
    ///
    /// Returns `false` if the previous fetch is still outstanding,
    /// in which case no new fetch should be started.
    pub fn begin(&mut self) -> bool {
        if self.in_flight {
            return false;
        }
        self.in_flight = true;
        true
    }

    /// Mark the end of a fetch.
    ///
    /// Returns the new payload, or `None` if it is the same as the previous one.
    /// The payload is remembered even if the caller fails to parse it,
    /// so that a malformed payload is only reported once.
    pub fn complete(
        &mut self,
        result: Result<String, SourceError>,
    ) -> Result<Option<&str>, PollError> {
        self.in_flight = false;

        let raw = result.map_err(|source| PollError::Fetch {
            resource: self.resource,
            source,
        })?;

        if self.previous.as_deref() == Some(raw.as_str()) {
            return Ok(None);
        }
        self.previous = Some(raw);
        Ok(self.previous.as_deref())
    }

    /// Shorthand for a parse error of this feed's resource.
    pub fn parse_error(&self, source: serde_json::Error) -> PollError {
        PollError::Parse {
            resource: self.resource,
            source,
        }
    }
}
