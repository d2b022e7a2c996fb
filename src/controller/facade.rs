use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::config::Config;
use crate::controller::*;
use crate::network::{fetch_with_timeout, Source, SourceError};
use crate::surface::Surface;
use crate::widget::*;

/// The resources that the overlay polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    CurrentMatch,
    Summary,
    Telemetry,
}

/// The result of a fetch, sent back to the loop from the task that fetched it.
#[derive(Debug)]
pub struct Fetched {
    pub resource: Resource,
    pub result: Result<String, SourceError>,
}

/// The periods of every timer.
#[derive(Debug, Clone, Copy)]
pub struct Timing {
    pub match_poll: Duration,
    pub summary_poll: Duration,
    pub telemetry_poll: Option<Duration>,
    pub fetch_timeout: Duration,
    pub tip_interval: Duration,
    pub tip_visible: Duration,
}

impl From<&Config> for Timing {
    fn from(config: &Config) -> Self {
        Timing {
            match_poll: config.match_poll_interval(),
            summary_poll: config.summary_poll_interval(),
            telemetry_poll: config.telemetry_poll_interval(),
            fetch_timeout: config.fetch_timeout(),
            tip_interval: config.tip_interval(),
            tip_visible: config.tip_visible(),
        }
    }
}

/// Used for the telemetry timer when the panel is disabled. It never fires
/// a branch anyway.
const IDLE_PERIOD: Duration = Duration::from_secs(3600);

/// Owns the state of every displayed region, and updates them
/// as resources are fetched and timers fire.
///
/// All handlers run to completion on the loop in `run`, one at a time.
/// Only the fetches themselves run in separate tasks, so that a slow
/// fetch does not delay tip cards or other resources.
pub struct Overlay {
    source: Arc<dyn Source>,
    surface: Arc<dyn Surface>,
    timing: Timing,
    live: LiveInfoState,
    standings: StandingsState,
    telemetry: Option<TelemetryState>,
    rng: StdRng,
}

impl Overlay {
    pub fn new(config: &Config, source: Arc<dyn Source>, surface: Arc<dyn Surface>) -> Self {
        let timing = Timing::from(config);
        Overlay {
            source,
            surface,
            timing,
            live: LiveInfoState::default(),
            standings: StandingsState::new(config.schema),
            telemetry: timing.telemetry_poll.map(|_| TelemetryState::default()),
            rng: StdRng::from_entropy(),
        }
    }

    /// Use a seeded RNG to pick tip cards.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn live(&self) -> &LiveInfoState {
        &self.live
    }

    pub fn standings(&self) -> &StandingsState {
        &self.standings
    }

    /// Poll and display until the process is stopped.
    pub async fn run(mut self) {
        let (tx, mut rx) = mpsc::unbounded_channel::<Fetched>();

        let mut match_timer = time::interval(self.timing.match_poll);
        let mut summary_timer = time::interval(self.timing.summary_poll);
        let mut telemetry_timer =
            time::interval(self.timing.telemetry_poll.unwrap_or(IDLE_PERIOD));

        // The first tip card is shown after a full interval.
        let tip_interval = self.timing.tip_interval;
        let mut tip_timer = time::interval_at(Instant::now() + tip_interval, tip_interval);

        // Don't try to catch up on missed polls.
        match_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        summary_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        telemetry_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tip_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        log::info!("running poll loop...");
        loop {
            let hide_at = self.live.tip_hide_deadline();
            tokio::select! {
                _ = match_timer.tick() => {
                    self.start_fetch(Resource::CurrentMatch, &tx);
                }
                _ = summary_timer.tick() => {
                    self.start_fetch(Resource::Summary, &tx);
                }
                _ = telemetry_timer.tick(), if self.telemetry.is_some() => {
                    self.start_fetch(Resource::Telemetry, &tx);
                }
                Some(fetched) = rx.recv() => {
                    self.on_fetched(fetched).await;
                }
                now = tip_timer.tick() => {
                    self.rotate_tip(now).await;
                }
                _ = time::sleep_until(hide_at.unwrap_or_else(Instant::now)), if hide_at.is_some() => {
                    self.hide_tip().await;
                }
            }
        }
    }

    fn feed_mut(&mut self, resource: Resource) -> Option<&mut Feed> {
        match resource {
            Resource::CurrentMatch => Some(self.live.feed_mut()),
            Resource::Summary => Some(self.standings.feed_mut()),
            Resource::Telemetry => self.telemetry.as_mut().map(TelemetryState::feed_mut),
        }
    }

    /// Fetch a resource in a separate task, and send the result to `tx`.
    ///
    /// Returns `false` if the previous fetch of that resource is still in flight,
    /// in which case no fetch is started. A fetch that does not finish in time
    /// is sent as a `SourceError::Timeout`, so a hanging source cannot
    /// block a resource for good.
    pub fn start_fetch(&mut self, resource: Resource, tx: &UnboundedSender<Fetched>) -> bool {
        let feed = match self.feed_mut(resource) {
            Some(feed) => feed,
            None => return false,
        };
        let name = feed.resource();
        if !feed.begin() {
            log::debug!("skip poll of {}: previous request still in flight", name);
            return false;
        }

        let source = self.source.clone();
        let after = self.timing.fetch_timeout;
        let tx = tx.clone();
        let _ = tokio::spawn(async move {
            let result = fetch_with_timeout(source.as_ref(), name, after).await;
            // The receiver only disconnects when the loop stops.
            let _ = tx.send(Fetched { resource, result });
        });
        true
    }

    /// Update the state of a fetched resource, and display the widgets
    /// that changed as a result.
    ///
    /// Failures are logged, and leave the displayed widgets as they are.
    pub async fn on_fetched(&mut self, fetched: Fetched) {
        let Fetched { resource, result } = fetched;
        match resource {
            Resource::CurrentMatch => match self.live.update(result) {
                Ok(true) => {
                    if let Some(info) = self.live.info() {
                        self.show(&MatchInfoWidget::new(info)).await;
                    }
                    // Players of the new match are highlighted.
                    self.show_leaderboard().await;
                }
                Ok(false) => {}
                Err(e) => log::warn!("{}", e),
            },
            Resource::Summary => match self.standings.update(result) {
                Ok(true) => {
                    self.show_leaderboard().await;
                    if let Some(summary) = self.standings.summary() {
                        self.show(&MatchHistoryWidget::new(&summary.matches)).await;
                    }
                }
                Ok(false) => {}
                Err(e) => log::warn!("{}", e),
            },
            Resource::Telemetry => {
                let telemetry = match self.telemetry.as_mut() {
                    Some(telemetry) => telemetry,
                    None => return,
                };
                match telemetry.update(result) {
                    Ok(true) => {
                        if let Some(snapshot) = self.telemetry.as_ref().and_then(|t| t.snapshot()) {
                            self.show(&TelemetryWidget::new(snapshot)).await;
                        }
                    }
                    Ok(false) => {}
                    Err(e) => log::warn!("{}", e),
                }
            }
        }
    }

    async fn show_leaderboard(&self) {
        if let Some(summary) = self.standings.summary() {
            let live = self.live.live_ref();
            self.show(&LeaderboardWidget::new(summary, live.as_ref())).await;
        }
    }

    /// Display a random tip card, unless there are none.
    pub async fn rotate_tip(&mut self, now: Instant) {
        let card = match self.live.pick_tip(&mut self.rng) {
            Some(card) => card.clone(),
            None => return,
        };
        log::debug!("show tip card '{}'", &card.title);
        self.show(&TipCardWidget::new(&card)).await;
        self.live.set_tip_hide_deadline(Some(now + self.timing.tip_visible));
    }

    /// Hide the displayed tip card.
    pub async fn hide_tip(&mut self) {
        self.live.set_tip_hide_deadline(None);
        match TipCardWidget::hidden() {
            Ok(html) => self.display(TipCardWidget::REGION, &html).await,
            Err(e) => log::error!("failed to render hidden {}: {}", TipCardWidget::FILE, e),
        }
    }

    async fn show<W: Widget>(&self, widget: &W) {
        match widget.render() {
            Ok(html) => self.display(W::REGION, &html).await,
            Err(e) => log::error!("failed to render {}: {}", W::FILE, e),
        }
    }

    async fn display(&self, region: &str, html: &str) {
        if let Err(e) = self.surface.show(region, html).await {
            log::warn!("failed to display {}: {}", region, e);
        }
    }
}
