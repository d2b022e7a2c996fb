use rand::seq::SliceRandom;
use rand::Rng;
use tokio::time::Instant;

use crate::constants::{CURRENT_MATCH_FILE, FUN_FACT_TITLE};
use crate::controller::{Feed, PollError};
use crate::model::{LiveMatchInfo, LiveMatchRef, TipCard};
use crate::network::SourceError;

/// The state of the current match display, and of the tip cards
/// about its participants.
///
/// Everything is replaced at once whenever `current_match.json` changes.
#[derive(Debug)]
pub struct LiveInfoState {
    feed: Feed,

    /// The latest parsed match info, or `None` if there was no valid one yet.
    info: Option<LiveMatchInfo>,

    /// Pool of tip cards to pick from.
    tip_cards: Vec<TipCard>,

    /// The moment the currently displayed tip card should be hidden,
    /// or `None` if no card is displayed.
    tip_hide_at: Option<Instant>,
}

impl Default for LiveInfoState {
    fn default() -> Self {
        LiveInfoState {
            feed: Feed::new(CURRENT_MATCH_FILE),
            info: None,
            tip_cards: vec![],
            tip_hide_at: None,
        }
    }
}

impl LiveInfoState {
    pub fn feed_mut(&mut self) -> &mut Feed {
        &mut self.feed
    }

    pub fn info(&self) -> Option<&LiveMatchInfo> {
        self.info.as_ref()
    }

    /// The players of the current match, or `None` if unknown.
    pub fn live_ref(&self) -> Option<LiveMatchRef> {
        self.info.as_ref().map(LiveMatchInfo::to_ref)
    }

    pub fn tip_cards(&self) -> &[TipCard] {
        &self.tip_cards
    }

    /// Handle a fetched `current_match.json`.
    ///
    /// Returns `true` if the match info changed, and has to be displayed again.
    pub fn update(&mut self, fetched: Result<String, SourceError>) -> Result<bool, PollError> {
        let raw = match self.feed.complete(fetched)? {
            Some(raw) => raw,
            None => return Ok(false),
        };
        let info: LiveMatchInfo =
            serde_json::from_str(raw).map_err(|e| self.feed.parse_error(e))?;

        self.tip_cards = tip_cards(&info);
        self.info = Some(info);
        log::info!("new match info with {} tip cards", self.tip_cards.len());
        Ok(true)
    }

    /// Pick a random tip card, or `None` if there are none.
    pub fn pick_tip<R: Rng>(&self, rng: &mut R) -> Option<&TipCard> {
        self.tip_cards.choose(rng)
    }

    pub fn tip_hide_deadline(&self) -> Option<Instant> {
        self.tip_hide_at
    }

    pub fn set_tip_hide_deadline(&mut self, deadline: Option<Instant>) {
        self.tip_hide_at = deadline;
    }
}

/// Make tip cards from every bot's description and fun fact,
/// unless they are blank.
pub fn tip_cards(info: &LiveMatchInfo) -> Vec<TipCard> {
    let non_blank = |s: &Option<String>| {
        s.as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
    };

    let mut cards = Vec::new();
    for profile in info.profiles() {
        let name = profile.name.trim();
        if let Some(text) = non_blank(&profile.description) {
            cards.push(TipCard {
                title: name.to_string(),
                text,
            });
        }
        if let Some(text) = non_blank(&profile.fun_fact) {
            cards.push(TipCard {
                title: format!("{} {}", FUN_FACT_TITLE, name),
                text,
            });
        }
    }
    cards
}
