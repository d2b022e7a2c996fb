/// Overlay version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// User-Agent header for outgoing requests.
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// The environment variable that points to the TOML config file.
pub const CONFIG_ENV_VAR: &str = "OVERLAY_CONFIG";

/// The file written by the league runner whenever a new match starts.
pub const CURRENT_MATCH_FILE: &str = "current_match.json";

/// The file written by the league runner after every match,
/// containing the ranks and the latest matches.
pub const SUMMARY_FILE: &str = "summary.json";

/// The file written by the TMCP tracker script on every game tick.
pub const TELEMETRY_FILE: &str = "data.json";

/// Leaderboard indicator images are located at `<prefix><tag>.png`,
/// relative to the broadcast page.
pub const INDICATOR_IMG_PREFIX: &str = "images/";

/// The title prefix of tip cards made from a fun fact.
pub const FUN_FACT_TITLE: &str = "Fun fact about";

pub const DEFAULT_MATCH_POLL_MILLIS: u64 = 1000;

pub const DEFAULT_SUMMARY_POLL_MILLIS: u64 = 1000;

/// The time after which a fetch is abandoned, so that the next poll can start.
pub const DEFAULT_FETCH_TIMEOUT_MILLIS: u64 = 5000;

/// The time in-between two tip cards.
///
/// This should be long enough to let viewers focus on the match most of the time.
pub const DEFAULT_TIP_INTERVAL_SECS: u64 = 65;

/// The time a tip card stays on screen.
pub const DEFAULT_TIP_VISIBLE_SECS: u64 = 10;

/// The number of players on each side of a match.
pub const TEAM_SIZE: usize = 3;
