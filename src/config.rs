use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{ensure, Context};
use serde::Deserialize;

use crate::constants::*;
use crate::model::SchemaVersion;

/// Overlay config.
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    /// Where the league runner puts its JSON files. Either a local directory,
    /// or a base URL starting with `http://` or `https://`.
    pub source: String,

    /// The directory that HTML fragments are written to. The broadcast
    /// page is expected to include `<output_dir>/<region>.html`
    /// for every region it displays.
    pub output_dir: PathBuf,

    /// The shape of `summary.json`. Older league runners write the
    /// `legacy` shape, without match outcomes and surrogates.
    #[serde(default)]
    pub schema: SchemaVersion,

    /// The period in which `current_match.json` is polled.
    #[serde(default = "default_match_poll_millis")]
    pub match_poll_millis: u64,

    /// The period in which `summary.json` is polled.
    #[serde(default = "default_summary_poll_millis")]
    pub summary_poll_millis: u64,

    /// The time after which a fetch is abandoned. Until then, no other
    /// fetch of the same resource is started.
    #[serde(default = "default_fetch_timeout_millis")]
    pub fetch_timeout_millis: u64,

    /// The time in-between two tip cards.
    #[serde(default = "default_tip_interval_secs")]
    pub tip_interval_secs: u64,

    /// The time a tip card is displayed. Must be shorter than `tip_interval_secs`.
    #[serde(default = "default_tip_visible_secs")]
    pub tip_visible_secs: u64,

    /// The period in which the TMCP tracker's `data.json` is polled.
    ///
    /// The telemetry panel is only rendered if this is set.
    /// The tracker writes its file on every game tick, so something like
    /// 100ms is reasonable.
    #[serde(default)]
    pub telemetry_poll_millis: Option<u64>,
}

fn default_match_poll_millis() -> u64 {
    DEFAULT_MATCH_POLL_MILLIS
}

fn default_summary_poll_millis() -> u64 {
    DEFAULT_SUMMARY_POLL_MILLIS
}

fn default_fetch_timeout_millis() -> u64 {
    DEFAULT_FETCH_TIMEOUT_MILLIS
}

fn default_tip_interval_secs() -> u64 {
    DEFAULT_TIP_INTERVAL_SECS
}

fn default_tip_visible_secs() -> u64 {
    DEFAULT_TIP_VISIBLE_SECS
}

impl Config {
    /// Read the config file listed in the `OVERLAY_CONFIG` environment variable.
    pub fn read_from_env() -> anyhow::Result<Config> {
        let path = std::env::var(CONFIG_ENV_VAR)
            .with_context(|| format!("cannot locate config: use the '{}' env var", CONFIG_ENV_VAR))?;
        Config::read_from_file(Path::new(&path))
    }

    pub fn read_from_file(path: &Path) -> anyhow::Result<Config> {
        let f_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = Config::parse(&f_str)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        Ok(config)
    }

    pub fn parse(toml_str: &str) -> anyhow::Result<Config> {
        let config: Config = toml::from_str(toml_str)?;
        check_config(&config)?;
        Ok(config)
    }

    pub fn match_poll_interval(&self) -> Duration {
        Duration::from_millis(self.match_poll_millis)
    }

    pub fn summary_poll_interval(&self) -> Duration {
        Duration::from_millis(self.summary_poll_millis)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_millis)
    }

    pub fn tip_interval(&self) -> Duration {
        Duration::from_secs(self.tip_interval_secs)
    }

    pub fn tip_visible(&self) -> Duration {
        Duration::from_secs(self.tip_visible_secs)
    }

    pub fn telemetry_poll_interval(&self) -> Option<Duration> {
        self.telemetry_poll_millis.map(Duration::from_millis)
    }

    /// `True` if `source` is a base URL rather than a directory.
    pub fn is_remote_source(&self) -> bool {
        self.source.starts_with("http://") || self.source.starts_with("https://")
    }
}

/// Try to catch configuration errors early.
fn check_config(config: &Config) -> anyhow::Result<()> {
    ensure!(
        config.match_poll_millis > 0 && config.summary_poll_millis > 0,
        "config: poll periods must be larger than zero!"
    );
    ensure!(
        config.telemetry_poll_millis != Some(0),
        "config: 'telemetry_poll_millis' must be larger than zero!"
    );
    ensure!(
        config.fetch_timeout_millis > 0,
        "config: 'fetch_timeout_millis' must be larger than zero!"
    );
    ensure!(
        config.tip_visible_secs > 0,
        "config: 'tip_visible_secs' must be larger than zero!"
    );
    ensure!(
        config.tip_interval_secs > config.tip_visible_secs,
        "config: 'tip_interval_secs' must be larger than 'tip_visible_secs'!"
    );
    Ok(())
}
