use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc;
use tokio::time::Instant;

use league_overlay::config::Config;
use league_overlay::controller::{Fetched, Overlay, Resource};
use league_overlay::network::{Source, SourceError};
use league_overlay::surface::Surface;

const MATCH: &str = r#"{
    "blue": [
        { "name": "Skybot", "developer": "Skyborg", "language": "Java",
          "description": "Loves aerials.", "fun_fact": "Named after a cloud." }
    ],
    "orange": [
        { "name": "Botimus", "developer": "tarehart", "language": "Python",
          "description": "", "fun_fact": "Has a twin." }
    ]
}"#;

const OTHER_MATCH: &str = r#"{
    "blue": [{ "name": "Atlas", "description": "", "fun_fact": "" }],
    "orange": [{ "name": "Kamael", "description": "", "fun_fact": "" }]
}"#;

const SUMMARY: &str = r#"{
    "matches": [
        { "blue_names": ["Skybot"], "orange_names": ["Botimus"], "blue_goals": 3, "orange_goals": 2,
          "complete": true, "surrogate_names": [] }
    ],
    "bots_by_rank": [
        { "bot_id": "Botimus", "mmr": 31.2, "cur_rank": 1, "wins": [true] },
        { "bot_id": "Atlas", "mmr": 28.0, "cur_rank": 2, "wins": [] },
        { "bot_id": "Skybot", "mmr": 25.5, "cur_rank": 3, "wins": [false] }
    ]
}"#;

/// Serves payloads that tests can replace at any time.
/// Resources without a payload fail like a missing file.
#[derive(Default)]
struct FakeSource {
    payloads: Mutex<HashMap<String, String>>,
}

impl FakeSource {
    fn set(&self, resource: &str, payload: &str) {
        self.payloads
            .lock()
            .unwrap()
            .insert(resource.to_string(), payload.to_string());
    }
}

#[async_trait]
impl Source for FakeSource {
    async fn fetch(&self, resource: &str) -> Result<String, SourceError> {
        self.payloads
            .lock()
            .unwrap()
            .get(resource)
            .cloned()
            .ok_or_else(|| SourceError::Io {
                path: PathBuf::from(resource),
                source: io::Error::from(io::ErrorKind::NotFound),
            })
    }
}

/// Never responds, like a server that accepts a connection and goes silent.
struct HangingSource;

#[async_trait]
impl Source for HangingSource {
    async fn fetch(&self, _resource: &str) -> Result<String, SourceError> {
        std::future::pending::<Result<String, SourceError>>().await
    }
}

/// Records every displayed fragment.
#[derive(Default)]
struct FakeSurface {
    shown: Mutex<Vec<(String, String)>>,
}

impl FakeSurface {
    fn shown_in(&self, region: &str) -> Vec<String> {
        self.shown
            .lock()
            .unwrap()
            .iter()
            .filter(|(r, _)| r == region)
            .map(|(_, html)| html.clone())
            .collect()
    }
}

#[async_trait]
impl Surface for FakeSurface {
    async fn show(&self, region: &str, html: &str) -> io::Result<()> {
        self.shown
            .lock()
            .unwrap()
            .push((region.to_string(), html.to_string()));
        Ok(())
    }
}

fn overlay(config_toml: &str) -> Result<(Overlay, Arc<FakeSource>, Arc<FakeSurface>)> {
    // Enable logging output
    let _ = env_logger::builder().is_test(true).try_init();

    let config = Config::parse(config_toml)?;
    let source = Arc::new(FakeSource::default());
    let surface = Arc::new(FakeSurface::default());
    let overlay = Overlay::new(&config, source.clone(), surface.clone())
        .with_rng(StdRng::seed_from_u64(42));
    Ok((overlay, source, surface))
}

fn default_overlay() -> Result<(Overlay, Arc<FakeSource>, Arc<FakeSurface>)> {
    overlay(
        r#"
        source = "overlay"
        output_dir = "out"
        "#,
    )
}

fn fetched(resource: Resource, payload: &str) -> Fetched {
    Fetched {
        resource,
        result: Ok(payload.to_string()),
    }
}

fn not_found(resource: Resource) -> Fetched {
    Fetched {
        resource,
        result: Err(SourceError::Io {
            path: PathBuf::from("current_match.json"),
            source: io::Error::from(io::ErrorKind::NotFound),
        }),
    }
}

#[tokio::test]
async fn test_identical_payloads_render_once() -> Result<()> {
    let (mut overlay, _, surface) = default_overlay()?;

    overlay.on_fetched(fetched(Resource::CurrentMatch, MATCH)).await;
    overlay.on_fetched(fetched(Resource::CurrentMatch, MATCH)).await;
    assert_eq!(1, surface.shown_in("match-info").len());

    overlay.on_fetched(fetched(Resource::CurrentMatch, OTHER_MATCH)).await;
    let shown = surface.shown_in("match-info");
    assert_eq!(2, shown.len());
    assert!(shown[0].contains("Skyborg - java"));
    assert!(shown[1].contains(r#"<div id="team-name-blue">Atlas</div>"#));
    Ok(())
}

#[tokio::test]
async fn test_failures_keep_display() -> Result<()> {
    let (mut overlay, _, surface) = default_overlay()?;

    overlay.on_fetched(fetched(Resource::CurrentMatch, MATCH)).await;
    overlay.on_fetched(not_found(Resource::CurrentMatch)).await;
    overlay.on_fetched(fetched(Resource::CurrentMatch, "{ \"blue\": ")).await;

    assert_eq!(1, surface.shown_in("match-info").len());
    assert_eq!(3, overlay.live().tip_cards().len());

    // The poll loop goes on as usual.
    overlay.on_fetched(fetched(Resource::CurrentMatch, OTHER_MATCH)).await;
    assert_eq!(2, surface.shown_in("match-info").len());
    assert!(overlay.live().tip_cards().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_leaderboard_highlights_live_match() -> Result<()> {
    let (mut overlay, _, surface) = default_overlay()?;

    overlay.on_fetched(fetched(Resource::Summary, SUMMARY)).await;
    let first = surface.shown_in("leaderboard-table");
    assert_eq!(1, first.len());
    assert!(!first[0].contains("playing-"));
    assert_eq!(1, surface.shown_in("matches-table").len());
    assert!(surface.shown_in("matches-table")[0].contains("match-item blue-close"));

    // A new match re-renders the leaderboard, but not the match history.
    overlay.on_fetched(fetched(Resource::CurrentMatch, MATCH)).await;
    let leaderboards = surface.shown_in("leaderboard-table");
    assert_eq!(2, leaderboards.len());
    assert!(leaderboards[1].contains("leaderboard-item playing-orange"));
    assert!(leaderboards[1].contains("leaderboard-item even"));
    assert!(leaderboards[1].contains("leaderboard-item playing-blue"));
    assert_eq!(1, surface.shown_in("matches-table").len());
    Ok(())
}

#[tokio::test]
async fn test_legacy_summary() -> Result<()> {
    let (mut overlay, _, surface) = overlay(
        r#"
        source = "overlay"
        output_dir = "out"
        schema = "legacy"
        "#,
    )?;

    let legacy = r#"{
        "bots_by_rank": [{ "bot_id": "Skybot", "mmr": 25.5, "sigma": 1.0, "cur_rank": 1, "old_rank": null, "tickets": 4 }],
        "matches": [{ "blue_names": ["Skybot"], "orange_names": ["Botimus"], "blue_goals": 0, "orange_goals": 4 }]
    }"#;
    overlay.on_fetched(fetched(Resource::Summary, legacy)).await;

    assert_eq!(1, overlay.standings().summary().unwrap().competitors.len());
    assert!(surface.shown_in("leaderboard-table")[0].contains("25.5"));
    assert!(surface.shown_in("matches-table")[0].contains("match-item orange-win"));
    Ok(())
}

#[tokio::test]
async fn test_single_flight() -> Result<()> {
    let (mut overlay, source, surface) = default_overlay()?;
    source.set("current_match.json", MATCH);
    let (tx, mut rx) = mpsc::unbounded_channel();

    assert!(overlay.start_fetch(Resource::CurrentMatch, &tx));
    assert!(!overlay.start_fetch(Resource::CurrentMatch, &tx));

    // Other resources are polled independently.
    assert!(overlay.start_fetch(Resource::Summary, &tx));

    // Telemetry is disabled.
    assert!(!overlay.start_fetch(Resource::Telemetry, &tx));

    let mut handled = 0;
    while handled < 2 {
        let fetched = rx.recv().await.expect("fetch task dropped its sender");
        overlay.on_fetched(fetched).await;
        handled += 1;
    }
    assert_eq!(1, surface.shown_in("match-info").len());
    assert!(overlay.start_fetch(Resource::CurrentMatch, &tx));
    Ok(())
}

#[tokio::test]
async fn test_hanging_fetch_times_out() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let config = Config::parse(
        r#"
        source = "overlay"
        output_dir = "out"
        fetch_timeout_millis = 50
        "#,
    )?;
    let surface = Arc::new(FakeSurface::default());
    let mut overlay = Overlay::new(&config, Arc::new(HangingSource), surface.clone());
    let (tx, mut rx) = mpsc::unbounded_channel();

    assert!(overlay.start_fetch(Resource::Summary, &tx));
    assert!(!overlay.start_fetch(Resource::Summary, &tx));

    let fetched = rx.recv().await.expect("fetch task dropped its sender");
    assert_eq!(Resource::Summary, fetched.resource);
    assert!(matches!(fetched.result, Err(SourceError::Timeout { .. })));
    overlay.on_fetched(fetched).await;

    // The next poll is not blocked by the abandoned fetch.
    assert!(overlay.start_fetch(Resource::Summary, &tx));
    assert!(surface.shown_in("leaderboard-table").is_empty());
    Ok(())
}

#[tokio::test]
async fn test_incomplete_summary_rows() -> Result<()> {
    let (mut overlay, _, surface) = default_overlay()?;
    let summary = r#"{
        "matches": [
            { "blue_names": ["Skybot"], "orange_names": ["Botimus"], "blue_goals": 3, "complete": true },
            { "blue_names": ["Atlas"], "orange_names": ["Kamael"], "blue_goals": 0, "orange_goals": 2, "complete": true }
        ],
        "bots_by_rank": [
            { "bot_id": "Botimus", "mmr": 31.2, "wins": [true] },
            { "bot_id": "Atlas", "mmr": 28.0, "cur_rank": 2, "wins": [] }
        ]
    }"#;
    overlay.on_fetched(fetched(Resource::Summary, summary)).await;

    let leaderboard = surface.shown_in("leaderboard-table");
    assert_eq!(1, leaderboard.len());
    assert_eq!(2, leaderboard[0].matches(r#"class="leaderboard-item"#).count());
    assert!(leaderboard[0].contains(r#"<p class="center"></p>"#));
    assert!(leaderboard[0].contains(r#"<p class="center">2</p>"#));

    let history = surface.shown_in("matches-table");
    assert_eq!(1, history.len());
    assert!(history[0].contains(r#"<p class="match-score orange-score"></p>"#));
    assert!(history[0].contains(r#"<div class="match-item orange-win">"#));
    Ok(())
}

#[tokio::test]
async fn test_tip_rotation() -> Result<()> {
    let (mut overlay, _, surface) = default_overlay()?;

    // Nothing to show yet.
    overlay.rotate_tip(Instant::now()).await;
    assert!(surface.shown_in("tipcard").is_empty());
    assert_eq!(None, overlay.live().tip_hide_deadline());

    overlay.on_fetched(fetched(Resource::CurrentMatch, MATCH)).await;
    let now = Instant::now();
    overlay.rotate_tip(now).await;

    let shown = surface.shown_in("tipcard");
    assert_eq!(1, shown.len());
    assert!(shown[0].contains("visible"));
    assert!(
        shown[0].contains("Loves aerials.")
            || shown[0].contains("Named after a cloud.")
            || shown[0].contains("Has a twin.")
    );
    assert_eq!(
        Some(now + std::time::Duration::from_secs(10)),
        overlay.live().tip_hide_deadline()
    );

    overlay.hide_tip().await;
    let shown = surface.shown_in("tipcard");
    assert_eq!(2, shown.len());
    assert!(!shown[1].contains("visible"));
    assert_eq!(None, overlay.live().tip_hide_deadline());
    Ok(())
}

#[tokio::test]
async fn test_telemetry_panel() -> Result<()> {
    let (mut overlay, _, surface) = overlay(
        r#"
        source = "overlay"
        output_dir = "out"
        telemetry_poll_millis = 100
        "#,
    )?;

    let data = r#"{
        "actions": { "0": { "action": { "type": "BALL" }, "name": "Skybot", "team": 0, "time": 3.0 } },
        "time": 4.0,
        "active": true,
        "names": ["Skybot", "Botimus"]
    }"#;
    overlay.on_fetched(fetched(Resource::Telemetry, data)).await;
    overlay.on_fetched(fetched(Resource::Telemetry, data)).await;

    let shown = surface.shown_in("tmcp");
    assert_eq!(1, shown.len());
    assert!(shown[0].contains("⚽"));
    assert!(shown[0].contains("Botimus"));
    Ok(())
}
