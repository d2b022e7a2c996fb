use std::sync::Arc;

use dotenv::dotenv;

use league_overlay::config::Config;
use league_overlay::constants::VERSION;
use league_overlay::controller::Overlay;
use league_overlay::network::{DirSource, HttpSource, Source};
use league_overlay::surface::FragmentDir;

/// The overlay's entry-point.
///
/// Exits if the config is invalid, or if the output directory cannot be created.
/// Everything after that is retried on the next poll.
#[tokio::main]
async fn main() {
    // Read environment variables from an '.env' file in the working directory.
    // We use these env vars:
    //  - RUST_LOG
    //  - OVERLAY_CONFIG
    let using_env_file = dotenv().is_ok();

    env_logger::init(); // Use log::* to write to stderr

    if using_env_file {
        log::info!("using .env file")
    }
    log::info!("using league-overlay version '{}'", VERSION);

    let config = match Config::read_from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{:#}", e);
            std::process::exit(1);
        }
    };
    log::debug!("{:#?}", &config);

    let source: Arc<dyn Source> = if config.is_remote_source() {
        Arc::new(HttpSource::new(&config.source))
    } else {
        Arc::new(DirSource::new(&config.source))
    };

    let surface = match FragmentDir::create(&config.output_dir).await {
        Ok(surface) => surface,
        Err(e) => {
            log::error!(
                "cannot create output directory {}: {}",
                config.output_dir.display(),
                e
            );
            std::process::exit(1);
        }
    };
    log::info!(
        "polling '{}', writing fragments to '{}'",
        &config.source,
        surface.dir().display()
    );

    Overlay::new(&config, source, Arc::new(surface)).run().await
}
