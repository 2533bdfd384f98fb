use dotenv::dotenv;
use ideas_listing::cache::CachedSource;
use ideas_listing::config::AppConfig;
use ideas_listing::render::{self, RenderOptions};
use ideas_listing::session::{Input, ListingSession};
use ideas_listing::view::ListingView;
use ideas_listing::{IdeasClient, ListingError};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), ListingError> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::from_env();
    // A location given on the command line wins, e.g. `/ideas?page=2&size=20`.
    let start_location = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config.start_location.clone());

    let client = IdeasClient::new(&config.api_url, config.http_timeout)?;
    let source = Arc::new(CachedSource::new(client, config.cache));
    let view = ListingView::from_location(&start_location, config.sibling_count)?;
    tracing::info!("Fetching ideas from {}", config.api_url);

    let options = RenderOptions {
        offset: render::display_offset(config.utc_offset_hours),
        ..RenderOptions::default()
    };

    let (action_tx, action_rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if line.trim().is_empty() {
                continue;
            }
            match Input::parse(&line) {
                Ok(Input::Quit) => break,
                Ok(Input::Action(action)) => {
                    if action_tx.send(action).is_err() {
                        break;
                    }
                }
                Err(e) => eprintln!("{e}"),
            }
        }
    });

    let view = ListingSession::new(source, view)
        .run(action_rx, |view| {
            println!("{}", render::render_view(view, &options));
            println!("{}", view.location().path_and_query());
        })
        .await;

    tracing::info!("Left listing at {}", view.location().path_and_query());
    Ok(())
}
