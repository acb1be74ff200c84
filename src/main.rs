use clap::Parser;
use gmaps_harvester::chrome::ChromeSession;
use gmaps_harvester::{export, Harvester};
use std::path::Path;
use tracing::error;
use tracing_error::ErrorLayer;
use tracing_subscriber::prelude::*;

const JSON_OUT: &str = "gmap_data.json";

/// Harvest business listings from a maps search-result feed.
#[derive(Debug, Parser)]
struct Args {
    /// Search query, as you would type it into the maps search box.
    query: String,

    /// Show the browser window instead of running headless.
    #[arg(long)]
    headful: bool,
}

async fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let session = ChromeSession::launch(!args.headful).await?;
    let page = session.open_search(&args.query).await?;

    let harvest = Harvester::new().run(&page).await?;

    export::write_listings_json(Path::new(JSON_OUT), &harvest.listings)?;
    export::write_contact_csv(
        Path::new(&format!("{}.csv", args.query)),
        &harvest.contact_rows,
    )?;

    session.close().await?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_env("LOG_LEVEL")
                .unwrap_or_else(|_| "info,chromiumoxide=warn,tungstenite=warn".into()),
        )
        .with(ErrorLayer::default())
        .init();

    let args = Args::parse();
    if let Err(e) = run(&args).await {
        error!("Error in scraping run: {e}");
        std::process::exit(1);
    }
}
