use crate::{extract, ContactRow, Dom, FeedPager, HarvestError, Listing, ListingExtractor};
use std::collections::HashSet;
use tokio::time::{Duration, Instant};
use tracing::{debug, info};

const FIRST_LISTING_TIMEOUT: Duration = Duration::from_secs(30);
const FIRST_LISTING_POLL: Duration = Duration::from_millis(500);
const INITIAL_SETTLE: Duration = Duration::from_millis(2000);

/// Everything a finished run hands to the export sinks.
#[derive(Debug, Default)]
pub struct Harvest {
    pub listings: Vec<Listing>,
    pub contact_rows: Vec<ContactRow>,
}

/// Run-scoped accumulation state. Names dedup the feed's re-rendered cards;
/// both sequences stay in first-discovery order.
#[derive(Default)]
struct HarvestState {
    seen: HashSet<String>,
    listings: Vec<Listing>,
    contact_rows: Vec<ContactRow>,
}

impl HarvestState {
    fn insert(&mut self, listing: Listing) {
        self.seen.insert(listing.name.clone());
        self.contact_rows.push(ContactRow::from(&listing));
        self.listings.push(listing);
    }
}

/// Drives the pagination loop: enumerate the currently rendered cards,
/// extract each, scroll, repeat until the feed dries up.
#[derive(Debug, Default)]
pub struct Harvester {
    extractor: ListingExtractor,
    pager: FeedPager,
}

impl Harvester {
    pub fn new() -> Self {
        Harvester::default()
    }

    pub async fn run<D: Dom>(&self, dom: &D) -> Result<Harvest, HarvestError> {
        self.wait_for_first_listing(dom).await?;
        tokio::time::sleep(INITIAL_SETTLE).await;

        let mut state = HarvestState::default();
        loop {
            let new_items = self.pass(dom, &mut state).await?;

            // An unproductive pass followed by a failed scroll means the feed
            // is exhausted. After a productive pass we still scroll once to
            // keep prefetching: growth in extracted cards says nothing about
            // whether more are waiting off-screen.
            if new_items == 0 {
                if !self.pager.advance(dom).await {
                    break;
                }
            } else {
                self.pager.advance(dom).await;
            }
        }

        info!("Finished processing! Total items: {}", state.listings.len());
        Ok(Harvest {
            listings: state.listings,
            contact_rows: state.contact_rows,
        })
    }

    /// One full enumeration of the rendered cards. Returns how many new
    /// records were folded into state.
    async fn pass<D: Dom>(&self, dom: &D, state: &mut HarvestState) -> Result<usize, HarvestError> {
        let cards = dom.query_all(None, extract::LISTING).await?;
        debug!("pass over {} rendered cards", cards.len());

        let mut new_items = 0;
        for card in &cards {
            if let Some(listing) = self.extractor.extract(dom, card, &state.seen).await {
                info!(
                    "Processed: {} | Phone: {} | Website: {}",
                    listing.name,
                    listing.phone.as_deref().unwrap_or("None"),
                    listing.website.as_deref().unwrap_or("None"),
                );
                state.insert(listing);
                new_items += 1;
            }
        }
        Ok(new_items)
    }

    async fn wait_for_first_listing<D: Dom>(&self, dom: &D) -> Result<(), HarvestError> {
        let deadline = Instant::now() + FIRST_LISTING_TIMEOUT;
        loop {
            if !dom.query_all(None, extract::LISTING).await?.is_empty() {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(HarvestError::FeedNotFound(FIRST_LISTING_TIMEOUT));
            }
            tokio::time::sleep(FIRST_LISTING_POLL).await;
        }
    }
}
