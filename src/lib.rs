pub mod chrome;
pub mod export;
pub mod snapshot;

mod error;
mod extract;
mod harvester;
mod pager;
mod phone;
mod record;

pub use error::HarvestError;
pub use extract::ListingExtractor;
pub use harvester::{Harvest, Harvester};
pub use pager::FeedPager;
pub use record::{ContactRow, Listing};

/// Capability the core needs from a rendered page.
///
/// Nodes are borrowed handles into the page's current render. Virtualized
/// feeds recycle them, so a node fetched in one pass must not be consulted
/// in a later one. `scope: None` queries from the document root.
///
/// Futures are `?Send`: the whole run is one cooperative logical thread.
#[async_trait::async_trait(?Send)]
pub trait Dom {
    type Node;

    async fn query(
        &self,
        scope: Option<&Self::Node>,
        selector: &str,
    ) -> Result<Option<Self::Node>, HarvestError>;

    async fn query_all(
        &self,
        scope: Option<&Self::Node>,
        selector: &str,
    ) -> Result<Vec<Self::Node>, HarvestError>;

    async fn text(&self, node: &Self::Node) -> Result<String, HarvestError>;

    async fn attribute(
        &self,
        node: &Self::Node,
        name: &str,
    ) -> Result<Option<String>, HarvestError>;

    /// Current scroll offset of a scrollable container.
    async fn scroll_top(&self, node: &Self::Node) -> Result<f64, HarvestError>;

    /// Advance a scrollable container's offset by `delta` pixels.
    async fn scroll_by(&self, node: &Self::Node, delta: f64) -> Result<(), HarvestError>;
}
