use crate::{extract, Dom, HarvestError};
use tokio::time::Duration;
use tracing::{debug, warn};

const SCROLL_STEP: f64 = 800.0;
const SETTLE_DELAY: Duration = Duration::from_millis(2000);
const MOUNT_DELAY: Duration = Duration::from_millis(1000);

/// Advances the result feed by a fixed scroll increment and reports whether
/// the feed actually moved.
#[derive(Debug)]
pub struct FeedPager {
    step: f64,
    settle: Duration,
    mount: Duration,
}

impl Default for FeedPager {
    fn default() -> Self {
        FeedPager {
            step: SCROLL_STEP,
            settle: SETTLE_DELAY,
            mount: MOUNT_DELAY,
        }
    }
}

impl FeedPager {
    /// One scroll advance. `false` means the feed is exhausted, missing, or
    /// errored; all three are the same stall signal to the caller.
    pub async fn advance<D: Dom>(&self, dom: &D) -> bool {
        match self.try_advance(dom).await {
            Ok(grew) => grew,
            Err(e) => {
                warn!("error during scroll: {e}");
                false
            }
        }
    }

    async fn try_advance<D: Dom>(&self, dom: &D) -> Result<bool, HarvestError> {
        let Some(feed) = dom.query(None, extract::FEED).await? else {
            return Ok(false);
        };

        let prev = dom.scroll_top(&feed).await?;
        dom.scroll_by(&feed, self.step).await?;
        tokio::time::sleep(self.settle).await;

        let new = dom.scroll_top(&feed).await?;
        if new <= prev {
            debug!("feed did not move past {prev}");
            return Ok(false);
        }

        // Let freshly inserted cards finish mounting before the next pass
        // reads them.
        tokio::time::sleep(self.mount).await;
        Ok(true)
    }
}
