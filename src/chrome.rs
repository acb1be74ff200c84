use crate::{Dom, HarvestError};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::element::Element;
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, info};

const SEARCH_URL: &str = "https://www.google.com/maps/search/";

/// Owns the Chromium process and its CDP event loop.
pub struct ChromeSession {
    browser: Browser,
    event_loop: JoinHandle<()>,
}

impl ChromeSession {
    pub async fn launch(headless: bool) -> Result<Self, HarvestError> {
        let mut config = BrowserConfig::builder();
        if !headless {
            config = config.with_head();
        }
        let config = config.build().map_err(HarvestError::Launch)?;

        let (browser, mut handler) = Browser::launch(config).await?;
        let event_loop = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        Ok(ChromeSession {
            browser,
            event_loop,
        })
    }

    /// Navigates a fresh tab to the result feed for `query`, typed the way
    /// it would be typed into the maps search box.
    pub async fn open_search(&self, query: &str) -> Result<SearchPage, HarvestError> {
        let url = format!("{SEARCH_URL}{}", query.replace(' ', "+"));
        info!("Processing URL: {url}");

        let page = self.browser.new_page(url).await?;
        page.wait_for_navigation().await?;
        Ok(SearchPage { page })
    }

    pub async fn close(mut self) -> Result<(), HarvestError> {
        self.browser.close().await?;
        self.browser.wait().await?;
        let _ = self.event_loop.await;
        Ok(())
    }
}

/// A rendered maps search-result page.
pub struct SearchPage {
    page: Page,
}

#[async_trait::async_trait(?Send)]
impl Dom for SearchPage {
    type Node = Element;

    async fn query(
        &self,
        scope: Option<&Element>,
        selector: &str,
    ) -> Result<Option<Element>, HarvestError> {
        Ok(self.query_all(scope, selector).await?.into_iter().next())
    }

    async fn query_all(
        &self,
        scope: Option<&Element>,
        selector: &str,
    ) -> Result<Vec<Element>, HarvestError> {
        let found = match scope {
            Some(el) => el.find_elements(selector).await,
            None => self.page.find_elements(selector).await,
        };
        match found {
            Ok(elements) => Ok(elements),
            // CDP reports an empty match set as a missing-node error.
            Err(chromiumoxide::error::CdpError::NotFound) => Ok(vec![]),
            Err(e) => Err(e.into()),
        }
    }

    async fn text(&self, node: &Element) -> Result<String, HarvestError> {
        Ok(node.inner_text().await?.unwrap_or_default())
    }

    async fn attribute(&self, node: &Element, name: &str) -> Result<Option<String>, HarvestError> {
        Ok(node.attribute(name).await?)
    }

    async fn scroll_top(&self, node: &Element) -> Result<f64, HarvestError> {
        let ret = node
            .call_js_fn("function() { return this.scrollTop; }", false)
            .await?;
        debug!("feed scrollTop = {:?}", ret.result.value);
        ret.result
            .value
            .as_ref()
            .and_then(serde_json::Value::as_f64)
            .ok_or(HarvestError::NotScrollable)
    }

    async fn scroll_by(&self, node: &Element, delta: f64) -> Result<(), HarvestError> {
        node.call_js_fn(
            format!("function() {{ this.scrollTop += {delta}; }}"),
            false,
        )
        .await?;
        Ok(())
    }
}
