use crate::{Dom, HarvestError};
use scraper::{ElementRef, Html, Selector};

/// [`Dom`] over a static HTML document.
///
/// Lets extraction run against a saved copy of the feed, for fixture tests
/// or offline replay of a page snapshot. Nodes carry their own serialized
/// markup, so scoped queries re-parse the node as a fragment. Nothing here
/// scrolls: the pager sees every snapshot as an exhausted feed.
pub struct SnapshotDom {
    document: Html,
}

/// A detached element: its outer HTML.
#[derive(Debug, Clone)]
pub struct SnapshotNode(String);

impl SnapshotDom {
    pub fn parse(html: &str) -> Self {
        SnapshotDom {
            document: Html::parse_document(html),
        }
    }
}

fn parse_selector(selector: &str) -> Result<Selector, HarvestError> {
    Selector::parse(selector).map_err(|_| HarvestError::Selector(selector.to_string()))
}

/// The element a node was detached from: the first element under the
/// fragment's synthetic root.
fn fragment_element(fragment: &Html) -> Option<ElementRef<'_>> {
    fragment
        .root_element()
        .children()
        .filter_map(ElementRef::wrap)
        .next()
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

#[async_trait::async_trait(?Send)]
impl Dom for SnapshotDom {
    type Node = SnapshotNode;

    async fn query(
        &self,
        scope: Option<&SnapshotNode>,
        selector: &str,
    ) -> Result<Option<SnapshotNode>, HarvestError> {
        Ok(self.query_all(scope, selector).await?.into_iter().next())
    }

    async fn query_all(
        &self,
        scope: Option<&SnapshotNode>,
        selector: &str,
    ) -> Result<Vec<SnapshotNode>, HarvestError> {
        let sel = parse_selector(selector)?;
        match scope {
            None => Ok(self
                .document
                .select(&sel)
                .map(|el| SnapshotNode(el.html()))
                .collect()),
            Some(node) => {
                let fragment = Html::parse_fragment(&node.0);
                let Some(root) = fragment_element(&fragment) else {
                    return Ok(vec![]);
                };
                Ok(root
                    .select(&sel)
                    .map(|el| SnapshotNode(el.html()))
                    .collect())
            }
        }
    }

    async fn text(&self, node: &SnapshotNode) -> Result<String, HarvestError> {
        let fragment = Html::parse_fragment(&node.0);
        Ok(fragment_element(&fragment)
            .map(element_text)
            .unwrap_or_default())
    }

    async fn attribute(
        &self,
        node: &SnapshotNode,
        name: &str,
    ) -> Result<Option<String>, HarvestError> {
        let fragment = Html::parse_fragment(&node.0);
        Ok(fragment_element(&fragment)
            .and_then(|el| el.value().attr(name))
            .map(ToString::to_string))
    }

    async fn scroll_top(&self, _node: &SnapshotNode) -> Result<f64, HarvestError> {
        Err(HarvestError::NotScrollable)
    }

    async fn scroll_by(&self, _node: &SnapshotNode, _delta: f64) -> Result<(), HarvestError> {
        Err(HarvestError::NotScrollable)
    }
}
