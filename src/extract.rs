use crate::{phone, Dom, HarvestError, Listing};
use std::collections::HashSet;
use tracing::warn;

/// One rendered business card in the result feed.
pub const LISTING: &str = ".Nv2PK";
/// The scrollable container holding the listing cards.
pub const FEED: &str = r#"div[role="feed"]"#;

const NAME: &str = ".qBF1Pd";
const RATING: &str = ".MW4etd";
const REVIEWS: &str = ".UY7F9";
const PRICE: &str = ".wcldff";
const LINK: &str = "a.hfpxzc";
const WEBSITE: &str = ".lcr4fd";
const CATEGORY: &str = ".W4Efsd:nth-child(1)";
const DETAIL_ROW: &str = ".W4Efsd";
const AMENITY: &str = ".dc6iWb";

/// The small-field group repeats without labels; which row holds the phone
/// number varies per card, so all four positions are kept as candidates.
const PHONE_SLOTS: [&str; 4] = [
    ".W4Efsd:nth-child(2)",
    ".W4Efsd:nth-child(2)",
    ".W4Efsd:nth-child(3)",
    ".W4Efsd:nth-child(4)",
];

/// Raw per-card slot reads, before normalization. A missing source element
/// is `None`, never an empty string.
struct RawFields {
    name: String,
    rating: Option<String>,
    reviews: Option<String>,
    price: Option<String>,
    phone_candidates: Vec<Option<String>>,
    description: Option<Vec<String>>,
    category: Option<String>,
    amenities: Option<Vec<String>>,
    link: Option<String>,
    website: Option<String>,
}

impl RawFields {
    fn normalize(self) -> Listing {
        Listing {
            name: self.name,
            rating: self.rating,
            reviews: self
                .reviews
                .map(|r| r.trim_matches(|c| c == '(' || c == ')').to_string()),
            price: self.price,
            phone: phone::first_phone(&self.phone_candidates),
            description: self.description,
            category: self.category,
            amenities: self.amenities,
            link: self.link,
            website: self.website,
        }
    }
}

#[derive(Debug, Default)]
pub struct ListingExtractor;

impl ListingExtractor {
    /// Extracts one listing card into a normalized record.
    ///
    /// Returns `None` for cards without a name (loading placeholders) and
    /// for names already harvested this run. Any error reading the card is
    /// contained here: the card is skipped and the pass goes on.
    pub async fn extract<D: Dom>(
        &self,
        dom: &D,
        card: &D::Node,
        seen: &HashSet<String>,
    ) -> Option<Listing> {
        match self.try_extract(dom, card, seen).await {
            Ok(listing) => listing,
            Err(e) => {
                warn!("error extracting listing: {e}");
                None
            }
        }
    }

    async fn try_extract<D: Dom>(
        &self,
        dom: &D,
        card: &D::Node,
        seen: &HashSet<String>,
    ) -> Result<Option<Listing>, HarvestError> {
        let Some(name_el) = dom.query(Some(card), NAME).await? else {
            return Ok(None);
        };
        let name = dom.text(&name_el).await?;
        if seen.contains(&name) {
            return Ok(None);
        }

        let mut phone_candidates = Vec::with_capacity(PHONE_SLOTS.len());
        for slot in PHONE_SLOTS {
            phone_candidates.push(self.slot_text(dom, card, slot).await?);
        }

        let mut amenities = Vec::new();
        for el in dom.query_all(Some(card), AMENITY).await? {
            if let Some(label) = dom.attribute(&el, "aria-label").await? {
                amenities.push(label);
            }
        }

        let mut description = Vec::new();
        for el in dom.query_all(Some(card), DETAIL_ROW).await? {
            let row = dom.text(&el).await?;
            let row = row.trim();
            if !row.is_empty() {
                description.push(row.to_string());
            }
        }

        let raw = RawFields {
            name,
            rating: self.slot_text(dom, card, RATING).await?,
            reviews: self.slot_text(dom, card, REVIEWS).await?,
            price: self.slot_text(dom, card, PRICE).await?,
            phone_candidates,
            description: (!description.is_empty()).then_some(description),
            category: self.slot_text(dom, card, CATEGORY).await?,
            amenities: (!amenities.is_empty()).then_some(amenities),
            link: self.slot_attr(dom, card, LINK, "href").await?,
            website: self.slot_attr(dom, card, WEBSITE, "href").await?,
        };
        Ok(Some(raw.normalize()))
    }

    async fn slot_text<D: Dom>(
        &self,
        dom: &D,
        card: &D::Node,
        selector: &str,
    ) -> Result<Option<String>, HarvestError> {
        match dom.query(Some(card), selector).await? {
            Some(el) => Ok(Some(dom.text(&el).await?)),
            None => Ok(None),
        }
    }

    async fn slot_attr<D: Dom>(
        &self,
        dom: &D,
        card: &D::Node,
        selector: &str,
        attr: &str,
    ) -> Result<Option<String>, HarvestError> {
        match dom.query(Some(card), selector).await? {
            Some(el) => dom.attribute(&el, attr).await,
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::SnapshotDom;
    use pretty_assertions::assert_eq;
    use std::fs;

    async fn extract_all(html: &str) -> Vec<Listing> {
        let dom = SnapshotDom::parse(html);
        let extractor = ListingExtractor;
        let mut seen = HashSet::new();
        let mut listings = Vec::new();
        for card in dom.query_all(None, LISTING).await.unwrap() {
            if let Some(listing) = extractor.extract(&dom, &card, &seen).await {
                seen.insert(listing.name.clone());
                listings.push(listing);
            }
        }
        listings
    }

    #[tokio::test]
    async fn extracts_full_card_from_fixture() {
        let html = fs::read_to_string("tests/fixtures/feed.html").expect("Invalid fixture path");
        let listings = extract_all(&html).await;

        assert_eq!(
            listings[0],
            Listing {
                name: "Desert Trails RV Park".to_string(),
                rating: Some("4.5".to_string()),
                reviews: Some("1,204".to_string()),
                price: Some("$45".to_string()),
                phone: Some("(520) 555-0100".to_string()),
                description: Some(vec![
                    "RV park".to_string(),
                    "Call (520) 555-0100 now".to_string(),
                    "Open 24 hours".to_string(),
                ]),
                category: Some("RV park".to_string()),
                amenities: Some(vec!["Pool".to_string(), "Wi-Fi".to_string()]),
                link: Some("https://maps.example/place/desert-trails".to_string()),
                website: Some("https://deserttrails.example.com".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn missing_slots_are_none_not_empty() {
        let html = fs::read_to_string("tests/fixtures/feed.html").expect("Invalid fixture path");
        let listings = extract_all(&html).await;

        let bare = &listings[1];
        assert_eq!(bare.name, "Quiet Mesa Campground");
        assert_eq!(bare.rating, None);
        assert_eq!(bare.reviews, None);
        assert_eq!(bare.price, None);
        assert_eq!(bare.phone, None);
        assert_eq!(bare.amenities, None);
        assert_eq!(bare.website, None);
    }

    #[tokio::test]
    async fn card_without_name_is_skipped() {
        let html = fs::read_to_string("tests/fixtures/feed.html").expect("Invalid fixture path");
        // The fixture's third card is a loading placeholder with no name.
        let listings = extract_all(&html).await;
        assert_eq!(listings.len(), 2);
    }

    #[tokio::test]
    async fn seen_name_is_skipped_before_accumulation() {
        let html = fs::read_to_string("tests/fixtures/feed.html").expect("Invalid fixture path");
        let dom = SnapshotDom::parse(&html);
        let extractor = ListingExtractor;
        let seen: HashSet<String> = ["Desert Trails RV Park".to_string()].into();

        let cards = dom.query_all(None, LISTING).await.unwrap();
        assert_eq!(extractor.extract(&dom, &cards[0], &seen).await, None);
    }

    #[tokio::test]
    async fn unlabeled_amenities_are_omitted() {
        let html = r##"<div class="Nv2PK">
            <div class="qBF1Pd">Label Test</div>
            <div class="dc6iWb" aria-label="Pool"></div>
            <div class="dc6iWb"></div>
        </div>"##;
        let listings = extract_all(html).await;
        assert_eq!(listings[0].amenities, Some(vec!["Pool".to_string()]));
    }
}
