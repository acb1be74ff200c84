use serde::Serialize;

/// One harvested business listing. `name` is the identity key for the run;
/// every other field is whatever the card happened to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing {
    pub name: String,
    pub rating: Option<String>,
    pub reviews: Option<String>,
    pub price: Option<String>,
    pub phone: Option<String>,
    pub description: Option<Vec<String>>,
    pub category: Option<String>,
    pub amenities: Option<Vec<String>>,
    pub link: Option<String>,
    pub website: Option<String>,
}

/// Narrow projection used for the tabular export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContactRow {
    pub name: String,
    pub phone: Option<String>,
    pub website: Option<String>,
}

impl From<&Listing> for ContactRow {
    fn from(listing: &Listing) -> Self {
        ContactRow {
            name: listing.name.clone(),
            phone: listing.phone.clone(),
            website: listing.website.clone(),
        }
    }
}
