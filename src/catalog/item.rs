use serde::Serialize;
use url::Url;

/// The fields of an item available on a listing card
#[derive(Debug, Clone, PartialEq)]
pub struct PartialItem {
    pub title: String,
    pub price: f64,
    pub rating: Option<u8>,
    pub availability: Option<u32>,
    /// Absolute URL of the detail page, resolved against the listing page
    pub detail_url: Url,
}

impl PartialItem {
    /// Completes the record with the fields read from its detail page
    pub fn complete(self, detail: DetailFields) -> CatalogItem {
        CatalogItem {
            title: self.title,
            price: self.price,
            rating: self.rating,
            availability: self.availability,
            detail_url: self.detail_url,
            identifier: detail.identifier,
            category: detail.category,
        }
    }
}

/// The fields only available on an item's detail page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailFields {
    /// First cell of the product attributes table; empty when the table is absent
    pub identifier: String,
    pub category: String,
}

/// One output row
///
/// Serialized column names are the output contract shared by every writer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogItem {
    #[serde(rename = "Title")]
    pub title: String,

    /// Never negative: sign characters are stripped before parsing
    #[serde(rename = "Price")]
    pub price: f64,

    /// Star rating 1..=5, absent when no recognized rating label was present
    #[serde(rename = "Rating")]
    pub rating: Option<u8>,

    /// Units in stock, absent when the availability text carries no number
    #[serde(rename = "Availability")]
    pub availability: Option<u32>,

    #[serde(rename = "DetailURL")]
    pub detail_url: Url,

    #[serde(rename = "Identifier")]
    pub identifier: String,

    #[serde(rename = "Category")]
    pub category: String,
}

impl CatalogItem {
    /// Column names in output order
    pub const COLUMNS: [&'static str; 7] = [
        "Title",
        "Price",
        "Rating",
        "Availability",
        "DetailURL",
        "Identifier",
        "Category",
    ];
}

/// Completed items in discovery order: page order, then card order within a page
///
/// Items are only ever appended. No deduplication is performed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    items: Vec<CatalogItem>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: CatalogItem) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CatalogItem> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CatalogItem> {
        self.items.iter()
    }
}

impl FromIterator<CatalogItem> for ResultSet {
    fn from_iter<I: IntoIterator<Item = CatalogItem>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a CatalogItem;
    type IntoIter = std::slice::Iter<'a, CatalogItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
