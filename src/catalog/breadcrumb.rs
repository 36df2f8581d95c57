/// Category used when the trail is too short to hold one
pub const FALLBACK_CATEGORY: &str = "Books";

/// Zero-based position of the category in `Home > Books > Category > Title`
pub const CATEGORY_POSITION: usize = 2;

/// The breadcrumb labels of a detail page, root first, ending with the page title
///
/// The category is read by position, not by searching for a label. This relies on
/// the site's fixed breadcrumb depth; a site that nests categories differently
/// yields a different label at that position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreadcrumbTrail {
    labels: Vec<String>,
}

impl BreadcrumbTrail {
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns the label at `position`, if the trail is long enough
    pub fn get(&self, position: usize) -> Option<&str> {
        self.labels.get(position).map(String::as_str)
    }

    /// Returns the category label, or [`FALLBACK_CATEGORY`] for short trails
    pub fn category(&self) -> &str {
        self.get(CATEGORY_POSITION).unwrap_or(FALLBACK_CATEGORY)
    }

    /// Returns true if the trail is too short to carry a category
    pub fn is_short(&self) -> bool {
        self.labels.len() <= CATEGORY_POSITION
    }
}
