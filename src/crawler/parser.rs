//! HTML extraction for listing and detail pages
//!
//! This module turns parsed catalog pages into records:
//! - `extract_items`: partial records from the product cards of a listing page
//! - `extract_next_href`: the raw "next page" link of a listing page
//! - `extract_detail`: identifier and category from a detail page
//!
//! A listing card missing a required element is a hard error. A detail page
//! missing its attributes table or a full breadcrumb falls back leniently.

use crate::catalog::{BreadcrumbTrail, DetailFields, PartialItem};
use crate::crawler::fetcher::Page;
use crate::crawler::fields::{parse_availability, parse_price, parse_rating};
use crate::url::resolve;
use crate::CrawlError;
use scraper::{ElementRef, Selector};
use std::sync::OnceLock;

/// CSS selectors for the catalog's markup
struct Selectors {
    card: Selector,
    title_link: Selector,
    price: Selector,
    rating: Selector,
    availability: Selector,
    next_link: Selector,
    attribute_cell: Selector,
    breadcrumb: Selector,
}

fn selectors() -> &'static Selectors {
    static SELECTORS: OnceLock<Selectors> = OnceLock::new();
    SELECTORS.get_or_init(|| Selectors {
        card: parse_selector("article.product_pod"),
        title_link: parse_selector("h3 a"),
        price: parse_selector("p.price_color"),
        rating: parse_selector("p.star-rating"),
        availability: parse_selector("p.instock.availability"),
        next_link: parse_selector("li.next a"),
        attribute_cell: parse_selector("table.table.table-striped tr:nth-of-type(1) td"),
        breadcrumb: parse_selector("ul.breadcrumb li a, ul.breadcrumb li.active"),
    })
}

// Panics only on an invalid constant selector.
fn parse_selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector must parse")
}

/// Extracts a partial record for every product card, in document order
///
/// # Card Fields
///
/// | Field | Source | Missing element |
/// |-------|--------|-----------------|
/// | Title | `h3 a` `title` attribute, else link text, trimmed | `MalformedItem` |
/// | DetailURL | `h3 a` `href`, resolved against the listing page | `MalformedItem` |
/// | Price | `p.price_color` text | `MalformedItem` |
/// | Rating | `p.star-rating` class list | `MalformedItem` |
/// | Availability | `p.instock.availability` text | `MalformedItem` |
///
/// # Errors
///
/// - `MalformedItem` for the first card missing a required element
/// - `Parse` when the price text is not a number
/// - `Resolution` when the card link is malformed
pub fn extract_items(page: &Page) -> Result<Vec<PartialItem>, CrawlError> {
    page.document()
        .select(&selectors().card)
        .enumerate()
        .map(|(index, card)| extract_card(page, index, card))
        .collect()
}

fn extract_card(page: &Page, index: usize, card: ElementRef<'_>) -> Result<PartialItem, CrawlError> {
    let s = selectors();
    let missing = |element: &'static str| CrawlError::MalformedItem {
        url: page.url().to_string(),
        index,
        element,
    };

    let link = card
        .select(&s.title_link)
        .next()
        .ok_or_else(|| missing("title link"))?;

    let title = link
        .value()
        .attr("title")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| text_of(link));
    if title.is_empty() {
        return Err(missing("title"));
    }

    let href = link.value().attr("href").ok_or_else(|| missing("detail link"))?;
    let detail_url = resolve(page.url(), href)?;

    let price_text = card
        .select(&s.price)
        .next()
        .map(text_of)
        .ok_or_else(|| missing("price"))?;
    let price = parse_price(&price_text).map_err(|source| CrawlError::Parse {
        url: page.url().to_string(),
        field: "price",
        source,
    })?;

    let rating_node = card.select(&s.rating).next().ok_or_else(|| missing("rating"))?;
    // Class labels in the order written; first recognized one wins
    let rating = parse_rating(
        rating_node
            .value()
            .attr("class")
            .unwrap_or_default()
            .split_whitespace(),
    );

    let availability_text = card
        .select(&s.availability)
        .next()
        .map(spaced_text_of)
        .ok_or_else(|| missing("availability"))?;
    let availability = parse_availability(&availability_text);

    Ok(PartialItem {
        title,
        price,
        rating,
        availability,
        detail_url,
    })
}

/// Returns the raw href of the listing page's "next" link, if any
///
/// An anchor without an `href` is treated as no link: resolving an empty href
/// would point back at the current page.
pub fn extract_next_href(page: &Page) -> Option<String> {
    let anchor = page.document().select(&selectors().next_link).next()?;
    match anchor.value().attr("href") {
        Some(href) => Some(href.to_string()),
        None => {
            tracing::warn!("\"next\" link on {} has no href, ending pagination", page.url());
            None
        }
    }
}

/// Extracts the fields only available on a detail page
///
/// Never fails: a missing attributes table gives an empty identifier and a short
/// breadcrumb gives the fallback category.
pub fn extract_detail(page: &Page) -> DetailFields {
    let s = selectors();
    let document = page.document();

    let identifier = match document.select(&s.attribute_cell).next() {
        Some(cell) => text_of(cell),
        None => {
            tracing::warn!("No attributes table on {}, identifier left empty", page.url());
            String::new()
        }
    };

    let trail = BreadcrumbTrail::new(document.select(&s.breadcrumb).map(text_of).collect());
    if trail.is_short() {
        tracing::warn!(
            "Breadcrumb on {} has {} labels, using fallback category",
            page.url(),
            trail.len()
        );
    }

    DetailFields {
        identifier,
        category: trail.category().to_string(),
    }
}

/// Concatenated, trimmed text content of an element
fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Text nodes of an element, each trimmed, joined by single spaces
fn spaced_text_of(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
