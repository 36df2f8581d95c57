//! Summary statistics for an exported result set
//!
//! This module computes and prints the closing report of a crawl: column
//! coverage, the most common categories, and mean price per star rating.

use crate::catalog::{CatalogItem, ResultSet};
use std::collections::{BTreeMap, HashMap};

/// Number of categories listed in the summary
pub const TOP_CATEGORIES: usize = 10;

/// Mean price of the items sharing one rating
#[derive(Debug, Clone, PartialEq)]
pub struct RatingPrice {
    /// `None` groups items without a recognized rating
    pub rating: Option<u8>,
    pub items: usize,
    pub mean_price: f64,
}

/// Result set summary
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSummary {
    /// Total number of items
    pub total_items: usize,

    /// Items carrying a value for each column, in column order
    ///
    /// An empty identifier counts as missing.
    pub present_by_column: Vec<(&'static str, usize)>,

    /// Most common categories, by count then name
    pub top_categories: Vec<(String, usize)>,

    /// Mean price per rating, ascending, with unrated items last
    pub price_by_rating: Vec<RatingPrice>,
}

impl CatalogSummary {
    pub fn from_items(items: &ResultSet) -> Self {
        let total_items = items.len();

        let present = |has: fn(&CatalogItem) -> bool| items.iter().filter(|i| has(i)).count();
        let present_by_column = vec![
            ("Title", total_items),
            ("Price", total_items),
            ("Rating", present(|i| i.rating.is_some())),
            ("Availability", present(|i| i.availability.is_some())),
            ("DetailURL", total_items),
            ("Identifier", present(|i| !i.identifier.is_empty())),
            ("Category", total_items),
        ];

        let mut category_counts: HashMap<&str, usize> = HashMap::new();
        for item in items {
            *category_counts.entry(item.category.as_str()).or_default() += 1;
        }
        let mut top_categories: Vec<(String, usize)> = category_counts
            .into_iter()
            .map(|(name, count)| (name.to_string(), count))
            .collect();
        top_categories.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        top_categories.truncate(TOP_CATEGORIES);

        let mut rated: BTreeMap<u8, (usize, f64)> = BTreeMap::new();
        let mut unrated: (usize, f64) = (0, 0.0);
        for item in items {
            let bucket = match item.rating {
                Some(rating) => rated.entry(rating).or_default(),
                None => &mut unrated,
            };
            bucket.0 += 1;
            bucket.1 += item.price;
        }
        let mut price_by_rating: Vec<RatingPrice> = rated
            .into_iter()
            .map(|(rating, (count, sum))| RatingPrice {
                rating: Some(rating),
                items: count,
                mean_price: sum / count as f64,
            })
            .collect();
        if unrated.0 > 0 {
            price_by_rating.push(RatingPrice {
                rating: None,
                items: unrated.0,
                mean_price: unrated.1 / unrated.0 as f64,
            });
        }

        Self {
            total_items,
            present_by_column,
            top_categories,
            price_by_rating,
        }
    }
}

/// Prints the summary to stdout
pub fn print_summary(summary: &CatalogSummary) {
    println!("=== Catalog Summary ===\n");

    println!("Items: {}", summary.total_items);
    println!();

    println!("Columns (present / total):");
    for (column, present) in &summary.present_by_column {
        println!("  {:<14} {} / {}", column, present, summary.total_items);
    }
    println!();

    if !summary.top_categories.is_empty() {
        println!("Top categories:");
        for (category, count) in &summary.top_categories {
            println!("  {:<24} {}", category, count);
        }
        println!();
    }

    if !summary.price_by_rating.is_empty() {
        println!("Average price by rating:");
        for group in &summary.price_by_rating {
            let label = group
                .rating
                .map(|r| r.to_string())
                .unwrap_or_else(|| "none".to_string());
            println!(
                "  {:<6} {:>8.2}  ({} items)",
                label, group.mean_price, group.items
            );
        }
    }
}
