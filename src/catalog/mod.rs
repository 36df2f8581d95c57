//! Catalog data model
//!
//! A [`CatalogItem`] is built in two stages: a [`PartialItem`] extracted from a
//! listing card, completed by the [`DetailFields`] of its detail page. Completed
//! items are appended to a [`ResultSet`] in discovery order and never change
//! afterwards.

mod breadcrumb;
mod item;

pub use breadcrumb::{BreadcrumbTrail, CATEGORY_POSITION, FALLBACK_CATEGORY};
pub use item::{CatalogItem, DetailFields, PartialItem, ResultSet};
