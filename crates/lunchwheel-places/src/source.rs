//! The place source seam.
//!
//! The wheel engine never talks to a provider directly; the front end hands
//! it batches gathered through a [`PlaceSource`]. Tests substitute an
//! in-memory implementation.

use std::future::Future;

use lunchwheel_core::{Coordinate, Place};

use crate::error::PlacesError;

/// Result ordering for a category search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Provider relevance ranking (popularity).
    Accuracy,
    /// Nearest first.
    Distance,
}

impl SortOrder {
    #[must_use]
    pub fn as_query_value(self) -> &'static str {
        match self {
            SortOrder::Accuracy => "accuracy",
            SortOrder::Distance => "distance",
        }
    }
}

/// One page of a category search around an origin.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryQuery {
    pub category: String,
    pub origin: Coordinate,
    pub radius_m: u32,
    pub sort: SortOrder,
    /// 1-based page number.
    pub page: u32,
    pub page_size: u32,
}

/// Upstream provider of place records.
pub trait PlaceSource {
    /// Resolves free text (a business name or an address) to candidate
    /// locations.
    fn search_locations(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<Place>, PlacesError>> + Send;

    /// Fetches one page of places of a category around an origin.
    fn category_search(
        &self,
        query: &CategoryQuery,
    ) -> impl Future<Output = Result<Vec<Place>, PlacesError>> + Send;
}
