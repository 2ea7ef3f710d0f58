//! Fan-out of the upstream queries that feed the candidate pool.
//!
//! Every upstream call is bounded by a timeout and degrades to an empty
//! batch on failure. An absent source and a failing source look the same to
//! the pool builder: fewer live places, topped up with synthetic ones.

use std::future::Future;
use std::time::Duration;

use futures::future::join_all;
use lunchwheel_core::{Coordinate, Place};

use crate::error::PlacesError;
use crate::mock::mock_locations;
use crate::source::{CategoryQuery, PlaceSource, SortOrder};

/// Relevance-ranked pages fetched per search (pages 1..=3).
pub const ACCURACY_PAGES: u32 = 3;
/// Maximum page size the provider allows for category search.
pub const PAGE_SIZE: u32 = 15;

/// Parameters of one nearby-restaurant search.
#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantSearch {
    pub category: String,
    pub origin: Coordinate,
    pub radius_m: u32,
}

impl RestaurantSearch {
    /// The page queries issued for this search: the top relevance pages,
    /// then the nearest-first page.
    #[must_use]
    pub fn queries(&self) -> Vec<CategoryQuery> {
        let page = |sort, page| CategoryQuery {
            category: self.category.clone(),
            origin: self.origin,
            radius_m: self.radius_m,
            sort,
            page,
            page_size: PAGE_SIZE,
        };
        (1..=ACCURACY_PAGES)
            .map(|n| page(SortOrder::Accuracy, n))
            .chain(std::iter::once(page(SortOrder::Distance, 1)))
            .collect()
    }
}

async fn within_timeout<T, Fut>(
    operation: &str,
    timeout: Duration,
    fut: Fut,
) -> Result<T, PlacesError>
where
    Fut: Future<Output = Result<T, PlacesError>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result,
        Err(_) => Err(PlacesError::Timeout {
            operation: operation.to_string(),
            after_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        }),
    }
}

/// Runs every page query of `search` concurrently and returns one batch per
/// query, in query order.
///
/// Failed or timed-out pages yield empty batches. With no source at all the
/// result is empty.
pub async fn gather_restaurant_batches<S: PlaceSource>(
    source: Option<&S>,
    search: &RestaurantSearch,
    timeout: Duration,
) -> Vec<Vec<Place>> {
    let Some(source) = source else {
        tracing::warn!("place source unavailable, restaurant pool will be synthetic");
        return Vec::new();
    };

    let queries = search.queries();
    let fetches = queries.iter().map(|query| async move {
        match within_timeout("category search", timeout, source.category_search(query)).await {
            Ok(places) => {
                tracing::debug!(
                    sort = query.sort.as_query_value(),
                    page = query.page,
                    count = places.len(),
                    "category page fetched"
                );
                places
            }
            Err(e) => {
                tracing::warn!(
                    sort = query.sort.as_query_value(),
                    page = query.page,
                    error = %e,
                    "category page failed, treating as empty"
                );
                Vec::new()
            }
        }
    });

    let batches = join_all(fetches).await;
    let total: usize = batches.iter().map(Vec::len).sum();
    tracing::info!(
        pages = batches.len(),
        total,
        radius_m = search.radius_m,
        "restaurant batches gathered"
    );
    batches
}

/// Location search results plus whether they are stand-ins.
#[derive(Debug, Clone)]
pub struct LocationResults {
    pub places: Vec<Place>,
    /// `true` when the source was absent or failed and [`mock_locations`]
    /// were substituted.
    pub mocked: bool,
}

/// Resolves free text to candidate locations, substituting mock locations
/// when the source is absent, errors, or times out.
///
/// An empty but successful answer is returned as-is.
pub async fn resolve_locations<S: PlaceSource>(
    source: Option<&S>,
    query: &str,
    timeout: Duration,
) -> LocationResults {
    let outcome = match source {
        Some(source) => {
            within_timeout("location search", timeout, source.search_locations(query)).await
        }
        None => Err(PlacesError::UpstreamUnavailable(
            "no place source configured".to_string(),
        )),
    };

    match outcome {
        Ok(places) => LocationResults {
            places,
            mocked: false,
        },
        Err(e) => {
            tracing::warn!(query, error = %e, "location search unavailable, using mock locations");
            LocationResults {
                places: mock_locations(query),
                mocked: true,
            }
        }
    }
}
