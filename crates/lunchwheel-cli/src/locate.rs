//! Location lookup and restaurant gathering shared by the CLI commands.

use std::time::Duration;

use lunchwheel_core::{AppConfig, Coordinate, Place, SearchRadius};
use lunchwheel_places::{
    gather_restaurant_batches, resolve_locations, KakaoLocalClient, RestaurantSearch,
};
use lunchwheel_wheel::{build_universe, PoolLimits, RestaurantUniverse};

/// The live Kakao client, or `None` when no API key is configured.
pub(crate) fn place_source(config: &AppConfig) -> Option<KakaoLocalClient> {
    match KakaoLocalClient::from_config(config) {
        Ok(client) => Some(client),
        Err(e) => {
            tracing::warn!(error = %e, "running without a place source; results will be synthetic");
            None
        }
    }
}

/// Upper bound for one upstream call including its retries.
pub(crate) fn search_timeout(config: &AppConfig) -> Duration {
    let attempts = u64::from(config.max_retries) + 1;
    Duration::from_secs(config.request_timeout_secs.saturating_mul(attempts))
}

/// Print numbered location results for `query`.
pub(crate) async fn run_search(
    config: &AppConfig,
    source: Option<&KakaoLocalClient>,
    query: &str,
) -> anyhow::Result<()> {
    let results = resolve_locations(source, query, search_timeout(config)).await;
    if results.mocked {
        println!("(place search unavailable; showing sample locations)");
    }
    if results.places.is_empty() {
        println!("no locations found for '{query}'");
        return Ok(());
    }
    for (i, place) in results.places.iter().enumerate() {
        println!(
            "{:>3}. {}  {}",
            i + 1,
            place.name,
            place.address.as_deref().unwrap_or("")
        );
    }
    Ok(())
}

/// Resolve `query` and return the `pick`-th (1-based) location.
///
/// # Errors
///
/// Returns an error if there is no such result or it has no coordinate.
pub(crate) async fn choose_location(
    config: &AppConfig,
    source: Option<&KakaoLocalClient>,
    query: &str,
    pick: usize,
) -> anyhow::Result<(Place, Coordinate)> {
    let results = resolve_locations(source, query, search_timeout(config)).await;
    let count = results.places.len();
    let place = pick
        .checked_sub(1)
        .and_then(|i| results.places.into_iter().nth(i))
        .ok_or_else(|| anyhow::anyhow!("no location #{pick} for '{query}' ({count} found)"))?;
    let origin = place
        .coordinate
        .ok_or_else(|| anyhow::anyhow!("location '{}' has no coordinates", place.name))?;
    tracing::info!(location = %place.name, %origin, mocked = results.mocked, "location selected");
    Ok((place, origin))
}

/// Gather nearby restaurants and build the universe around `origin`.
pub(crate) async fn gather_universe(
    config: &AppConfig,
    source: Option<&KakaoLocalClient>,
    origin: Coordinate,
    radius: SearchRadius,
) -> RestaurantUniverse {
    let search = RestaurantSearch {
        category: config.restaurant_category.clone(),
        origin,
        radius_m: radius.meters(),
    };
    let batches = gather_restaurant_batches(source, &search, search_timeout(config)).await;
    build_universe(
        &batches,
        &config.excluded_category,
        &PoolLimits::from_config(config),
    )
}

/// One line describing the pool, with the sparse-area notice when topped up.
pub(crate) fn describe_universe(universe: &RestaurantUniverse, radius: SearchRadius) -> String {
    if universe.is_topped_up() {
        format!(
            "only {} restaurants within {radius}; added {} sample places ({} total)",
            universe.live_count(),
            universe.synthetic_count(),
            universe.len()
        )
    } else {
        format!("{} restaurants within {radius}", universe.len())
    }
}
