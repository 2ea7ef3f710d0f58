pub mod client;
pub mod error;
pub mod gather;
pub mod mock;
pub mod normalize;
mod retry;
pub mod source;
pub mod types;

pub use client::KakaoLocalClient;
pub use error::PlacesError;
pub use gather::{gather_restaurant_batches, resolve_locations, LocationResults, RestaurantSearch};
pub use mock::{mock_locations, synthetic_restaurants};
pub use source::{CategoryQuery, PlaceSource, SortOrder};
