//! Integration tests for `KakaoLocalClient` using wiremock HTTP mocks.

use std::time::Duration;

use lunchwheel_core::Coordinate;
use lunchwheel_places::{
    gather_restaurant_batches, CategoryQuery, KakaoLocalClient, PlaceSource, PlacesError,
    RestaurantSearch, SortOrder,
};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> KakaoLocalClient {
    KakaoLocalClient::with_base_url("test-key", 5, base_url, 0, 0)
        .expect("client construction should not fail")
}

fn place_doc(id: &str, name: &str, category: &str) -> serde_json::Value {
    json!({
        "id": id,
        "place_name": name,
        "category_group_code": category,
        "category_name": "음식점",
        "address_name": "서울 중구 을지로 1",
        "road_address_name": "",
        "x": "126.99",
        "y": "37.56",
        "distance": "87"
    })
}

fn envelope(documents: Vec<serde_json::Value>) -> serde_json::Value {
    json!({
        "meta": { "total_count": documents.len(), "pageable_count": documents.len(), "is_end": true },
        "documents": documents
    })
}

#[tokio::test]
async fn category_search_sends_expected_query_and_parses_documents() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/local/search/category.json"))
        .and(header("Authorization", "KakaoAK test-key"))
        .and(query_param("category_group_code", "FD6"))
        .and(query_param("radius", "400"))
        .and(query_param("sort", "distance"))
        .and(query_param("page", "1"))
        .and(query_param("size", "15"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(vec![
            place_doc("1", "을지면옥", "FD6"),
            json!("garbage entry"),
            place_doc("2", "커피한약방", "CE7"),
        ])))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let places = client
        .category_search(&CategoryQuery {
            category: "FD6".to_string(),
            origin: Coordinate::new(126.99, 37.56),
            radius_m: 400,
            sort: SortOrder::Distance,
            page: 1,
            page_size: 15,
        })
        .await
        .expect("should parse category page");

    assert_eq!(places.len(), 2, "malformed document should be skipped");
    assert_eq!(places[0].name, "을지면옥");
    assert_eq!(places[0].identity.as_deref(), Some("1"));
    assert_eq!(places[1].category_code.as_deref(), Some("CE7"));
}

#[tokio::test]
async fn search_locations_puts_addresses_before_keywords() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/local/search/address.json"))
        .and(query_param("query", "테헤란로 152"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(vec![json!({
            "address_name": "서울 강남구 역삼동 737",
            "x": "127.0286",
            "y": "37.5000",
            "road_address": {
                "address_name": "서울 강남구 테헤란로 152",
                "building_name": "강남파이낸스센터"
            }
        })])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/local/search/keyword.json"))
        .and(query_param("query", "테헤란로 152"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(vec![place_doc("77", "테헤란로 152 주차장", "PK6")])),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let places = client
        .search_locations("테헤란로 152")
        .await
        .expect("should combine results");

    assert_eq!(places.len(), 2);
    assert_eq!(places[0].name, "강남파이낸스센터");
    assert_eq!(places[0].raw["is_address"], json!(true));
    assert_eq!(places[1].name, "테헤란로 152 주차장");
}

#[tokio::test]
async fn search_locations_survives_one_failing_half() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/local/search/address.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/local/search/keyword.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(vec![place_doc("5", "판교역", "SW8")])),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let places = client.search_locations("판교역").await.expect("keyword half ok");
    assert_eq!(places.len(), 1);
    assert_eq!(places[0].name, "판교역");
}

#[tokio::test]
async fn unauthorized_maps_to_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/local/search/keyword.json"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "errorType": "AccessDeniedError",
            "message": "wrong appKey(test-key) format"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.keyword_search("x").await.unwrap_err();
    assert!(
        matches!(err, PlacesError::ApiError { status: 401, .. }),
        "expected ApiError(401), got {err:?}"
    );
}

#[tokio::test]
async fn rate_limit_is_retried_then_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/local/search/keyword.json"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/local/search/keyword.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(vec![place_doc("9", "짬뽕집", "FD6")])),
        )
        .mount(&server)
        .await;

    let client = KakaoLocalClient::with_base_url("test-key", 5, &server.uri(), 2, 0)
        .expect("client construction should not fail");
    let places = client.keyword_search("짬뽕").await.expect("retry should succeed");
    assert_eq!(places.len(), 1);
}

#[tokio::test]
async fn invalid_json_body_maps_to_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/local/search/keyword.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.keyword_search("x").await.unwrap_err();
    assert!(matches!(err, PlacesError::Deserialize { .. }), "got {err:?}");
}

#[tokio::test]
async fn gather_issues_four_pages_and_tolerates_failures() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/local/search/category.json"))
        .and(query_param("sort", "accuracy"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/local/search/category.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(vec![place_doc("1", "백반집", "FD6")])),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let search = RestaurantSearch {
        category: "FD6".to_string(),
        origin: Coordinate::new(126.99, 37.56),
        radius_m: 800,
    };
    let batches = gather_restaurant_batches(Some(&client), &search, Duration::from_secs(5)).await;

    assert_eq!(batches.len(), 4);
    assert!(batches[1].is_empty(), "failed page should be empty");
    assert_eq!(batches[0].len(), 1);
    assert_eq!(batches[2].len(), 1);
    assert_eq!(batches[3].len(), 1);
}
