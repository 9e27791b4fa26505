//! GooglePlacesClient 集成测试（httpmock 模拟 Places Web Service）

use std::sync::Arc;

use httpmock::prelude::*;
use serde_json::json;

use plotmap::config::PlacesConfig;
use plotmap::errors::PlotmapError;
use plotmap::services::places::{
    GooglePlacesClient, NearbySearchRequest, PlaceEnricher, PlacesApi, PlacesStatus,
};

fn client_for(server: &MockServer) -> GooglePlacesClient {
    GooglePlacesClient::new(&PlacesConfig {
        api_key: "test-key".to_string(),
        base_url: format!("{}/place", server.base_url()),
        timeout_secs: Some(5),
    })
}

#[tokio::test]
async fn test_nearby_search_sends_query_and_parses_results() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/place/nearbysearch/json")
                .query_param("key", "test-key")
                .query_param("name", "Plot A")
                .query_param("location", "45.1,24.2")
                .query_param("radius", "1000");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "status": "OK",
                    "results": [{
                        "place_id": "abc",
                        "name": "Plot A",
                        "photos": [{
                            "photo_reference": "ref-1",
                            "html_attributions": ["<a>Ana</a>"],
                            "height": 100,
                            "width": 200
                        }]
                    }]
                }));
        })
        .await;

    let client = client_for(&server);
    let response = client
        .nearby_search(&NearbySearchRequest {
            name: "Plot A".to_string(),
            latitude: 45.1,
            longitude: 24.2,
            radius: 1000,
        })
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.status, Some(PlacesStatus::Ok));
    assert_eq!(response.results.len(), 1);
    assert_eq!(response.results[0].place_id, "abc");
    assert_eq!(response.results[0].photos[0].photo_reference, "ref-1");
}

#[tokio::test]
async fn test_details_unknown_status_is_passed_through() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/place/details/json")
                .query_param("place_id", "abc");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({ "status": "SOMETHING_NEW" }));
        })
        .await;

    let response = client_for(&server).details("abc").await.unwrap();
    assert_eq!(response.status, Some(PlacesStatus::Unrecognized));
    assert!(response.result.formatted_address.is_none());
}

#[tokio::test]
async fn test_photo_returns_raw_bytes() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/place/photo")
                .query_param("photo_reference", "ref-1")
                .query_param("maxwidth", "400");
            then.status(200)
                .header("content-type", "image/jpeg")
                .body([0xffu8, 0xd8, 0xff]);
        })
        .await;

    let bytes = client_for(&server).photo("ref-1", 400).await.unwrap();
    mock.assert_async().await;
    assert_eq!(bytes, vec![0xff, 0xd8, 0xff]);
}

#[tokio::test]
async fn test_server_error_is_transport_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/place/details/json");
            then.status(500);
        })
        .await;

    let err = client_for(&server).details("abc").await.unwrap_err();
    assert!(matches!(err, PlotmapError::UpstreamTransport(_)));
}

#[tokio::test]
async fn test_invalid_json_is_transport_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/place/nearbysearch/json");
            then.status(200)
                .header("content-type", "application/json")
                .body("<html>not json</html>");
        })
        .await;

    let err = client_for(&server)
        .nearby_search(&NearbySearchRequest {
            name: "x".to_string(),
            latitude: 0.0,
            longitude: 0.0,
            radius: 1000,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, PlotmapError::UpstreamTransport(_)));
}

#[tokio::test]
async fn test_enricher_full_chain_over_http() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/place/nearbysearch/json");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "status": "OK",
                    "results": [{
                        "place_id": "abc",
                        "photos": [{ "photo_reference": "ref-1", "html_attributions": ["<a>Ana</a>"] }]
                    }]
                }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/place/details/json")
                .query_param("place_id", "abc");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "status": "OK",
                    "result": {
                        "formatted_address": "Str. Lunga 1, Brasov",
                        "international_phone_number": "+40 268 000 000",
                        "website": "https://example.ro"
                    }
                }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/place/photo");
            then.status(200).body("hello");
        })
        .await;

    let enricher = PlaceEnricher::new(Arc::new(client_for(&server)));
    let detail = enricher.enrich("Plot A", 45.1, 24.2).await.unwrap();

    assert_eq!(
        detail.formatted_address.as_deref(),
        Some("Str. Lunga 1, Brasov")
    );
    assert_eq!(detail.phone_number.as_deref(), Some("+40 268 000 000"));
    assert_eq!(detail.photo.as_deref(), Some("aGVsbG8="));
    assert_eq!(detail.photo_credit.as_deref(), Some("<a>Ana</a>"));
}

#[tokio::test]
async fn test_enricher_photo_transport_failure_fails_request() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/place/nearbysearch/json");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "status": "OK",
                    "results": [{ "place_id": "abc", "photos": [{ "photo_reference": "ref-1" }] }]
                }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/place/details/json");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({ "status": "OK", "result": {} }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/place/photo");
            then.status(503);
        })
        .await;

    let enricher = PlaceEnricher::new(Arc::new(client_for(&server)));
    let err = enricher.enrich("Plot A", 45.1, 24.2).await.unwrap_err();
    assert!(matches!(err, PlotmapError::UpstreamTransport(_)));
}
