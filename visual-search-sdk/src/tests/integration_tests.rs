//! Integration tests against a mock HTTP server
//!
//! These tests run the real reqwest transport against wiremock and verify
//! the full request/response cycle of every capability.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::{json, Value};
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::core::TransportError;
    use crate::error::{DomainError, SdkError};
    use crate::result::ResultEnvelope;
    use crate::sdk::VisualSearch;
    use crate::services::{Feedback, UserAgent};

    const API_KEY: &str = "integration_key";
    const IMAGE: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];

    fn sdk_for(server: &MockServer) -> VisualSearch {
        VisualSearch::builder()
            .api_key(API_KEY)
            .base_url(server.uri())
            .debug(true)
            .build()
            .expect("Failed to build SDK")
    }

    #[tokio::test]
    async fn test_match_image() {
        let mock_server = MockServer::start().await;
        let user_agent = UserAgent::default().to_string();

        Mock::given(method("POST"))
            .and(path("/find/v1.1"))
            .and(header("x-api-key", API_KEY))
            .and(header("x-options", "limit=10 threshold=0.3"))
            .and(header("accept-language", "de"))
            .and(header("content-type", "image/jpeg"))
            .and(header("user-agent", user_agent.as_str()))
            .and(query_param("lat", "52.5"))
            .and(query_param("dist", "500"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "req-100",
                "session": "session-100",
                "results": [
                    { "sku": "SKU-1", "title": "Bracket", "score": 0.88 },
                    { "sku": "SKU-2", "title": "Hinge", "score": 0.61 }
                ],
                "predictedCategories": [ { "name": "hardware", "score": 0.7 } ]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let sdk = sdk_for(&mock_server);
        let result = sdk
            .image_matching()
            .limit(10)
            .unwrap()
            .threshold(0.3)
            .unwrap()
            .language("de")
            .geolocation(52.5, 13.4, 500)
            .match_image(IMAGE)
            .await
            .unwrap();

        let response = result.value().expect("expected success");
        assert_eq!(response.request_id.as_deref(), Some("req-100"));
        assert_eq!(response.offers.len(), 2);
        assert_eq!(response.offers[1].title.as_deref(), Some("Hinge"));
        assert_eq!(response.predicted_categories[0].name, "hardware");

        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests[0].body, IMAGE);
    }

    #[tokio::test]
    async fn test_match_image_with_filters() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/find/v1.1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let sdk = sdk_for(&mock_server);
        let result = sdk
            .image_matching()
            .filter("brand", ["acme", "globex"])
            .match_image(IMAGE)
            .await
            .unwrap();

        assert_eq!(result.value().map(|r| r.offers.len()), Some(0));

        let requests = mock_server.received_requests().await.unwrap();
        let body = String::from_utf8_lossy(&requests[0].body);
        assert!(body.contains("name=\"image\"; filename=\"image.jpg\""));
        assert!(body.contains("name=\"filters[0].filterType\""));
        assert!(body.contains("name=\"filters[0].filterValues[1]\""));
        assert!(body.contains("globex"));
    }

    #[tokio::test]
    async fn test_detect_objects() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/find/v2/regions"))
            .and(header("x-session", "session-5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "regions": [
                    {
                        "className": "object",
                        "confidence": 0.95,
                        "region": { "left": 0.1, "top": 0.1, "right": 0.9, "bottom": 0.8 }
                    }
                ]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let sdk = sdk_for(&mock_server);
        let result = sdk
            .object_detection()
            .session("session-5")
            .detect(IMAGE)
            .await
            .unwrap();

        let response = result.value().expect("expected success");
        assert_eq!(response.objects.len(), 1);
        assert_eq!(response.objects[0].class_name.as_deref(), Some("object"));
    }

    #[tokio::test]
    async fn test_match_sku() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/recommend/v1/SKU-77"))
            .and(header("x-api-key", API_KEY))
            .and(header("x-options", "limit=3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "req-7",
                "results": [ { "sku": "SKU-78" }, { "sku": "SKU-79" } ]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let sdk = sdk_for(&mock_server);
        let result = sdk
            .sku_matching()
            .limit(3)
            .unwrap()
            .match_sku("SKU-77")
            .await
            .unwrap();

        let response = result.value().expect("expected success");
        assert_eq!(response.request_id.as_deref(), Some("req-7"));
        assert_eq!(response.offers.len(), 2);
    }

    #[tokio::test]
    async fn test_send_feedback() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/feedback/v1"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let sdk = sdk_for(&mock_server);
        let result = sdk
            .feedback()
            .request_id("req-100")
            .session("session-100")
            .send(Feedback::Click {
                positions: vec![0],
                product_ids: vec!["SKU-1".to_string()],
            })
            .await
            .unwrap();

        assert_eq!(result, ResultEnvelope::Success(()));

        let requests = mock_server.received_requests().await.unwrap();
        let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["event"], "click");
        assert_eq!(body["request_id"], "req-100");
        assert_eq!(body["session_id"], "session-100");
        assert_eq!(body["data"]["product_ids"], json!(["SKU-1"]));
    }

    #[tokio::test]
    async fn test_structured_error_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/find/v1.1"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "title": "Unauthorized",
                "status": 401,
                "detail": "API key is invalid",
                "traceId": "trace-401"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let sdk = sdk_for(&mock_server);
        let result = sdk.image_matching().match_image(IMAGE).await.unwrap();

        let error = result.error().expect("expected failure");
        assert!(matches!(error, DomainError::ResponseError { .. }));
        assert_eq!(error.status_code(), Some(401));
        assert_eq!(error.trace_id(), Some("trace-401"));
    }

    #[tokio::test]
    async fn test_plain_error_responses() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/recommend/v1/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/recommend/v1/broken"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
            .mount(&mock_server)
            .await;

        let sdk = sdk_for(&mock_server);

        let result = sdk.sku_matching().match_sku("missing").await.unwrap();
        assert!(matches!(result.error(), Some(DomainError::ClientError { .. })));

        let result = sdk.sku_matching().match_sku("broken").await.unwrap();
        assert!(matches!(result.error(), Some(DomainError::ServerError { .. })));
    }

    #[tokio::test]
    async fn test_failed_request_is_not_retried() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/find/v2/regions"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&mock_server)
            .await;

        let sdk = sdk_for(&mock_server);
        let result = sdk.object_detection().detect(IMAGE).await.unwrap();

        assert!(result.is_failure());
    }

    #[tokio::test]
    async fn test_timeout_is_returned_as_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/find/v1.1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({}))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&mock_server)
            .await;

        let sdk = VisualSearch::builder()
            .api_key(API_KEY)
            .base_url(mock_server.uri())
            .timeout(Duration::from_millis(100))
            .build()
            .unwrap();

        let err = sdk.image_matching().match_image(IMAGE).await.unwrap_err();

        assert!(matches!(err, SdkError::Transport(TransportError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_connection_refused_is_returned_as_error() {
        let sdk = VisualSearch::builder()
            .api_key(API_KEY)
            .base_url("http://127.0.0.1:1")
            .build()
            .unwrap();

        let err = sdk.sku_matching().match_sku("SKU-1").await.unwrap_err();

        assert!(matches!(err, SdkError::Transport(TransportError::Connection(_))));
    }
}
