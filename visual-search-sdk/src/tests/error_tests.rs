//! Tests for error handling functionality
//!
//! These tests verify failure normalization and the result envelope.

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::core::TransportError;
    use crate::error::mapping::{classify_status, normalize, ErrorBody, FailureCause, StatusClass};
    use crate::error::{DomainError, InvalidArgument, SdkError};
    use crate::result::ResultEnvelope;

    fn status(status: u16, body: &str) -> FailureCause {
        FailureCause::Status {
            status,
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_structured_body_becomes_response_error() {
        let body = json!({
            "title": "Unauthorized",
            "status": 401,
            "detail": "bad key",
            "traceId": "t1",
            "itemKey": null
        })
        .to_string();

        let error = normalize(status(401, &body)).unwrap();

        assert_eq!(
            error,
            DomainError::ResponseError {
                title: Some("Unauthorized".to_string()),
                status_code: Some(401),
                detail: Some("bad key".to_string()),
                trace_id: Some("t1".to_string()),
                item_key: None,
            }
        );
        assert_eq!(error.status_code(), Some(401));
        assert_eq!(error.trace_id(), Some("t1"));
    }

    #[test]
    fn test_structured_body_on_server_error() {
        let body = json!({ "title": "Internal", "status": 500 }).to_string();

        let error = normalize(status(500, &body)).unwrap();

        assert!(matches!(error, DomainError::ResponseError { status_code: Some(500), .. }));
    }

    #[test]
    fn test_unstructured_client_error() {
        let error = normalize(status(404, "no such sku")).unwrap();

        match error {
            DomainError::ClientError { message } => {
                assert!(message.contains("404"));
                assert!(message.contains("no such sku"));
            }
            other => panic!("expected client error, got {:?}", other),
        }
    }

    #[test]
    fn test_json_without_known_fields_is_not_structured() {
        let error = normalize(status(400, r#"{"message":"nope"}"#)).unwrap();
        assert!(matches!(error, DomainError::ClientError { .. }));

        assert_eq!(ErrorBody::decode(b"{}"), None);
        assert_eq!(ErrorBody::decode(b"[1,2]"), None);
        assert_eq!(ErrorBody::decode(b"not json"), None);
    }

    #[test]
    fn test_unstructured_server_error() {
        let error = normalize(status(503, "")).unwrap();

        assert_eq!(error, DomainError::server("503 Service Unavailable"));
    }

    #[test]
    fn test_long_bodies_are_truncated_in_messages() {
        let body = "x".repeat(1000);
        let error = normalize(status(502, &body)).unwrap();

        assert!(error.to_string().len() < 200);
        assert!(error.to_string().contains("..."));
    }

    #[test]
    fn test_request_construction_failure_is_client_error() {
        let error = normalize(FailureCause::Transport(TransportError::Request(
            "invalid header".to_string(),
        )))
        .unwrap();

        assert_eq!(error, DomainError::client("invalid header"));
    }

    #[test]
    fn test_other_failures_pass_through() {
        let err = normalize(FailureCause::Transport(TransportError::Connection(
            "connection refused".to_string(),
        )))
        .unwrap_err();
        assert!(matches!(err, SdkError::Transport(TransportError::Connection(_))));

        let err = normalize(FailureCause::Transport(TransportError::Timeout(
            "3000ms".to_string(),
        )))
        .unwrap_err();
        assert!(matches!(err, SdkError::Transport(TransportError::Timeout(_))));

        let err = normalize(status(304, "")).unwrap_err();
        assert_eq!(err.status_code(), Some(304));
    }

    #[test]
    fn test_classify_status() {
        assert_eq!(classify_status(400), StatusClass::Client);
        assert_eq!(classify_status(499), StatusClass::Client);
        assert_eq!(classify_status(500), StatusClass::Server);
        assert_eq!(classify_status(599), StatusClass::Server);
        assert_eq!(classify_status(302), StatusClass::Other);
    }

    #[test]
    fn test_error_display() {
        let error = DomainError::ResponseError {
            title: Some("Unauthorized".to_string()),
            status_code: Some(401),
            detail: None,
            trace_id: None,
            item_key: None,
        };
        assert_eq!(error.to_string(), "Response error (status 401): Unauthorized - no detail");

        let err: SdkError = InvalidArgument::new("limit", 0, "[1, 100]").into();
        assert_eq!(err.to_string(), "Invalid argument: limit must be within [1, 100], got 0");
        assert!(err.is_caller_error());

        let err: SdkError = serde_json::from_str::<u32>("x").unwrap_err().into();
        assert!(matches!(err, SdkError::Parsing(_)));
        assert!(!err.is_caller_error());
    }

    #[test]
    fn test_result_envelope() {
        let success: ResultEnvelope<u32> = ResultEnvelope::Success(2);
        assert!(success.is_success());
        assert_eq!(success.value(), Some(&2));
        assert_eq!(success.error(), None);
        assert_eq!(success.clone().map(|v| v * 2), ResultEnvelope::Success(4));
        assert_eq!(success.into_result(), Ok(2));

        let failure: ResultEnvelope<u32> = ResultEnvelope::Failure(DomainError::server("down"));
        assert!(failure.is_failure());
        assert_eq!(failure.value(), None);
        assert_eq!(failure.clone().map(|v| v * 2).error(), Some(&DomainError::server("down")));
        assert_eq!(failure.into_result(), Err(DomainError::server("down")));

        let from_result: ResultEnvelope<u32> = Err(DomainError::client("bad")).into();
        assert_eq!(from_result, ResultEnvelope::Failure(DomainError::client("bad")));
    }
}
