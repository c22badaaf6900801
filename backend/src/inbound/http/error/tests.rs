//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use rstest::rstest;

use crate::domain::TraceId;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[rstest]
#[case(Error::unauthorized("login required"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("not yours"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::service_unavailable("pool timed out"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

#[rstest]
#[case(ErrorCode::Forbidden, "not yours", "not yours")]
#[case(ErrorCode::InternalError, "connection string leaked", REDACTED_MESSAGE)]
#[actix_web::test]
async fn body_is_plain_text(
    #[case] code: ErrorCode,
    #[case] message: &str,
    #[case] expected: &str,
) {
    let trace_id: TraceId = TRACE_ID.parse().expect("trace id");
    let error = TraceId::scope(trace_id, async { Error::new(code, message) }).await;
    let response = error.error_response();
    let content_type = response
        .headers()
        .get(actix_web::http::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    assert_eq!(
        response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok()),
        Some(TRACE_ID)
    );
    let body = to_bytes(response.into_body()).await.expect("body");
    assert_eq!(body, expected.as_bytes());
    assert!(content_type.is_some_and(|value| value.starts_with("text/plain")));
}

#[rstest]
fn missing_trace_id_omits_header() {
    let response = Error::not_found("missing").error_response();
    assert!(response.headers().get(TRACE_ID_HEADER).is_none());
}
