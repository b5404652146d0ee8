//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn trace_id() -> String {
    TRACE_ID.to_owned()
}

async fn decode(response: HttpResponse) -> Error {
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    serde_json::from_slice(&bytes).expect("Error JSON deserialisation succeeds")
}

fn header(response: &HttpResponse) -> Option<String> {
    response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("ascii header").to_owned())
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("login required"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("Access denied. Admin privileges required."), StatusCode::FORBIDDEN)]
#[case(Error::not_found("Companion profile not found"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("duplicate"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("database down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted_but_keep_trace_id(trace_id: String) {
    let error = Error::internal("connection string leaked")
        .with_trace_id(trace_id.clone())
        .with_details(json!({"secret": "x"}));

    let response = error.error_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header(&response).as_deref(), Some(trace_id.as_str()));

    let payload = decode(response).await;
    assert_eq!(payload.code(), ErrorCode::InternalError);
    assert_eq!(payload.message(), "Internal server error");
    assert_eq!(payload.trace_id(), Some(trace_id.as_str()));
    assert!(payload.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_message_and_details(trace_id: String) {
    let details = json!({"errors": ["displayName must not be empty"]});
    let error = Error::invalid_request("Validation Error")
        .with_trace_id(trace_id.clone())
        .with_details(details.clone());

    let response = error.error_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(header(&response).as_deref(), Some(trace_id.as_str()));

    let payload = decode(response).await;
    assert_eq!(payload.message(), "Validation Error");
    assert_eq!(payload.details(), Some(&details));
}

#[rstest]
#[actix_web::test]
async fn error_without_trace_id_omits_trace_header() {
    let response = Error::not_found("missing").error_response();

    assert!(header(&response).is_none());
    let payload = decode(response).await;
    assert_eq!(payload.trace_id(), None);
}

#[rstest]
fn actix_errors_become_redacted_internal_errors() {
    let err: Error = actix_web::error::ErrorBadRequest("boom").into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
    assert_eq!(err.details(), None);
}
