//! Authentication and preflight middleware
//!
//! Per request:
//! - `OPTIONS`: CORS preflight answer, no auth
//! - `HEAD`: empty 200, no auth, not passed on
//! - anything else: `Authorization` must match the configured credential
//!
//! The CORS origin/credentials headers are added by an outer layer so they
//! also land on the responses produced here.

use axum::{
    extract::{Request, State},
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS,
            ACCESS_CONTROL_ALLOW_METHODS, AUTHORIZATION, CONNECTION, WWW_AUTHENTICATE,
        },
        HeaderValue, Method, StatusCode,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use crate::AppState;

/// Body of the 401 sent when no `Authorization` header is present
pub const MISSING_AUTH_BODY: &str = "No Auth Header received";

/// Body of the 401 sent when the credential does not match
pub const BAD_AUTH_BODY: &str = "Bad Auth";

/// Gatekeeper middleware
pub async fn gatekeeper(State(state): State<AppState>, request: Request, next: Next) -> Response {
    match request.method() {
        &Method::OPTIONS => return preflight_response(),
        &Method::HEAD => return StatusCode::OK.into_response(),
        _ => {}
    }

    let Some(provided) = request.headers().get(AUTHORIZATION) else {
        debug!("No Authorization header for {}", request.uri().path());
        return unauthorized(&state, MISSING_AUTH_BODY);
    };

    if !state.credential.matches(provided.as_bytes()) {
        // The received value is never logged or echoed
        warn!(
            "Rejected {} {}: bad credential",
            request.method(),
            request.uri().path()
        );
        return unauthorized(&state, BAD_AUTH_BODY);
    }

    next.run(request).await
}

/// CORS preflight answer
fn preflight_response() -> Response {
    (
        StatusCode::OK,
        [
            (ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static("GET, OPTIONS")),
            (ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static("Authorization")),
            (ACCESS_CONTROL_ALLOW_CREDENTIALS, HeaderValue::from_static("true")),
            (CONNECTION, HeaderValue::from_static("close")),
        ],
    )
        .into_response()
}

fn unauthorized(state: &AppState, body: &'static str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(WWW_AUTHENTICATE, state.www_authenticate.clone())],
        body,
    )
        .into_response()
}
