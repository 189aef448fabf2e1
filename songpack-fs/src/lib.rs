//! songpack-fs library - Gatekeeper File Server
//!
//! Serves a song pack tree over HTTP. Every request except `OPTIONS` and
//! `HEAD` needs the configured Basic credential; every response carries the
//! CORS headers for the configured origin.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    http::{
        header::{ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_ORIGIN},
        HeaderValue,
    },
    middleware,
    routing::get,
    Router,
};
use tower_http::{
    services::ServeDir, set_header::SetResponseHeaderLayer, timeout::TimeoutLayer,
    trace::TraceLayer,
};

pub mod api;
pub mod config;
pub mod credential;
pub mod error;

pub use config::{ServerArgs, ServerConfig};
pub use credential::Credential;
pub use error::{Error, Result};

/// Application state shared across request handlers
#[derive(Clone)]
pub struct AppState {
    /// Expected Basic credential
    pub credential: Arc<Credential>,
    /// Pre-built `WWW-Authenticate` value for 401 responses
    pub www_authenticate: HeaderValue,
    /// Directory being served
    pub root: Arc<PathBuf>,
}

impl AppState {
    /// Validate the parts of `config` that end up in responses
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        if !config.root.is_dir() {
            return Err(Error::RootNotDirectory(config.root.clone()));
        }

        Ok(Self {
            credential: Arc::new(config.credential.clone()),
            www_authenticate: header_value(
                "realm",
                format!("Basic realm=\"{}\"", config.realm),
            )?,
            root: Arc::new(config.root.clone()),
        })
    }
}

/// Build the application router: static files with a directory listing
/// fallback, behind [`apply_layers`]
pub fn build_router(config: &ServerConfig) -> Result<Router> {
    let state = AppState::from_config(config)?;

    let listing = get(api::list_directory).with_state::<()>(Arc::clone(&state.root));
    let static_files = ServeDir::new(state.root.as_path()).fallback(listing);

    apply_layers(Router::new().fallback_service(static_files), state, config)
}

/// Wrap `inner` with, outermost first: CORS headers, request tracing,
/// timeout, gatekeeper
pub fn apply_layers(inner: Router, state: AppState, config: &ServerConfig) -> Result<Router> {
    let origin = header_value("allowed_origin", config.allowed_origin.clone())?;

    Ok(inner
        .layer(middleware::from_fn_with_state(state, api::gatekeeper))
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_CREDENTIALS,
            HeaderValue::from_static("true"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            origin,
        )))
}

fn header_value(name: &'static str, value: String) -> Result<HeaderValue> {
    HeaderValue::from_str(&value).map_err(|_| Error::InvalidHeaderValue { name, value })
}
