//! # Smart Search Proxy
//!
//! Thin HTTP service between the canteen frontend and a hosted generative
//! model. One route, `POST /smart-search`, which takes the user's query plus
//! today's menu and answers with at most five full menu items, best match
//! first.
//!
//!
//!
//! # Why a proxy
//!
//! We could call the model provider straight from the browser. But, the API
//! key would then ship to every client, and the frontend would have to know
//! the provider's request shape. The proxy keeps the key server-side, pins
//! the prompt in one place, and gives the frontend a stable contract: menu
//! items in, menu items out.
//!
//! The extra hop costs one round trip between our box and the provider.
//! That trip dwarfs everything else in the request anyway, so the proxy adds
//! no meaningful latency of its own.
//!
//!
//!
//! # Failure policy
//!
//! - Bad input is the only thing that errors loudly: 400 with an `error`
//!   body, before any model call.
//! - A model reply we cannot parse degrades to 200 with an empty array. The
//!   frontend shows "no matches" and its local ranker takes over on the next
//!   keystroke.
//! - Anything else is a 500 with a generic body. The frontend treats that
//!   the same as not reaching us at all and ranks locally.
//!
//!
//!
//! # Running
//!
//! ```sh
//! GEMINI_API_KEY=... cargo run -p server
//! ```
//!
//! Port defaults to 3000, override with `CANTEEN_PORT`. The key can also be
//! mounted as `/run/secrets/GEMINI_API_KEY` in a container.
use std::time::Duration;

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::post,
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod error;
pub mod gemini;
pub mod routes;
pub mod state;

use routes::smart_search_handler;
use state::State;

/// Builds the router; split out so tests can drive it without a socket.
pub fn app(state: std::sync::Arc<State>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/smart-search", post(smart_search_handler))
        .layer(cors)
        .with_state(state)
}

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = State::new();

    info!("Starting server...");

    let app = app(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("Server shutting down...");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
