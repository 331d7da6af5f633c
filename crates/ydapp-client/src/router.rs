//! Axum router wiring for the callback receiver.
//!
//! Exposes a single POST route at the configured callback path; anything else
//! falls through to axum's 404.

use axum::{routing::post, Router};

use crate::{app_state::AppState, callback};

pub fn build_router(state: AppState) -> Router {
    let path = state.callback_path().to_string();
    Router::new()
        .route(&path, post(callback::receive))
        .with_state(state)
}
