pub mod health;

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use crate::auth;
use crate::dispatch::handlers as dispatch_handlers;
use crate::forwarder::handlers as forwarder_handlers;
use crate::instrument::handlers as instrument_handlers;
use crate::providers;
use crate::settings;
use crate::state::AppState;
use crate::templates;

pub fn build_router(state: AppState) -> Router {
    // Function routes carry the service token check. The editor-facing API
    // stays open, like the hosted app.
    let functions = Router::new()
        .route(
            "/functions/v1/:slug",
            post(forwarder_handlers::handle_forward)
                .options(forwarder_handlers::handle_forward_probe),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_service_token,
        ));

    Router::new()
        .route("/health", get(health::health_handler))
        .merge(functions)
        // Generation API
        .route("/api/v1/generate", post(dispatch_handlers::handle_generate))
        .route("/api/v1/enhance", post(dispatch_handlers::handle_enhance))
        .route("/api/v1/rewrite", post(dispatch_handlers::handle_rewrite))
        .route("/api/v1/compare", post(dispatch_handlers::handle_compare))
        .route(
            "/api/v1/compare/winner",
            post(instrument_handlers::handle_comparison_winner),
        )
        .route(
            "/api/v1/diagnostics",
            get(dispatch_handlers::handle_diagnostics),
        )
        // Catalog
        .route("/api/v1/models", get(providers::handle_list_models))
        .route("/api/v1/templates", get(templates::handle_list_templates))
        .route("/api/v1/templates/:id", get(templates::handle_get_template))
        // Instrumentation
        .route(
            "/api/v1/metrics/usage",
            get(instrument_handlers::handle_usage_report),
        )
        .route(
            "/api/v1/metrics",
            delete(instrument_handlers::handle_clear_metrics),
        )
        .route(
            "/api/v1/devtools/calls",
            get(instrument_handlers::handle_list_calls)
                .delete(instrument_handlers::handle_clear_calls),
        )
        // Client settings
        .route(
            "/api/v1/settings",
            get(settings::handle_get_settings).put(settings::handle_put_settings),
        )
        .with_state(state)
}
