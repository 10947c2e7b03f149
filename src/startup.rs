use axum::{
    http::{header, HeaderName, Method},
    middleware,
    response::Html,
    routing::{delete, get, post, put},
    Json, Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

use crate::{
    handlers,
    middleware::{metrics_middleware, request_id_middleware, require_admin_key},
    openapi::ApiDoc,
};

pub fn build_router(state: Arc<crate::AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(state.config.cors_origin.clone())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static("x-admin-key"),
            HeaderName::from_static("x-request-id"),
        ])
        .expose_headers([header::CONTENT_DISPOSITION, HeaderName::from_static("x-request-id")]);

    let admin = middleware::from_fn_with_state(state.clone(), require_admin_key);

    // Roster routes
    let roster_routes = Router::new()
        .route("/", get(handlers::rosters_handler::list_rosters))
        .route("/", post(handlers::rosters_handler::create_roster))
        .route("/preview", post(handlers::rosters_handler::preview_roster))
        .route("/active", get(handlers::rosters_handler::get_active_roster))
        .route("/compare", get(handlers::rosters_handler::compare_rosters))
        .route("/{id}", get(handlers::rosters_handler::get_roster))
        .route("/{id}", delete(handlers::rosters_handler::delete_roster).route_layer(admin.clone()))
        .route("/{id}/activate", put(handlers::rosters_handler::activate_roster).route_layer(admin.clone()))
        .route("/{id}/hours", get(handlers::rosters_handler::get_roster_hours))
        .route("/{id}/export", get(handlers::rosters_handler::export_roster));

    // Shift routes
    let shift_routes = Router::new()
        .route("/{uuid}", get(handlers::shifts_handler::get_shift))
        .route("/{uuid}", put(handlers::shifts_handler::update_shift));

    // Swap routes
    let swap_routes = Router::new()
        .route("/", get(handlers::swaps_handler::get_swaps))
        .route("/", post(handlers::swaps_handler::create_swap_request))
        .route(
            "/{id}/respond",
            post(handlers::swaps_handler::respond_to_swap_request).route_layer(admin),
        );

    // Notification routes
    let notification_routes = Router::new()
        .route("/", get(handlers::notifications_handler::get_notifications))
        .route("/{id}/read", put(handlers::notifications_handler::mark_notification_read));

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_handler))
        .route("/api/staff", get(handlers::staff_handler::get_staff))
        .nest("/api/rosters", roster_routes)
        .nest("/api/shifts", shift_routes)
        .nest("/api/swaps", swap_routes)
        .nest("/api/notifications", notification_routes)
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .route("/swagger-ui", get(swagger_ui))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(request_id_middleware))
                .layer(middleware::from_fn(metrics_middleware))
                .layer(cors),
        )
        .with_state(state)
}

async fn swagger_ui() -> Html<&'static str> {
    Html(r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Rota API Documentation</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-standalone-preset.js"></script>
    <script>
        window.onload = () => {
            window.ui = SwaggerUIBundle({
                url: '/api-docs/openapi.json',
                dom_id: '#swagger-ui',
                presets: [
                    SwaggerUIBundle.presets.apis,
                    SwaggerUIStandalonePreset
                ],
                layout: "StandaloneLayout"
            });
        };
    </script>
</body>
</html>
    "#)
}
