// src/router.rs

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::{services::ServeDir, timeout::TimeoutLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    config::AppState,
    docs::ApiDoc,
    handlers,
    middleware::auth::auth_guard,
    storage::{MAX_FILE_SIZE, MAX_FILES_PER_UPLOAD},
};

// Folga para os cabeçalhos do multipart
const UPLOAD_BODY_LIMIT: usize = MAX_FILES_PER_UPLOAD * MAX_FILE_SIZE + 1024 * 1024;

pub fn build_router(app_state: AppState) -> Router {
    let client_routes = Router::new()
        .route("/", post(handlers::clients::create_client).get(handlers::clients::list_clients))
        .route(
            "/{id}",
            get(handlers::clients::get_client)
                .put(handlers::clients::update_client)
                .delete(handlers::clients::delete_client),
        );

    let artist_routes = Router::new()
        .route("/", post(handlers::artists::create_artist).get(handlers::artists::list_artists))
        .route(
            "/{id}",
            get(handlers::artists::get_artist)
                .put(handlers::artists::update_artist)
                .delete(handlers::artists::delete_artist),
        );

    let appointment_routes = Router::new()
        .route(
            "/",
            post(handlers::appointments::create_appointment)
                .get(handlers::appointments::list_appointments),
        )
        .route(
            "/{id}",
            get(handlers::appointments::get_appointment)
                .put(handlers::appointments::update_appointment)
                .delete(handlers::appointments::delete_appointment),
        );

    let inventory_routes = Router::new()
        .route("/", post(handlers::inventory::create_item).get(handlers::inventory::list_items))
        .route("/low-stock", get(handlers::inventory::list_low_stock))
        .route("/stock-report", get(handlers::inventory::stock_report))
        .route(
            "/{id}",
            get(handlers::inventory::get_item)
                .put(handlers::inventory::update_item)
                .delete(handlers::inventory::delete_item),
        )
        .route("/{id}/adjust", post(handlers::inventory::adjust_stock));

    let sale_routes = Router::new()
        .route("/", post(handlers::sales::create_sale).get(handlers::sales::list_sales))
        .route(
            "/{id}",
            get(handlers::sales::get_sale)
                .put(handlers::sales::update_sale)
                .delete(handlers::sales::delete_sale),
        );

    // Tudo em /api exige token, exceto /api/health (registrado fora deste grupo)
    let protected = Router::new()
        .nest("/clients", client_routes)
        .nest("/artists", artist_routes)
        .nest("/appointments", appointment_routes)
        .nest("/inventory", inventory_routes)
        .nest("/sales", sale_routes)
        .route("/dashboard/stats", get(handlers::dashboard::get_stats))
        .route(
            "/upload",
            post(handlers::upload::upload_images).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route_layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    let uploads = ServeDir::new(&app_state.config.upload_dir);
    let request_timeout = app_state.config.request_timeout;

    Router::new()
        .route("/api/health", get(handlers::health))
        .nest("/api", protected)
        .nest_service("/uploads", uploads)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
