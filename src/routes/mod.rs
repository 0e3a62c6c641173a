//! Rutas HTTP
//!
//! Tres grupos: públicas (sesión opcional), autenticadas y de staff. El
//! chequeo de cumpleaños corre después de resolver la sesión.

pub mod admin_routes;
pub mod auth_routes;
pub mod notification_routes;
pub mod profile_routes;
pub mod worker_routes;

use axum::{
    middleware::{from_fn, from_fn_with_state},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::{
    auth_middleware, birthday_check_middleware, cors_middleware, optional_auth_middleware,
    staff_only_middleware,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_app(state: AppState) -> Router {
    let public = auth_routes::create_public_router(state.clone())
        .route_layer(from_fn_with_state(state.clone(), birthday_check_middleware))
        .route_layer(from_fn_with_state(state.clone(), optional_auth_middleware));

    let staff = admin_routes::create_admin_router()
        .merge(worker_routes::create_worker_router())
        .route_layer(from_fn(staff_only_middleware));

    let protected = profile_routes::create_profile_router()
        .merge(notification_routes::create_notification_router())
        .merge(staff)
        .route_layer(from_fn_with_state(state.clone(), birthday_check_middleware))
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public)
        .merge(protected)
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors_middleware(&state.config)),
        )
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound("Ruta no encontrada".to_string())
}
