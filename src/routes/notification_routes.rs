use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::message_controller::MessageController;
use crate::dto::common::ApiResponse;
use crate::dto::message_dto::{NotificationsReadResponse, ReadMessageResponse};
use crate::middleware::auth::AuthenticatedUser;
use crate::services::navbar_service::NavbarSummary;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_notification_router() -> Router<AppState> {
    Router::new()
        .route("/user/message/:id/read", post(mark_message_read))
        .route("/user/message/:id/hide", post(hide_message))
        .route("/notifications/read", post(mark_notifications_read))
        .route("/notifications/navbar", get(navbar))
}

async fn mark_message_read(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> Result<Json<ReadMessageResponse>, AppError> {
    let controller = MessageController::new(state.pool.clone());
    Ok(Json(controller.mark_read(&current, id).await?))
}

async fn hide_message(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = MessageController::new(state.pool.clone());
    controller.hide(&current, id).await?;
    Ok(Json(ApiResponse::message("Mensaje ocultado")))
}

async fn mark_notifications_read(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<NotificationsReadResponse>>, AppError> {
    let controller = MessageController::new(state.pool.clone());
    let response = controller.mark_notifications_read(&current).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn navbar(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
) -> Result<Json<NavbarSummary>, AppError> {
    let controller = MessageController::new(state.pool.clone());
    Ok(Json(controller.navbar(&current).await?))
}
