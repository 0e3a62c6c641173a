use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Extension, Form, Json, Router,
};

use crate::controllers::admin_controller::AdminController;
use crate::controllers::message_controller::MessageController;
use crate::dto::common::{ApiResponse, ListQuery};
use crate::dto::message_dto::{BroadcastForm, BroadcastResponse};
use crate::dto::user_dto::{AdminEditUserForm, DashboardResponse, ReportData, RoleForm};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::user::User;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Rutas de staff; las de superusuario se validan en el controlador
pub fn create_admin_router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/admin/broadcast", post(broadcast))
        .route("/admin/delete_user/:id", post(delete_user))
        .route("/admin/update_role/:id", post(update_role))
        .route("/admin/edit_user/:id", get(edit_user_form).post(edit_user))
        .route("/admin/report/data", get(report_data))
}

async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<DashboardResponse>>, AppError> {
    let controller = AdminController::new(state.pool.clone());
    Ok(Json(ApiResponse::success(controller.dashboard(&query).await?)))
}

async fn broadcast(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Form(form): Form<BroadcastForm>,
) -> Result<Json<ApiResponse<BroadcastResponse>>, AppError> {
    let controller = MessageController::new(state.pool.clone());
    let response = controller.broadcast(&current, form).await?;
    let message = format!("Mensaje enviado a {} usuarios", response.recipients);
    Ok(Json(ApiResponse::success_with_message(response, message)))
}

async fn delete_user(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = AdminController::new(state.pool.clone());
    controller.delete_user(&current, id).await?;
    Ok(Json(ApiResponse::message("Usuario eliminado")))
}

async fn update_role(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    Form(form): Form<RoleForm>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let controller = AdminController::new(state.pool.clone());
    let user = controller.update_role(&current, id, form).await?;
    Ok(Json(ApiResponse::success_with_message(
        user,
        "Rol actualizado".to_string(),
    )))
}

async fn edit_user_form(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let controller = AdminController::new(state.pool.clone());
    Ok(Json(ApiResponse::success(controller.find_user(&current, id).await?)))
}

async fn edit_user(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    Form(form): Form<AdminEditUserForm>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let controller = AdminController::new(state.pool.clone());
    let user = controller.edit_user(&current, id, form).await?;
    Ok(Json(ApiResponse::success_with_message(
        user,
        "Usuario actualizado".to_string(),
    )))
}

async fn report_data(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ReportData>>, AppError> {
    let controller = AdminController::new(state.pool.clone());
    Ok(Json(ApiResponse::success(controller.report_data().await?)))
}
