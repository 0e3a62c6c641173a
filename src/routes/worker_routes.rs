use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::Form;
use serde::Serialize;

use crate::controllers::conductor_controller::ConductorController;
use crate::dto::common::{ApiResponse, FormDescription, ListQuery};
use crate::dto::conductor_dto::{ConductorDetail, ConductorForm, WorkersResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Registro de colaboradores. El formulario usa `axum_extra::extract::Form`
/// para aceptar campos repetidos.
pub fn create_worker_router() -> Router<AppState> {
    Router::new()
        .route("/workers", get(list_workers))
        .route("/workers/add", get(add_worker_form).post(add_worker))
        .route("/workers/:id", get(worker_detail))
        .route("/workers/edit/:id", get(edit_worker_form).post(edit_worker))
        .route("/workers/delete/:id", post(delete_worker))
}

async fn list_workers(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<WorkersResponse>>, AppError> {
    let controller = ConductorController::new(state.pool.clone());
    Ok(Json(ApiResponse::success(controller.list(&query).await?)))
}

async fn add_worker_form() -> Json<ApiResponse<FormDescription>> {
    Json(ApiResponse::success(ConductorController::form_description(
        "/workers/add".to_string(),
    )))
}

async fn add_worker(
    State(state): State<AppState>,
    Form(form): Form<ConductorForm>,
) -> Result<(StatusCode, Json<ApiResponse<ConductorDetail>>), AppError> {
    let controller = ConductorController::new(state.pool.clone());
    let detail = controller.create(form).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            detail,
            "Colaborador registrado".to_string(),
        )),
    ))
}

async fn worker_detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ConductorDetail>>, AppError> {
    let controller = ConductorController::new(state.pool.clone());
    Ok(Json(ApiResponse::success(controller.detail(id).await?)))
}

#[derive(Debug, Serialize)]
struct EditWorkerForm {
    form: FormDescription,
    current: ConductorDetail,
}

async fn edit_worker_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<EditWorkerForm>>, AppError> {
    let controller = ConductorController::new(state.pool.clone());
    let current = controller.detail(id).await?;
    Ok(Json(ApiResponse::success(EditWorkerForm {
        form: ConductorController::form_description(format!("/workers/edit/{}", id)),
        current,
    })))
}

async fn edit_worker(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<ConductorForm>,
) -> Result<Json<ApiResponse<ConductorDetail>>, AppError> {
    let controller = ConductorController::new(state.pool.clone());
    let detail = controller.update(id, form).await?;
    Ok(Json(ApiResponse::success_with_message(
        detail,
        "Colaborador actualizado".to_string(),
    )))
}

async fn delete_worker(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = ConductorController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(ApiResponse::message("Colaborador eliminado")))
}
