use axum::{
    extract::State,
    routing::{get, post},
    Extension, Form, Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Serialize;

use crate::controllers::profile_controller::ProfileController;
use crate::dto::common::ApiResponse;
use crate::dto::user_dto::{PasswordForm, ProfileForm, ProfileResponse};
use crate::middleware::auth::{AuthenticatedUser, SESSION_COOKIE};
use crate::models::user::{User, UserType};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_profile_router() -> Router<AppState> {
    Router::new()
        .route("/logout", get(logout))
        .route("/perfil", get(profile))
        .route("/editar_perfil", get(edit_profile_form).post(edit_profile))
        .route("/cambiar_password", post(change_password))
        .route("/delete_account", post(delete_account))
}

fn clear_session(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}

async fn logout(jar: CookieJar) -> (CookieJar, Json<ApiResponse<()>>) {
    (clear_session(jar), Json(ApiResponse::message("Sesión cerrada")))
}

async fn profile(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<ProfileResponse>>, AppError> {
    let controller = ProfileController::new(state.pool.clone());
    let response = controller.profile(&current).await?;
    Ok(Json(ApiResponse::success(response)))
}

#[derive(Debug, Serialize)]
struct EditProfileForm {
    user: User,
    editable_fields: Vec<&'static str>,
}

async fn edit_profile_form(
    Extension(current): Extension<AuthenticatedUser>,
) -> Json<ApiResponse<EditProfileForm>> {
    let editable_fields = match current.user.user_type {
        UserType::Persona => vec![
            "nombre",
            "primer_apellido",
            "segundo_apellido",
            "telefono",
            "whatsapp",
            "fecha_nacimiento",
        ],
        UserType::Empresa => vec![
            "nombre_empresa",
            "encargado",
            "contacto",
            "telefono_fijo",
            "movil",
            "direccion",
            "otros_detalles",
            "whatsapp",
            "fecha_nacimiento",
        ],
    };

    Json(ApiResponse::success(EditProfileForm {
        user: current.user,
        editable_fields,
    }))
}

async fn edit_profile(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Form(form): Form<ProfileForm>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let controller = ProfileController::new(state.pool.clone());
    let user = controller.update_profile(&current, form).await?;
    Ok(Json(ApiResponse::success_with_message(
        user,
        "Perfil actualizado".to_string(),
    )))
}

async fn change_password(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Form(form): Form<PasswordForm>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = ProfileController::new(state.pool.clone());
    controller
        .change_password(&current, form, state.config.bcrypt_cost)
        .await?;
    Ok(Json(ApiResponse::message("Contraseña actualizada")))
}

async fn delete_account(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse<()>>), AppError> {
    let controller = ProfileController::new(state.pool.clone());
    controller.delete_account(&current).await?;
    Ok((clear_session(jar), Json(ApiResponse::message("Cuenta eliminada"))))
}
