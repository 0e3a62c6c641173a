use axum::{
    extract::State,
    http::StatusCode,
    middleware::from_fn_with_state,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Extension, Form, Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{LoginForm, RegisterForm};
use crate::dto::common::{ApiResponse, FormDescription};
use crate::middleware::auth::{AuthenticatedUser, SESSION_COOKIE};
use crate::middleware::rate_limit::rate_limit_middleware;
use crate::models::user::User;
use crate::services::navbar_service::{NavbarService, NavbarSummary};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Rutas públicas; el usuario se inyecta si hay sesión válida
pub fn create_public_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route(
            "/login",
            get(login_form)
                .merge(post(login).route_layer(from_fn_with_state(state, rate_limit_middleware))),
        )
        .route("/register", get(register_form).post(register))
}

#[derive(Debug, Serialize)]
struct IndexResponse {
    service: &'static str,
    version: &'static str,
    user: Option<User>,
    navbar: Option<NavbarSummary>,
}

async fn index(
    State(state): State<AppState>,
    current: Option<Extension<AuthenticatedUser>>,
) -> Result<Json<ApiResponse<IndexResponse>>, AppError> {
    let (user, navbar) = match current {
        Some(Extension(current)) => {
            let navbar = NavbarService::new(state.pool.clone()).summary(current.id()).await?;
            (Some(current.user), Some(navbar))
        }
        None => (None, None),
    };

    Ok(Json(ApiResponse::success(IndexResponse {
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        user,
        navbar,
    })))
}

async fn login_form(current: Option<Extension<AuthenticatedUser>>) -> Response {
    if current.is_some() {
        return Redirect::to("/").into_response();
    }

    Json(ApiResponse::success(FormDescription::new(
        "/login",
        vec!["email", "password", "remember"],
    )))
    .into_response()
}

/// Con sesión activa no se vuelve a iniciar sesión
async fn login(
    State(state): State<AppState>,
    current: Option<Extension<AuthenticatedUser>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    if current.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    let controller = AuthController::new(&state);
    let response = controller.login(form).await?;

    let cookie = Cookie::build((SESSION_COOKIE, response.token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.is_production());

    Ok((
        jar.add(cookie),
        Json(ApiResponse::success_with_message(
            response,
            "Sesión iniciada".to_string(),
        )),
    )
        .into_response())
}

/// Un usuario regular con sesión vuelve al inicio; el staff puede registrar a otros
async fn register_form(current: Option<Extension<AuthenticatedUser>>) -> Response {
    if let Some(Extension(user)) = current {
        if !user.role().is_staff() {
            return Redirect::to("/").into_response();
        }
    }

    Json(ApiResponse::success(FormDescription::new(
        "/register",
        vec![
            "tipo_registro",
            "email",
            "password",
            "confirm_password",
            "nombre",
            "primer_apellido",
            "segundo_apellido",
            "telefono",
            "whatsapp",
            "fecha_nacimiento",
            "nombre_empresa",
            "encargado",
            "contacto",
            "telefono_fijo",
            "movil",
            "direccion",
            "otros_detalles",
            "whatsapp_empresa",
        ],
    )))
    .into_response()
}

async fn register(
    State(state): State<AppState>,
    current: Option<Extension<AuthenticatedUser>>,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    let current = current.map(|Extension(user)| user);
    if let Some(user) = &current {
        if !user.role().is_staff() {
            return Ok(Redirect::to("/").into_response());
        }
    }

    let controller = AuthController::new(&state);
    let response = controller.register(form, current.as_ref()).await?;
    Ok((StatusCode::CREATED, Json(response)).into_response())
}
