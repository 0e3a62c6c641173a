//! Middleware de autenticación JWT
//!
//! Este módulo maneja la extracción del token de sesión (cookie o header),
//! la carga del usuario y los chequeos de rol.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
    Extension,
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    models::user::{Role, User},
    repositories::user_repository::UserRepository,
    state::AppState,
    utils::{
        errors::AppError,
        jwt::{extract_token_from_header, verify_token},
    },
};

/// Nombre de la cookie de sesión
pub const SESSION_COOKIE: &str = "session";

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
}

impl AuthenticatedUser {
    pub fn id(&self) -> i64 {
        self.user.id
    }

    pub fn role(&self) -> Role {
        self.user.role
    }
}

/// Token del header Authorization o, si no viene, de la cookie de sesión
fn session_token(headers: &HeaderMap, jar: &CookieJar) -> Option<String> {
    let from_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| extract_token_from_header(value).ok())
        .map(str::to_string);

    from_header.or_else(|| {
        jar.get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
    })
}

/// El usuario se vuelve a leer en cada request: un cambio de rol o un borrado
/// se aplican de inmediato
async fn resolve_user(state: &AppState, token: &str) -> Result<User, AppError> {
    let claims = verify_token(token, &state.jwt)
        .map_err(|_| AppError::Unauthorized("Sesión inválida o expirada".to_string()))?;
    let user_id = claims.user_id()?;

    UserRepository::new(state.pool.clone())
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Usuario no encontrado".to_string()))
}

/// Middleware de autenticación obligatoria
pub async fn auth_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = session_token(request.headers(), &jar)
        .ok_or_else(|| AppError::Unauthorized("Debes iniciar sesión".to_string()))?;

    let user = resolve_user(&state, &token).await?;
    request.extensions_mut().insert(AuthenticatedUser { user });

    Ok(next.run(request).await)
}

/// Middleware opcional de autenticación (para rutas que pueden ser públicas o privadas)
pub async fn optional_auth_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token) = session_token(request.headers(), &jar) {
        match resolve_user(&state, &token).await {
            Ok(user) => {
                request.extensions_mut().insert(AuthenticatedUser { user });
            }
            Err(e) => tracing::debug!("Sesión ignorada en ruta pública: {}", e),
        }
    }

    next.run(request).await
}

/// Admin o superusuario
pub async fn staff_only_middleware(
    Extension(user): Extension<AuthenticatedUser>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !user.role().is_staff() {
        return Err(AppError::Forbidden("Acceso no autorizado".to_string()));
    }

    Ok(next.run(request).await)
}

/// Chequeo para las operaciones reservadas al superusuario
pub fn require_superuser(user: &AuthenticatedUser) -> Result<(), AppError> {
    if user.role().is_superuser() {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Solo un superusuario puede realizar esta acción".to_string(),
        ))
    }
}
