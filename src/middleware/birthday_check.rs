//! Chequeo de cumpleaños antes de cada request autenticada
//!
//! Solo para superusuarios y fuera de `/static`. Un fallo se registra y la
//! request sigue su curso.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use chrono::Local;

use crate::middleware::auth::AuthenticatedUser;
use crate::services::birthday_service::BirthdayService;
use crate::state::AppState;

pub async fn birthday_check_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let skip = request.uri().path().starts_with("/static");

    if !skip {
        let current = request.extensions().get::<AuthenticatedUser>().cloned();

        if let Some(current) = current.filter(|u| u.role().is_superuser()) {
            let today = Local::now().date_naive();
            let service = BirthdayService::new(state.pool.clone());

            if let Err(e) = service.check_and_notify(&current.user, today).await {
                tracing::warn!("No se pudieron generar avisos de cumpleaños: {}", e);
            }
        }
    }

    next.run(request).await
}
