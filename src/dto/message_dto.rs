use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::validation::validate_not_empty;

/// Mensaje de difusión a todos los usuarios
#[derive(Debug, Deserialize, Validate)]
pub struct BroadcastForm {
    #[validate(custom = "validate_not_empty")]
    pub subject: String,
    #[validate(custom = "validate_not_empty")]
    pub body: String,
}

#[derive(Debug, Serialize)]
pub struct BroadcastResponse {
    pub recipients: usize,
}

/// Respuesta del marcado de lectura de un mensaje
#[derive(Debug, Serialize)]
pub struct ReadMessageResponse {
    pub status: &'static str,
    pub unread_count: i64,
}

#[derive(Debug, Serialize)]
pub struct NotificationsReadResponse {
    pub updated: u64,
}
