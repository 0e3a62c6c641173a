use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Notificación generada por el sistema (cumpleaños, nuevos registros)
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}
