use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Mensaje dirigido: una fila por destinatario
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Message {
    pub id: i64,
    pub recipient_id: i64,
    pub sender_id: i64,
    pub subject: String,
    pub body: String,
    pub is_read: bool,
    pub is_hidden: bool,
    pub created_at: DateTime<Utc>,
}

/// Mensaje del buzón con el email del remitente
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct InboxMessage {
    pub id: i64,
    pub sender_id: i64,
    pub sender_email: Option<String>,
    pub subject: String,
    pub body: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}
