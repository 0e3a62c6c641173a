use crate::models::message::{InboxMessage, Message};
use crate::utils::errors::AppError;
use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};

pub struct MessageRepository {
    pool: SqlitePool,
}

impl MessageRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserta un mensaje dentro de una transacción abierta
    pub async fn insert(
        conn: &mut SqliteConnection,
        sender_id: i64,
        recipient_id: i64,
        subject: &str,
        body: &str,
    ) -> Result<i64, AppError> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO messages (recipient_id, sender_id, subject, body, is_read, is_hidden, created_at)
            VALUES (?, ?, ?, ?, 0, 0, ?)
            RETURNING id
            "#,
        )
        .bind(recipient_id)
        .bind(sender_id)
        .bind(subject)
        .bind(body)
        .bind(Utc::now())
        .fetch_one(&mut *conn)
        .await?;

        Ok(id)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Message>, AppError> {
        let message = sqlx::query_as::<_, Message>("SELECT * FROM messages WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(message)
    }

    /// Buzón visible del usuario, más recientes primero
    pub async fn inbox(&self, recipient_id: i64) -> Result<Vec<InboxMessage>, AppError> {
        let messages = sqlx::query_as::<_, InboxMessage>(
            r#"
            SELECT m.id, m.sender_id, u.email AS sender_email, m.subject, m.body, m.is_read, m.created_at
            FROM messages m
            LEFT JOIN users u ON u.id = m.sender_id
            WHERE m.recipient_id = ? AND m.is_hidden = 0
            ORDER BY m.created_at DESC, m.id DESC
            "#,
        )
        .bind(recipient_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    pub async fn unread_for(&self, recipient_id: i64) -> Result<Vec<Message>, AppError> {
        let messages = sqlx::query_as::<_, Message>(
            "SELECT * FROM messages WHERE recipient_id = ? AND is_read = 0 ORDER BY created_at DESC, id DESC",
        )
        .bind(recipient_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    pub async fn count_unread(&self, recipient_id: i64) -> Result<i64, AppError> {
        let result: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM messages WHERE recipient_id = ? AND is_read = 0")
                .bind(recipient_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    pub async fn mark_read(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("UPDATE messages SET is_read = 1 WHERE id = ? AND is_read = 0")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn hide(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("UPDATE messages SET is_hidden = 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
