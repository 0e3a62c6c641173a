use crate::models::notification::Notification;
use crate::utils::errors::AppError;
use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};

pub struct NotificationRepository {
    pool: SqlitePool,
}

impl NotificationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        conn: &mut SqliteConnection,
        user_id: i64,
        message: &str,
    ) -> Result<i64, AppError> {
        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO notifications (user_id, message, is_read, created_at) VALUES (?, ?, 0, ?) RETURNING id",
        )
        .bind(user_id)
        .bind(message)
        .bind(Utc::now())
        .fetch_one(&mut *conn)
        .await?;

        Ok(id)
    }

    /// Fechas de creación de las notificaciones con ese texto exacto para ese usuario
    pub async fn created_dates(
        conn: &mut SqliteConnection,
        user_id: i64,
        message: &str,
    ) -> Result<Vec<DateTime<Utc>>, AppError> {
        let rows: Vec<(DateTime<Utc>,)> =
            sqlx::query_as("SELECT created_at FROM notifications WHERE user_id = ? AND message = ?")
                .bind(user_id)
                .bind(message)
                .fetch_all(&mut *conn)
                .await?;

        Ok(rows.into_iter().map(|(created_at,)| created_at).collect())
    }

    pub async fn unread_for(&self, user_id: i64) -> Result<Vec<Notification>, AppError> {
        let notifications = sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE user_id = ? AND is_read = 0 ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications)
    }

    /// Marca como leídas todas las pendientes; devuelve cuántas cambiaron
    pub async fn mark_all_read(&self, user_id: i64) -> Result<u64, AppError> {
        let result = sqlx::query("UPDATE notifications SET is_read = 1 WHERE user_id = ? AND is_read = 0")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
