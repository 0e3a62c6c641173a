//! Resumen de la campanita del navbar
//!
//! Une notificaciones y mensajes no leídos en una sola lista ordenada por
//! fecha. Los contadores reflejan todos los pendientes, no solo los que caben
//! en la lista.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::models::message::Message;
use crate::models::notification::Notification;
use crate::repositories::message_repository::MessageRepository;
use crate::repositories::notification_repository::NotificationRepository;
use crate::utils::errors::AppError;

pub const NAVBAR_LIMIT: usize = 10;
const PREVIEW_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NavbarSource {
    Notification,
    Message,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavbarItem {
    pub id: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub source: NavbarSource,
    pub source_id: i64,
}

impl From<&Notification> for NavbarItem {
    fn from(n: &Notification) -> Self {
        Self {
            id: format!("notif_{}", n.id),
            message: n.message.clone(),
            created_at: n.created_at,
            source: NavbarSource::Notification,
            source_id: n.id,
        }
    }
}

impl From<&Message> for NavbarItem {
    fn from(m: &Message) -> Self {
        Self {
            id: format!("msg_{}", m.id),
            message: message_preview(&m.subject, &m.body),
            created_at: m.created_at,
            source: NavbarSource::Message,
            source_id: m.id,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NavbarSummary {
    pub notifications: Vec<NavbarItem>,
    pub notifications_count: usize,
    pub messages_count: usize,
    pub total_count: usize,
    pub has_notifications: bool,
}

/// `📩 asunto: primeros 50 caracteres del cuerpo...`
pub fn message_preview(subject: &str, body: &str) -> String {
    let preview: String = body.chars().take(PREVIEW_CHARS).collect();
    format!("📩 {}: {}...", subject, preview)
}

pub fn aggregate(notifications: &[Notification], messages: &[Message]) -> NavbarSummary {
    let mut items: Vec<NavbarItem> = notifications
        .iter()
        .map(NavbarItem::from)
        .chain(messages.iter().map(NavbarItem::from))
        .collect();

    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    items.truncate(NAVBAR_LIMIT);

    let total_count = notifications.len() + messages.len();

    NavbarSummary {
        notifications: items,
        notifications_count: notifications.len(),
        messages_count: messages.len(),
        total_count,
        has_notifications: total_count > 0,
    }
}

pub struct NavbarService {
    notifications: NotificationRepository,
    messages: MessageRepository,
}

impl NavbarService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            notifications: NotificationRepository::new(pool.clone()),
            messages: MessageRepository::new(pool),
        }
    }

    pub async fn summary(&self, user_id: i64) -> Result<NavbarSummary, AppError> {
        let notifications = self.notifications.unread_for(user_id).await?;
        let messages = self.messages.unread_for(user_id).await?;

        Ok(aggregate(&notifications, &messages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap() + Duration::minutes(minutes)
    }

    fn notification(id: i64, minutes: i64) -> Notification {
        Notification {
            id,
            user_id: 1,
            message: format!("aviso {}", id),
            is_read: false,
            created_at: at(minutes),
        }
    }

    fn message(id: i64, minutes: i64, body: &str) -> Message {
        Message {
            id,
            recipient_id: 1,
            sender_id: 2,
            subject: "Hola".to_string(),
            body: body.to_string(),
            is_read: false,
            is_hidden: false,
            created_at: at(minutes),
        }
    }

    #[test]
    fn test_merges_and_sorts_newest_first() {
        let summary = aggregate(
            &[notification(1, 0), notification(2, 20)],
            &[message(7, 10, "cuerpo")],
        );

        let ids: Vec<&str> = summary.notifications.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["notif_2", "msg_7", "notif_1"]);
        assert_eq!(summary.notifications[1].source, NavbarSource::Message);
        assert_eq!(summary.notifications[1].message, "📩 Hola: cuerpo...");
    }

    #[test]
    fn test_counts_ignore_truncation() {
        let notifications: Vec<_> = (1..=8).map(|i| notification(i, i)).collect();
        let messages: Vec<_> = (1..=5).map(|i| message(i, 100 + i, "x")).collect();

        let summary = aggregate(&notifications, &messages);

        assert_eq!(summary.notifications.len(), NAVBAR_LIMIT);
        assert_eq!(summary.notifications_count, 8);
        assert_eq!(summary.messages_count, 5);
        assert_eq!(summary.total_count, 13);
        assert!(summary.has_notifications);
        // Los cinco mensajes son los más recientes
        assert!(summary.notifications[..5].iter().all(|i| i.source == NavbarSource::Message));
    }

    #[test]
    fn test_empty_summary() {
        let summary = aggregate(&[], &[]);
        assert!(summary.notifications.is_empty());
        assert_eq!(summary.total_count, 0);
        assert!(!summary.has_notifications);
    }

    #[test]
    fn test_preview_cuts_at_fifty_chars() {
        let body = "ñ".repeat(80);
        let preview = message_preview("Asunto", &body);
        assert_eq!(preview, format!("📩 Asunto: {}...", "ñ".repeat(50)));

        assert_eq!(message_preview("A", "corto"), "📩 A: corto...");
    }
}
