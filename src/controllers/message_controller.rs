use sqlx::SqlitePool;
use validator::Validate;

use crate::dto::message_dto::{
    BroadcastForm, BroadcastResponse, NotificationsReadResponse, ReadMessageResponse,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::message::Message;
use crate::repositories::message_repository::MessageRepository;
use crate::repositories::notification_repository::NotificationRepository;
use crate::repositories::user_repository::UserRepository;
use crate::services::navbar_service::{NavbarService, NavbarSummary};
use crate::utils::errors::AppError;

pub struct MessageController {
    pool: SqlitePool,
    messages: MessageRepository,
    notifications: NotificationRepository,
}

impl MessageController {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            messages: MessageRepository::new(pool.clone()),
            notifications: NotificationRepository::new(pool.clone()),
            pool,
        }
    }

    /// Solo el destinatario puede tocar su mensaje. Un id inexistente se trata
    /// igual que uno ajeno.
    async fn owned_message(&self, current: &AuthenticatedUser, id: i64) -> Result<Message, AppError> {
        self.messages
            .find_by_id(id)
            .await?
            .filter(|message| message.recipient_id == current.id())
            .ok_or_else(|| AppError::Forbidden("No autorizado".to_string()))
    }

    pub async fn mark_read(
        &self,
        current: &AuthenticatedUser,
        id: i64,
    ) -> Result<ReadMessageResponse, AppError> {
        self.owned_message(current, id).await?;
        self.messages.mark_read(id).await?;

        Ok(ReadMessageResponse {
            status: "success",
            unread_count: self.messages.count_unread(current.id()).await?,
        })
    }

    pub async fn hide(&self, current: &AuthenticatedUser, id: i64) -> Result<(), AppError> {
        self.owned_message(current, id).await?;
        self.messages.hide(id).await
    }

    pub async fn mark_notifications_read(
        &self,
        current: &AuthenticatedUser,
    ) -> Result<NotificationsReadResponse, AppError> {
        let updated = self.notifications.mark_all_read(current.id()).await?;
        Ok(NotificationsReadResponse { updated })
    }

    pub async fn navbar(&self, current: &AuthenticatedUser) -> Result<NavbarSummary, AppError> {
        NavbarService::new(self.pool.clone()).summary(current.id()).await
    }

    /// Un mensaje por usuario existente, remitente incluido, en una sola transacción
    pub async fn broadcast(
        &self,
        sender: &AuthenticatedUser,
        form: BroadcastForm,
    ) -> Result<BroadcastResponse, AppError> {
        form.validate()?;

        let subject = form.subject.trim();
        let body = form.body.trim();

        let mut tx = self.pool.begin().await?;
        let recipients = UserRepository::list_ids(&mut tx).await?;
        for recipient_id in &recipients {
            MessageRepository::insert(&mut tx, sender.id(), *recipient_id, subject, body).await?;
        }
        tx.commit().await?;

        tracing::info!(sender = sender.id(), recipients = recipients.len(), "Mensaje difundido");

        Ok(BroadcastResponse {
            recipients: recipients.len(),
        })
    }
}
