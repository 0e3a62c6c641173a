use sqlx::SqlitePool;
use validator::Validate;

use crate::dto::user_dto::{PasswordForm, ProfileForm, ProfileResponse};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::user::User;
use crate::repositories::message_repository::MessageRepository;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::AppError;
use crate::utils::password::{hash_password, verify_password};

pub struct ProfileController {
    users: UserRepository,
    messages: MessageRepository,
}

impl ProfileController {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            messages: MessageRepository::new(pool),
        }
    }

    pub async fn profile(&self, current: &AuthenticatedUser) -> Result<ProfileResponse, AppError> {
        let messages = self.messages.inbox(current.id()).await?;
        let unread_messages = self.messages.count_unread(current.id()).await?;

        Ok(ProfileResponse {
            display_name: current.user.display_name(),
            user: current.user.clone(),
            messages,
            unread_messages,
        })
    }

    pub async fn update_profile(
        &self,
        current: &AuthenticatedUser,
        form: ProfileForm,
    ) -> Result<User, AppError> {
        let updated = self
            .users
            .update_profile(&current.user, &form.into_changes())
            .await?;

        tracing::info!(user_id = updated.id, "Perfil actualizado");
        Ok(updated)
    }

    pub async fn change_password(
        &self,
        current: &AuthenticatedUser,
        form: PasswordForm,
        bcrypt_cost: u32,
    ) -> Result<(), AppError> {
        if !verify_password(&form.current_password, &current.user.password_hash) {
            return Err(AppError::BadRequest(
                "La contraseña actual es incorrecta".to_string(),
            ));
        }

        form.validate()?;

        if form.new_password != form.confirm_password {
            return Err(AppError::BadRequest("Las contraseñas no coinciden".to_string()));
        }

        let password_hash = hash_password(&form.new_password, bcrypt_cost)?;
        self.users.update_password(current.id(), &password_hash).await?;

        tracing::info!(user_id = current.id(), "Contraseña cambiada");
        Ok(())
    }

    pub async fn delete_account(&self, current: &AuthenticatedUser) -> Result<(), AppError> {
        self.users.delete(current.id()).await?;

        tracing::info!(user_id = current.id(), "Cuenta eliminada por su titular");
        Ok(())
    }
}
