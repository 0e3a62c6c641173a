use sqlx::SqlitePool;
use validator::Validate;

use crate::dto::common::{ListQuery, Pagination, PAGE_SIZE};
use crate::dto::user_dto::{AdminEditUserForm, DashboardResponse, ReportData, RoleForm};
use crate::middleware::auth::{require_superuser, AuthenticatedUser};
use crate::models::user::{Role, User, UserType};
use crate::repositories::conductor_repository::ConductorRepository;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::{conflict_error, not_found_error, AppError};

pub struct AdminController {
    users: UserRepository,
    conductores: ConductorRepository,
}

impl AdminController {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            conductores: ConductorRepository::new(pool),
        }
    }

    pub async fn dashboard(&self, query: &ListQuery) -> Result<DashboardResponse, AppError> {
        let page = self
            .users
            .search(query.search(), PAGE_SIZE, query.offset())
            .await?;

        Ok(DashboardResponse {
            users: page.users,
            pagination: Pagination::new(query.page(), page.total),
            query: query.search().map(str::to_string),
            total_users: self.users.count().await?,
            total_workers: self.conductores.count().await?,
        })
    }

    pub async fn delete_user(&self, current: &AuthenticatedUser, id: i64) -> Result<(), AppError> {
        require_superuser(current)?;

        if id == current.id() {
            return Err(AppError::Forbidden(
                "No puedes eliminar tu propia cuenta desde el panel".to_string(),
            ));
        }

        if !self.users.delete(id).await? {
            return Err(not_found_error("Usuario", id));
        }

        tracing::info!(by = current.id(), deleted = id, "Usuario eliminado");
        Ok(())
    }

    pub async fn update_role(
        &self,
        current: &AuthenticatedUser,
        id: i64,
        form: RoleForm,
    ) -> Result<User, AppError> {
        require_superuser(current)?;

        let role = Role::from_str(form.role.trim())
            .ok_or_else(|| AppError::BadRequest(format!("Rol inválido: '{}'", form.role)))?;

        let user = self.users.update_role(id, role).await?;

        tracing::info!(by = current.id(), user_id = id, role = role.as_str(), "Rol actualizado");
        Ok(user)
    }

    pub async fn find_user(&self, current: &AuthenticatedUser, id: i64) -> Result<User, AppError> {
        require_superuser(current)?;

        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Usuario", id))
    }

    pub async fn edit_user(
        &self,
        current: &AuthenticatedUser,
        id: i64,
        form: AdminEditUserForm,
    ) -> Result<User, AppError> {
        let target = self.find_user(current, id).await?;
        form.validate()?;

        let email = form.email.trim().to_lowercase();
        if self.users.email_taken_by_other(&email, id).await? {
            return Err(conflict_error("Usuario", "email", &email));
        }

        let updated = self.users.admin_update(&target, &email, &form.changes()).await?;

        tracing::info!(by = current.id(), user_id = id, "Usuario editado");
        Ok(updated)
    }

    pub async fn report_data(&self) -> Result<ReportData, AppError> {
        let (personas, empresas): (Vec<User>, Vec<User>) = self
            .users
            .list_all()
            .await?
            .into_iter()
            .partition(|u| u.user_type == UserType::Persona);

        Ok(ReportData {
            total_personas: personas.len(),
            total_empresas: empresas.len(),
            personas,
            empresas,
        })
    }
}
