use sqlx::SqlitePool;
use validator::Validate;

use crate::dto::auth_dto::{LoginForm, LoginResponse, RegisterForm, RegisterResponse};
use crate::dto::common::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::user::{NewUser, User, UserType};
use crate::repositories::notification_repository::NotificationRepository;
use crate::repositories::user_repository::UserRepository;
use crate::state::AppState;
use crate::utils::errors::{conflict_error, AppError};
use crate::utils::jwt::{generate_token, JwtConfig};
use crate::utils::password::{hash_password, verify_password};
use crate::utils::validation::{clean, parse_flag, parse_optional_date};

pub struct AuthController {
    pool: SqlitePool,
    repository: UserRepository,
    jwt: JwtConfig,
    bcrypt_cost: u32,
}

/// Texto del aviso que reciben admins y superusuarios por cada alta
pub fn registration_notice(user: &User) -> String {
    format!("Nuevo registro: {} ({})", user.display_name(), user.user_type.as_str())
}

impl AuthController {
    pub fn new(state: &AppState) -> Self {
        Self {
            pool: state.pool.clone(),
            repository: UserRepository::new(state.pool.clone()),
            jwt: state.jwt.clone(),
            bcrypt_cost: state.config.bcrypt_cost,
        }
    }

    pub async fn login(&self, form: LoginForm) -> Result<LoginResponse, AppError> {
        form.validate()?;

        let email = form.email.trim().to_lowercase();
        let user = self
            .repository
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Email o contraseña incorrectos".to_string()))?;

        if !verify_password(&form.password, &user.password_hash) {
            tracing::info!("Login fallido para {}", email);
            return Err(AppError::Unauthorized("Email o contraseña incorrectos".to_string()));
        }

        let expires_in = self.jwt.ttl(parse_flag(form.remember.as_deref()));
        let token = generate_token(user.id, user.role, expires_in, &self.jwt)?;

        tracing::info!(user_id = user.id, "Sesión iniciada");

        Ok(LoginResponse {
            token,
            expires_in,
            user,
        })
    }

    /// Alta de Persona o Empresa. Todos los admins y superusuarios reciben un aviso.
    pub async fn register(
        &self,
        form: RegisterForm,
        current: Option<&AuthenticatedUser>,
    ) -> Result<ApiResponse<RegisterResponse>, AppError> {
        form.validate()?;

        if form.password != form.confirm_password {
            return Err(AppError::BadRequest("Las contraseñas no coinciden".to_string()));
        }

        let email = form.email.trim().to_lowercase();
        if self.repository.email_exists(&email).await? {
            return Err(conflict_error("Usuario", "email", &email));
        }

        let user_type = UserType::from_form(form.tipo_registro.as_deref());
        let mut new_user = NewUser {
            email,
            password_hash: hash_password(&form.password, self.bcrypt_cost)?,
            user_type: Some(user_type),
            fecha_nacimiento: parse_optional_date(form.fecha_nacimiento.as_deref()),
            ..Default::default()
        };

        match user_type {
            UserType::Persona => {
                new_user.nombre = clean(form.nombre.as_deref());
                if new_user.nombre.is_none() {
                    return Err(AppError::BadRequest("El nombre es requerido".to_string()));
                }
                new_user.primer_apellido = clean(form.primer_apellido.as_deref());
                new_user.segundo_apellido = clean(form.segundo_apellido.as_deref());
                new_user.telefono = clean(form.telefono.as_deref());
                new_user.whatsapp = clean(form.whatsapp.as_deref());
            }
            UserType::Empresa => {
                new_user.nombre_empresa = clean(form.nombre_empresa.as_deref());
                if new_user.nombre_empresa.is_none() {
                    return Err(AppError::BadRequest(
                        "El nombre de la empresa es requerido".to_string(),
                    ));
                }
                new_user.encargado = clean(form.encargado.as_deref());
                new_user.contacto = clean(form.contacto.as_deref());
                new_user.telefono_fijo = clean(form.telefono_fijo.as_deref());
                new_user.movil = clean(form.movil.as_deref());
                new_user.direccion = clean(form.direccion.as_deref());
                new_user.otros_detalles = clean(form.otros_detalles.as_deref());
                new_user.whatsapp = clean(form.whatsapp_empresa.as_deref());
            }
        }

        let mut tx = self.pool.begin().await?;

        let user = UserRepository::insert(&mut tx, &new_user).await?;
        let notice = registration_notice(&user);
        for staff_id in UserRepository::list_staff_ids(&mut tx).await? {
            NotificationRepository::insert(&mut tx, staff_id, &notice).await?;
        }

        tx.commit().await?;

        tracing::info!(user_id = user.id, "Usuario registrado: {}", user.email);

        let message = match current {
            Some(staff) if staff.role().is_staff() => "Usuario registrado exitosamente",
            _ => "Registro exitoso, ya puedes iniciar sesión",
        };

        Ok(ApiResponse::success_with_message(
            RegisterResponse { user },
            message.to_string(),
        ))
    }
}
