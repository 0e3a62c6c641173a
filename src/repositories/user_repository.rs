use crate::models::user::{NewUser, Role, User, UserType};
use crate::utils::errors::AppError;
use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};

/// Campos que el propio usuario (o un superusuario) puede editar
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub nombre: Option<String>,
    pub primer_apellido: Option<String>,
    pub segundo_apellido: Option<String>,
    pub nombre_empresa: Option<String>,
    pub encargado: Option<String>,
    pub contacto: Option<String>,
    pub telefono_fijo: Option<String>,
    pub direccion: Option<String>,
    pub otros_detalles: Option<String>,
    pub telefono: Option<String>,
    pub movil: Option<String>,
    pub whatsapp: Option<String>,
    pub fecha_nacimiento: Option<chrono::NaiveDate>,
}

/// Página de usuarios del dashboard
#[derive(Debug)]
pub struct UserPage {
    pub users: Vec<User>,
    pub total: i64,
}

pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserta dentro de una transacción abierta
    pub async fn insert(conn: &mut SqliteConnection, user: &NewUser) -> Result<User, AppError> {
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (
                email, password_hash, role, user_type, nombre, primer_apellido, segundo_apellido,
                nombre_empresa, encargado, contacto, telefono_fijo, direccion, otros_detalles,
                telefono, movil, whatsapp, fecha_nacimiento, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.unwrap_or(Role::Regular))
        .bind(user.user_type.unwrap_or(UserType::Persona))
        .bind(&user.nombre)
        .bind(&user.primer_apellido)
        .bind(&user.segundo_apellido)
        .bind(&user.nombre_empresa)
        .bind(&user.encargado)
        .bind(&user.contacto)
        .bind(&user.telefono_fijo)
        .bind(&user.direccion)
        .bind(&user.otros_detalles)
        .bind(&user.telefono)
        .bind(&user.movil)
        .bind(&user.whatsapp)
        .bind(user.fecha_nacimiento)
        .bind(Utc::now())
        .fetch_one(&mut *conn)
        .await?;

        Ok(created)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE email = ?)")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }

    /// Igual que `email_exists` pero ignorando al propio usuario
    pub async fn email_taken_by_other(&self, email: &str, user_id: i64) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE email = ? AND id <> ?)")
                .bind(email)
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }

    pub async fn list_all(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    /// Ids de todos los usuarios, para la difusión
    pub async fn list_ids(conn: &mut SqliteConnection) -> Result<Vec<i64>, AppError> {
        let ids: Vec<(i64,)> = sqlx::query_as("SELECT id FROM users ORDER BY id")
            .fetch_all(&mut *conn)
            .await?;

        Ok(ids.into_iter().map(|(id,)| id).collect())
    }

    /// Administradores y superusuarios
    pub async fn list_staff_ids(conn: &mut SqliteConnection) -> Result<Vec<i64>, AppError> {
        let ids: Vec<(i64,)> =
            sqlx::query_as("SELECT id FROM users WHERE role IN ('admin', 'superuser') ORDER BY id")
                .fetch_all(&mut *conn)
                .await?;

        Ok(ids.into_iter().map(|(id,)| id).collect())
    }

    pub async fn list_with_birth_date(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE fecha_nacimiento IS NOT NULL ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Búsqueda paginada sobre nombres, email, rol y teléfonos
    pub async fn search(&self, query: Option<&str>, limit: i64, offset: i64) -> Result<UserPage, AppError> {
        let pattern = query
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(|q| format!("%{}%", q));

        const FILTER: &str = r#"
            ?1 IS NULL
            OR nombre LIKE ?1 OR primer_apellido LIKE ?1 OR segundo_apellido LIKE ?1
            OR nombre_empresa LIKE ?1 OR email LIKE ?1 OR role LIKE ?1
            OR telefono LIKE ?1 OR telefono_fijo LIKE ?1 OR movil LIKE ?1
        "#;

        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT * FROM users WHERE {} ORDER BY id LIMIT ?2 OFFSET ?3",
            FILTER
        ))
        .bind(&pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM users WHERE {}", FILTER))
            .bind(&pattern)
            .fetch_one(&self.pool)
            .await?;

        Ok(UserPage { users, total: total.0 })
    }

    /// Aplica los cambios de perfil según el tipo de cuenta
    pub async fn update_profile(
        &self,
        user: &User,
        changes: &ProfileChanges,
    ) -> Result<User, AppError> {
        let updated = match user.user_type {
            UserType::Persona => {
                sqlx::query_as::<_, User>(
                    r#"
                    UPDATE users
                    SET nombre = ?, primer_apellido = ?, segundo_apellido = ?, telefono = ?,
                        whatsapp = ?, fecha_nacimiento = COALESCE(?, fecha_nacimiento)
                    WHERE id = ?
                    RETURNING *
                    "#,
                )
                .bind(&changes.nombre)
                .bind(&changes.primer_apellido)
                .bind(&changes.segundo_apellido)
                .bind(&changes.telefono)
                .bind(&changes.whatsapp)
                .bind(changes.fecha_nacimiento)
                .bind(user.id)
                .fetch_one(&self.pool)
                .await?
            }
            UserType::Empresa => {
                sqlx::query_as::<_, User>(
                    r#"
                    UPDATE users
                    SET nombre_empresa = ?, encargado = ?, contacto = ?, telefono_fijo = ?,
                        movil = ?, direccion = ?, otros_detalles = ?, whatsapp = ?,
                        fecha_nacimiento = COALESCE(?, fecha_nacimiento)
                    WHERE id = ?
                    RETURNING *
                    "#,
                )
                .bind(&changes.nombre_empresa)
                .bind(&changes.encargado)
                .bind(&changes.contacto)
                .bind(&changes.telefono_fijo)
                .bind(&changes.movil)
                .bind(&changes.direccion)
                .bind(&changes.otros_detalles)
                .bind(&changes.whatsapp)
                .bind(changes.fecha_nacimiento)
                .bind(user.id)
                .fetch_one(&self.pool)
                .await?
            }
        };

        Ok(updated)
    }

    /// Edición administrativa: nombre/contacto según el tipo y el email
    pub async fn admin_update(
        &self,
        user: &User,
        email: &str,
        changes: &ProfileChanges,
    ) -> Result<User, AppError> {
        let updated = match user.user_type {
            UserType::Persona => {
                sqlx::query_as::<_, User>(
                    "UPDATE users SET nombre = ?, primer_apellido = ?, telefono = ?, email = ? WHERE id = ? RETURNING *",
                )
                .bind(&changes.nombre)
                .bind(&changes.primer_apellido)
                .bind(&changes.telefono)
                .bind(email)
                .bind(user.id)
                .fetch_one(&self.pool)
                .await?
            }
            UserType::Empresa => {
                sqlx::query_as::<_, User>(
                    "UPDATE users SET nombre_empresa = ?, contacto = ?, email = ? WHERE id = ? RETURNING *",
                )
                .bind(&changes.nombre_empresa)
                .bind(&changes.contacto)
                .bind(email)
                .bind(user.id)
                .fetch_one(&self.pool)
                .await?
            }
        };

        Ok(updated)
    }

    pub async fn update_password(&self, id: i64, password_hash: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET password_hash = ? WHERE id = ?")
            .bind(password_hash)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn update_role(&self, id: i64, role: Role) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>("UPDATE users SET role = ? WHERE id = ? RETURNING *")
            .bind(role)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;

        Ok(user)
    }

    /// Los mensajes y notificaciones del usuario se eliminan en cascada
    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
