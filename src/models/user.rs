//! Modelo de User
//!
//! Una sola tabla `users` con dos formas: Persona y Empresa, distinguidas por
//! `user_type` y campos opcionales.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Roles del sistema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    Regular,
    Admin,
    Superuser,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Regular => "regular",
            Role::Admin => "admin",
            Role::Superuser => "superuser",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "regular" => Some(Role::Regular),
            "admin" => Some(Role::Admin),
            "superuser" => Some(Role::Superuser),
            _ => None,
        }
    }

    /// Admin o superusuario: acceso al dashboard, difusión y colaboradores
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Admin | Role::Superuser)
    }

    pub fn is_superuser(&self) -> bool {
        matches!(self, Role::Superuser)
    }
}

/// Tipo de cuenta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum UserType {
    Persona,
    Empresa,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Persona => "Persona",
            UserType::Empresa => "Empresa",
        }
    }

    /// Cualquier valor distinto de "Persona" registra una Empresa
    pub fn from_form(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("Persona") => UserType::Persona,
            _ => UserType::Empresa,
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub user_type: UserType,
    pub avatar: Option<String>,

    // Persona
    pub nombre: Option<String>,
    pub primer_apellido: Option<String>,
    pub segundo_apellido: Option<String>,

    // Empresa
    pub nombre_empresa: Option<String>,
    pub encargado: Option<String>,
    pub contacto: Option<String>,
    pub telefono_fijo: Option<String>,
    pub direccion: Option<String>,
    pub otros_detalles: Option<String>,

    pub telefono: Option<String>,
    pub movil: Option<String>,
    pub whatsapp: Option<String>,

    pub fecha_nacimiento: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Nombre para mostrar: nombre de la persona o de la empresa, con el email como respaldo
    pub fn display_name(&self) -> String {
        let name = match self.user_type {
            UserType::Persona => self.nombre.as_deref(),
            UserType::Empresa => self.nombre_empresa.as_deref(),
        };
        match name.map(str::trim) {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => self.email.clone(),
        }
    }
}

/// Datos para insertar un usuario nuevo
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub role: Option<Role>,
    pub user_type: Option<UserType>,
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
    pub fecha_nacimiento: Option<NaiveDate>,
}
