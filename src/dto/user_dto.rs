use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::common::Pagination;
use crate::models::message::InboxMessage;
use crate::models::user::User;
use crate::repositories::user_repository::ProfileChanges;
use crate::utils::validation::{clean, parse_optional_date};

/// Perfil propio con el buzón de mensajes visibles
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: User,
    pub display_name: String,
    pub messages: Vec<InboxMessage>,
    pub unread_messages: i64,
}

/// Campos editables del perfil; se aplican según el tipo de cuenta
#[derive(Debug, Default, Deserialize)]
pub struct ProfileForm {
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
    pub fecha_nacimiento: Option<String>,
}

impl ProfileForm {
    pub fn into_changes(self) -> ProfileChanges {
        ProfileChanges {
            nombre: clean(self.nombre.as_deref()),
            primer_apellido: clean(self.primer_apellido.as_deref()),
            segundo_apellido: clean(self.segundo_apellido.as_deref()),
            nombre_empresa: clean(self.nombre_empresa.as_deref()),
            encargado: clean(self.encargado.as_deref()),
            contacto: clean(self.contacto.as_deref()),
            telefono_fijo: clean(self.telefono_fijo.as_deref()),
            direccion: clean(self.direccion.as_deref()),
            otros_detalles: clean(self.otros_detalles.as_deref()),
            telefono: clean(self.telefono.as_deref()),
            movil: clean(self.movil.as_deref()),
            whatsapp: clean(self.whatsapp.as_deref()),
            fecha_nacimiento: parse_optional_date(self.fecha_nacimiento.as_deref()),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct PasswordForm {
    pub current_password: String,
    #[validate(length(min = 6, message = "La contraseña debe tener al menos 6 caracteres"))]
    pub new_password: String,
    pub confirm_password: String,
}

#[derive(Debug, Deserialize)]
pub struct RoleForm {
    pub role: String,
}

/// Edición de otra cuenta por un superusuario
#[derive(Debug, Deserialize, Validate)]
pub struct AdminEditUserForm {
    #[validate(email(message = "Email inválido"))]
    pub email: String,
    pub nombre: Option<String>,
    pub primer_apellido: Option<String>,
    pub telefono: Option<String>,
    pub nombre_empresa: Option<String>,
    pub contacto: Option<String>,
}

impl AdminEditUserForm {
    pub fn changes(&self) -> ProfileChanges {
        ProfileChanges {
            nombre: clean(self.nombre.as_deref()),
            primer_apellido: clean(self.primer_apellido.as_deref()),
            telefono: clean(self.telefono.as_deref()),
            nombre_empresa: clean(self.nombre_empresa.as_deref()),
            contacto: clean(self.contacto.as_deref()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub users: Vec<User>,
    pub pagination: Pagination,
    pub query: Option<String>,
    pub total_users: i64,
    pub total_workers: i64,
}

/// Usuarios separados por tipo para el reporte
#[derive(Debug, Serialize)]
pub struct ReportData {
    pub personas: Vec<User>,
    pub empresas: Vec<User>,
    pub total_personas: usize,
    pub total_empresas: usize,
}
