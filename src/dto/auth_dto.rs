use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::user::User;

// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email(message = "Email inválido"))]
    pub email: String,
    pub password: String,
    /// Casilla "recordarme"
    pub remember: Option<String>,
}

// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: u64,
    pub user: User,
}

/// Registro de Persona o Empresa en un mismo formulario
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    /// "Persona" o "Empresa"
    pub tipo_registro: Option<String>,
    #[validate(email(message = "Email inválido"))]
    pub email: String,
    #[validate(length(min = 6, message = "La contraseña debe tener al menos 6 caracteres"))]
    pub password: String,
    pub confirm_password: String,

    // Persona
    pub nombre: Option<String>,
    pub primer_apellido: Option<String>,
    pub segundo_apellido: Option<String>,
    pub telefono: Option<String>,
    pub whatsapp: Option<String>,
    pub fecha_nacimiento: Option<String>,

    // Empresa
    pub nombre_empresa: Option<String>,
    pub encargado: Option<String>,
    pub contacto: Option<String>,
    pub telefono_fijo: Option<String>,
    pub movil: Option<String>,
    pub direccion: Option<String>,
    pub otros_detalles: Option<String>,
    pub whatsapp_empresa: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user: User,
}
