//! Middleware del sistema
//!
//! Este módulo contiene el middleware para autenticación, CORS, rate limiting
//! y el chequeo de cumpleaños.

pub mod auth;
pub mod birthday_check;
pub mod cors;
pub mod rate_limit;

pub use auth::*;
pub use birthday_check::*;
pub use cors::*;
pub use rate_limit::*;
