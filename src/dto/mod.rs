//! Objetos de transferencia
//!
//! Formularios de entrada (`application/x-www-form-urlencoded`) y cuerpos
//! JSON de respuesta.

pub mod auth_dto;
pub mod common;
pub mod conductor_dto;
pub mod message_dto;
pub mod user_dto;

pub use common::*;
