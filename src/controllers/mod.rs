//! Controladores
//!
//! Cada controlador agrupa las operaciones de un área y se construye por
//! request a partir del pool compartido.

pub mod admin_controller;
pub mod auth_controller;
pub mod conductor_controller;
pub mod message_controller;
pub mod profile_controller;
