//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean
//! al esquema relacional.

pub mod conductor;
pub mod message;
pub mod notification;
pub mod user;
