//! Acceso a datos
//!
//! Consultas directas sobre SQLite. Las operaciones que forman parte de una
//! transacción reciben la conexión en lugar de usar el pool.

pub mod conductor_repository;
pub mod message_repository;
pub mod notification_repository;
pub mod user_repository;
