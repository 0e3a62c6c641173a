//! Módulo de base de datos
//!
//! Maneja la conexión, el esquema y los datos iniciales en SQLite.

pub mod connection;
pub mod schema;
pub mod seed;

pub use connection::connect;
