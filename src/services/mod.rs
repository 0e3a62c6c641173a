//! Servicios del sistema
//!
//! Lógica que no es un CRUD directo: el resumen del navbar, los avisos de
//! cumpleaños y la lectura del formulario de colaboradores.

pub mod birthday_service;
pub mod conductor_form;
pub mod navbar_service;
