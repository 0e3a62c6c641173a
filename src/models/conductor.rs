//! Modelo de Conductor y Vehiculo
//!
//! Registro de colaboradores: un conductor es dueño de 0..N vehículos.
//! Los vehículos se borran en cascada con su conductor.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Conductor {
    pub id: i64,
    pub nombre: String,
    pub cedula: String,
    pub licencia_tipo: Option<String>,
    pub telefono_fijo: Option<String>,
    pub movil: Option<String>,
    pub email: Option<String>,
    pub fecha_nacimiento: Option<NaiveDate>,
    /// URL o imagen en base64
    pub foto: Option<String>,
    pub cantidad_unidades: i64,
    pub fecha_registro: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Vehiculo {
    pub id: i64,
    pub conductor_id: i64,
    pub marca: Option<String>,
    pub anio: Option<String>,
    pub capacidad: Option<String>,
    pub placa: Option<String>,
    pub tipo_servicio: Option<String>,
    pub color: Option<String>,
    pub tiene_poliza: bool,
    pub al_dia: bool,
    pub tiene_gravamenes: bool,
    pub detalle_gravamen: Option<String>,
}

/// Datos del conductor tal como se insertan o actualizan
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConductorData {
    pub nombre: String,
    pub cedula: String,
    pub licencia_tipo: Option<String>,
    pub telefono_fijo: Option<String>,
    pub movil: Option<String>,
    pub email: Option<String>,
    pub fecha_nacimiento: Option<NaiveDate>,
    pub foto: Option<String>,
}

/// Vehículo aún sin conductor asignado
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewVehiculo {
    pub marca: Option<String>,
    pub anio: Option<String>,
    pub capacidad: Option<String>,
    pub placa: Option<String>,
    pub tipo_servicio: Option<String>,
    pub color: Option<String>,
    pub tiene_poliza: bool,
    pub al_dia: bool,
    pub tiene_gravamenes: bool,
    pub detalle_gravamen: Option<String>,
}

/// Fila del listado de colaboradores
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ConductorSummary {
    pub id: i64,
    pub nombre: String,
    pub cedula: String,
    pub movil: Option<String>,
    pub email: Option<String>,
    pub cantidad_unidades: i64,
    pub vehiculos_registrados: i64,
    pub fecha_registro: DateTime<Utc>,
}
