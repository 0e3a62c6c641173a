use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::common::Pagination;
use crate::models::conductor::{Conductor, ConductorSummary, Vehiculo};
use crate::utils::validation::{validate_cedula, validate_not_empty};

/// Formulario de alta/edición de colaborador.
///
/// Los campos de vehículo llegan repetidos (`marca=A&marca=B`) y se alinean
/// por índice.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ConductorForm {
    #[validate(custom = "validate_not_empty")]
    pub nombre: String,
    #[validate(custom = "validate_cedula")]
    pub cedula: String,
    pub licencia_tipo: Option<String>,
    pub telefono_fijo: Option<String>,
    pub movil: Option<String>,
    pub email: Option<String>,
    pub fecha_nacimiento: Option<String>,
    pub foto: Option<String>,
    pub cantidad_unidades: Option<String>,

    #[serde(default)]
    pub marca: Vec<String>,
    #[serde(default)]
    pub anio: Vec<String>,
    #[serde(default)]
    pub capacidad: Vec<String>,
    #[serde(default)]
    pub placa: Vec<String>,
    #[serde(default)]
    pub tipo_servicio: Vec<String>,
    #[serde(default)]
    pub color: Vec<String>,
    #[serde(default)]
    pub tiene_poliza: Vec<String>,
    #[serde(default)]
    pub al_dia: Vec<String>,
    #[serde(default)]
    pub tiene_gravamenes: Vec<String>,
    #[serde(default)]
    pub detalle_gravamen: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ConductorDetail {
    pub conductor: Conductor,
    pub vehiculos: Vec<Vehiculo>,
}

#[derive(Debug, Serialize)]
pub struct WorkersResponse {
    pub conductores: Vec<ConductorSummary>,
    pub pagination: Pagination,
    pub query: Option<String>,
}
