//! Lectura del formulario de colaborador
//!
//! Convierte las listas paralelas de vehículos en filas `NewVehiculo`.
//! Se construye un vehículo por índice hasta `cantidad_unidades`, sin pasar
//! de la lista más larga recibida.

use crate::dto::conductor_dto::ConductorForm;
use crate::models::conductor::{ConductorData, NewVehiculo};
use crate::utils::errors::AppError;
use crate::utils::validation::{clean, parse_flag, parse_optional_date, validate_anio};

fn at(values: &[String], index: usize) -> Option<&str> {
    values.get(index).map(String::as_str)
}

/// Unidades declaradas; vacío, negativo o no numérico cuenta como cero
pub fn declared_units(form: &ConductorForm) -> usize {
    form.cantidad_unidades
        .as_deref()
        .and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|n| *n > 0)
        .map(|n| n as usize)
        .unwrap_or(0)
}

pub fn longest_list(form: &ConductorForm) -> usize {
    [
        form.marca.len(),
        form.anio.len(),
        form.capacidad.len(),
        form.placa.len(),
        form.tipo_servicio.len(),
        form.color.len(),
        form.tiene_poliza.len(),
        form.al_dia.len(),
        form.tiene_gravamenes.len(),
        form.detalle_gravamen.len(),
    ]
    .into_iter()
    .max()
    .unwrap_or(0)
}

pub fn conductor_data(form: &ConductorForm) -> ConductorData {
    ConductorData {
        nombre: form.nombre.trim().to_string(),
        cedula: form.cedula.trim().to_string(),
        licencia_tipo: clean(form.licencia_tipo.as_deref()),
        telefono_fijo: clean(form.telefono_fijo.as_deref()),
        movil: clean(form.movil.as_deref()),
        email: clean(form.email.as_deref()),
        fecha_nacimiento: parse_optional_date(form.fecha_nacimiento.as_deref()),
        foto: clean(form.foto.as_deref()),
    }
}

pub fn vehiculos_from_form(form: &ConductorForm) -> Result<Vec<NewVehiculo>, AppError> {
    let count = declared_units(form).min(longest_list(form));
    let mut vehiculos = Vec::with_capacity(count);

    for i in 0..count {
        let anio = clean(at(&form.anio, i));
        if let Some(ref value) = anio {
            if validate_anio(value).is_err() {
                return Err(AppError::BadRequest(format!(
                    "Año inválido en el vehículo {}: '{}'",
                    i + 1,
                    value
                )));
            }
        }

        let tiene_gravamenes = parse_flag(at(&form.tiene_gravamenes, i));

        vehiculos.push(NewVehiculo {
            marca: clean(at(&form.marca, i)),
            anio,
            capacidad: clean(at(&form.capacidad, i)),
            placa: clean(at(&form.placa, i)),
            tipo_servicio: clean(at(&form.tipo_servicio, i)),
            color: clean(at(&form.color, i)),
            tiene_poliza: parse_flag(at(&form.tiene_poliza, i)),
            al_dia: parse_flag(at(&form.al_dia, i)),
            tiene_gravamenes,
            detalle_gravamen: if tiene_gravamenes {
                clean(at(&form.detalle_gravamen, i))
            } else {
                None
            },
        });
    }

    Ok(vehiculos)
}
