use sqlx::SqlitePool;
use validator::Validate;

use crate::dto::common::{FormDescription, ListQuery, Pagination, PAGE_SIZE};
use crate::dto::conductor_dto::{ConductorDetail, ConductorForm, WorkersResponse};
use crate::repositories::conductor_repository::ConductorRepository;
use crate::services::conductor_form::{conductor_data, vehiculos_from_form};
use crate::utils::errors::{conflict_error, not_found_error, AppError};

const CONDUCTOR_FIELDS: [&str; 9] = [
    "nombre",
    "cedula",
    "licencia_tipo",
    "telefono_fijo",
    "movil",
    "email",
    "fecha_nacimiento",
    "foto",
    "cantidad_unidades",
];

const VEHICULO_FIELDS: [&str; 10] = [
    "marca",
    "anio",
    "capacidad",
    "placa",
    "tipo_servicio",
    "color",
    "tiene_poliza",
    "al_dia",
    "tiene_gravamenes",
    "detalle_gravamen",
];

pub struct ConductorController {
    pool: SqlitePool,
    repository: ConductorRepository,
}

impl ConductorController {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repository: ConductorRepository::new(pool.clone()),
            pool,
        }
    }

    pub fn form_description(action: String) -> FormDescription {
        FormDescription {
            repeated_fields: VEHICULO_FIELDS.to_vec(),
            ..FormDescription::new(action, CONDUCTOR_FIELDS.to_vec())
        }
    }

    pub async fn list(&self, query: &ListQuery) -> Result<WorkersResponse, AppError> {
        let (conductores, total) = self
            .repository
            .search(query.search(), PAGE_SIZE, query.offset())
            .await?;

        Ok(WorkersResponse {
            conductores,
            pagination: Pagination::new(query.page(), total),
            query: query.search().map(str::to_string),
        })
    }

    pub async fn detail(&self, id: i64) -> Result<ConductorDetail, AppError> {
        let conductor = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Colaborador", id))?;
        let vehiculos = self.repository.vehiculos_of(id).await?;

        Ok(ConductorDetail { conductor, vehiculos })
    }

    /// Alta del conductor y sus vehículos en una sola transacción
    pub async fn create(&self, form: ConductorForm) -> Result<ConductorDetail, AppError> {
        form.validate()?;
        let data = conductor_data(&form);
        let vehiculos = vehiculos_from_form(&form)?;

        if self.repository.cedula_exists(&data.cedula, None).await? {
            return Err(conflict_error("Colaborador", "cédula", &data.cedula));
        }

        let mut tx = self.pool.begin().await?;
        let conductor = ConductorRepository::insert(&mut tx, &data, vehiculos.len() as i64).await?;
        ConductorRepository::insert_vehiculos(&mut tx, conductor.id, &vehiculos).await?;
        tx.commit().await?;

        tracing::info!(
            conductor_id = conductor.id,
            vehiculos = vehiculos.len(),
            "Colaborador registrado"
        );

        self.detail(conductor.id).await
    }

    /// Reemplaza los datos del conductor y toda su lista de vehículos
    pub async fn update(&self, id: i64, form: ConductorForm) -> Result<ConductorDetail, AppError> {
        form.validate()?;

        if self.repository.find_by_id(id).await?.is_none() {
            return Err(not_found_error("Colaborador", id));
        }

        let data = conductor_data(&form);
        let vehiculos = vehiculos_from_form(&form)?;

        if self.repository.cedula_exists(&data.cedula, Some(id)).await? {
            return Err(conflict_error("Colaborador", "cédula", &data.cedula));
        }

        let mut tx = self.pool.begin().await?;
        ConductorRepository::update(&mut tx, id, &data, vehiculos.len() as i64).await?;
        let removed = ConductorRepository::delete_vehiculos(&mut tx, id).await?;
        ConductorRepository::insert_vehiculos(&mut tx, id, &vehiculos).await?;
        tx.commit().await?;

        tracing::info!(
            conductor_id = id,
            removed,
            inserted = vehiculos.len(),
            "Colaborador actualizado"
        );

        self.detail(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        let deleted = ConductorRepository::delete(&mut tx, id).await?;
        tx.commit().await?;

        if !deleted {
            return Err(not_found_error("Colaborador", id));
        }

        tracing::info!(conductor_id = id, "Colaborador eliminado");
        Ok(())
    }
}
