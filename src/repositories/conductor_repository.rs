use crate::models::conductor::{Conductor, ConductorData, ConductorSummary, NewVehiculo, Vehiculo};
use crate::utils::errors::AppError;
use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};

pub struct ConductorRepository {
    pool: SqlitePool,
}

impl ConductorRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        conn: &mut SqliteConnection,
        data: &ConductorData,
        cantidad_unidades: i64,
    ) -> Result<Conductor, AppError> {
        let conductor = sqlx::query_as::<_, Conductor>(
            r#"
            INSERT INTO conductores (
                nombre, cedula, licencia_tipo, telefono_fijo, movil, email,
                fecha_nacimiento, foto, cantidad_unidades, fecha_registro
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&data.nombre)
        .bind(&data.cedula)
        .bind(&data.licencia_tipo)
        .bind(&data.telefono_fijo)
        .bind(&data.movil)
        .bind(&data.email)
        .bind(data.fecha_nacimiento)
        .bind(&data.foto)
        .bind(cantidad_unidades)
        .bind(Utc::now())
        .fetch_one(&mut *conn)
        .await?;

        Ok(conductor)
    }

    pub async fn update(
        conn: &mut SqliteConnection,
        id: i64,
        data: &ConductorData,
        cantidad_unidades: i64,
    ) -> Result<Conductor, AppError> {
        let conductor = sqlx::query_as::<_, Conductor>(
            r#"
            UPDATE conductores
            SET nombre = ?, cedula = ?, licencia_tipo = ?, telefono_fijo = ?, movil = ?,
                email = ?, fecha_nacimiento = ?, foto = COALESCE(?, foto), cantidad_unidades = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&data.nombre)
        .bind(&data.cedula)
        .bind(&data.licencia_tipo)
        .bind(&data.telefono_fijo)
        .bind(&data.movil)
        .bind(&data.email)
        .bind(data.fecha_nacimiento)
        .bind(&data.foto)
        .bind(cantidad_unidades)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| AppError::NotFound("Colaborador no encontrado".to_string()))?;

        Ok(conductor)
    }

    pub async fn insert_vehiculos(
        conn: &mut SqliteConnection,
        conductor_id: i64,
        vehiculos: &[NewVehiculo],
    ) -> Result<(), AppError> {
        for v in vehiculos {
            sqlx::query(
                r#"
                INSERT INTO vehiculos (
                    conductor_id, marca, anio, capacidad, placa, tipo_servicio, color,
                    tiene_poliza, al_dia, tiene_gravamenes, detalle_gravamen
                )
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(conductor_id)
            .bind(&v.marca)
            .bind(&v.anio)
            .bind(&v.capacidad)
            .bind(&v.placa)
            .bind(&v.tipo_servicio)
            .bind(&v.color)
            .bind(v.tiene_poliza)
            .bind(v.al_dia)
            .bind(v.tiene_gravamenes)
            .bind(&v.detalle_gravamen)
            .execute(&mut *conn)
            .await?;
        }

        Ok(())
    }

    pub async fn delete_vehiculos(conn: &mut SqliteConnection, conductor_id: i64) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM vehiculos WHERE conductor_id = ?")
            .bind(conductor_id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM conductores WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Conductor>, AppError> {
        let conductor = sqlx::query_as::<_, Conductor>("SELECT * FROM conductores WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(conductor)
    }

    pub async fn vehiculos_of(&self, conductor_id: i64) -> Result<Vec<Vehiculo>, AppError> {
        let vehiculos = sqlx::query_as::<_, Vehiculo>(
            "SELECT * FROM vehiculos WHERE conductor_id = ? ORDER BY id",
        )
        .bind(conductor_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehiculos)
    }

    pub async fn cedula_exists(&self, cedula: &str, except_id: Option<i64>) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM conductores WHERE cedula = ? AND (? IS NULL OR id <> ?))",
        )
        .bind(cedula)
        .bind(except_id)
        .bind(except_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM conductores")
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }

    /// Listado paginado con búsqueda por nombre, cédula o placa
    pub async fn search(
        &self,
        query: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<ConductorSummary>, i64), AppError> {
        let pattern = query
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(|q| format!("%{}%", q));

        const FILTER: &str = r#"
            ?1 IS NULL
            OR c.nombre LIKE ?1 OR c.cedula LIKE ?1 OR c.movil LIKE ?1 OR c.email LIKE ?1
            OR EXISTS (SELECT 1 FROM vehiculos v2 WHERE v2.conductor_id = c.id AND v2.placa LIKE ?1)
        "#;

        let rows = sqlx::query_as::<_, ConductorSummary>(&format!(
            r#"
            SELECT c.id, c.nombre, c.cedula, c.movil, c.email, c.cantidad_unidades,
                   (SELECT COUNT(*) FROM vehiculos v WHERE v.conductor_id = c.id) AS vehiculos_registrados,
                   c.fecha_registro
            FROM conductores c
            WHERE {}
            ORDER BY c.fecha_registro DESC, c.id DESC
            LIMIT ?2 OFFSET ?3
            "#,
            FILTER
        ))
        .bind(&pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: (i64,) = sqlx::query_as(&format!(
            "SELECT COUNT(*) FROM conductores c WHERE {}",
            FILTER
        ))
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await?;

        Ok((rows, total.0))
    }
}
