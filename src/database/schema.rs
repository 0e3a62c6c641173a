//! Esquema relacional
//!
//! Crea las tablas que falten al arrancar. No versiona cambios: una columna
//! nueva sobre una base existente requiere intervención manual.

use sqlx::SqlitePool;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        email TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        role TEXT NOT NULL DEFAULT 'regular',
        user_type TEXT NOT NULL DEFAULT 'Persona',
        avatar TEXT DEFAULT 'default.jpg',
        nombre TEXT,
        primer_apellido TEXT,
        segundo_apellido TEXT,
        nombre_empresa TEXT,
        encargado TEXT,
        contacto TEXT,
        telefono_fijo TEXT,
        direccion TEXT,
        otros_detalles TEXT,
        telefono TEXT,
        movil TEXT,
        whatsapp TEXT,
        fecha_nacimiento DATE,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS messages (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        recipient_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        sender_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        subject TEXT NOT NULL,
        body TEXT NOT NULL,
        is_read BOOLEAN NOT NULL DEFAULT 0,
        is_hidden BOOLEAN NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_messages_recipient ON messages (recipient_id, is_read)",
    r#"
    CREATE TABLE IF NOT EXISTS notifications (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        message TEXT NOT NULL,
        is_read BOOLEAN NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_notifications_user ON notifications (user_id, is_read)",
    r#"
    CREATE TABLE IF NOT EXISTS conductores (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        nombre TEXT NOT NULL,
        cedula TEXT NOT NULL UNIQUE,
        licencia_tipo TEXT,
        telefono_fijo TEXT,
        movil TEXT,
        email TEXT,
        fecha_nacimiento DATE,
        foto TEXT,
        cantidad_unidades INTEGER NOT NULL DEFAULT 0,
        fecha_registro TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS vehiculos (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        conductor_id INTEGER NOT NULL REFERENCES conductores(id) ON DELETE CASCADE,
        marca TEXT,
        anio TEXT,
        capacidad TEXT,
        placa TEXT UNIQUE,
        tipo_servicio TEXT,
        color TEXT,
        tiene_poliza BOOLEAN NOT NULL DEFAULT 0,
        al_dia BOOLEAN NOT NULL DEFAULT 0,
        tiene_gravamenes BOOLEAN NOT NULL DEFAULT 0,
        detalle_gravamen TEXT
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_vehiculos_conductor ON vehiculos (conductor_id)",
];

/// Crear tablas e índices faltantes
pub async fn create_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    for statement in SCHEMA {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;

    tracing::info!("Esquema de base de datos verificado ({} sentencias)", SCHEMA.len());
    Ok(())
}
