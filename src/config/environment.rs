//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use anyhow::{bail, Context, Result};
use std::env;
use std::str::FromStr;

/// Credenciales de un superusuario que se crea al arrancar si no existe
#[derive(Debug, Clone, PartialEq)]
pub struct SuperuserSeed {
    pub email: String,
    pub password: String,
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    /// Segundos de vida de una sesión normal
    pub jwt_expiration: u64,
    /// Segundos de vida de una sesión con "recordarme"
    pub jwt_remember_expiration: u64,
    pub bcrypt_cost: u32,
    pub cors_origins: Vec<String>,
    pub rate_limit_requests: u32,
    pub rate_limit_window: u64,
    pub superusers: Vec<SuperuserSeed>,
}

const DEV_JWT_SECRET: &str = "panel-admin-dev-secret";

impl EnvironmentConfig {
    /// Leer la configuración desde variables de entorno (con valores por defecto de desarrollo)
    pub fn from_env() -> Result<Self> {
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if environment == "production" => {
                bail!("JWT_SECRET must be set in production")
            }
            Err(_) => {
                tracing::warn!("JWT_SECRET no definido, usando secreto de desarrollo");
                DEV_JWT_SECRET.to_string()
            }
        };

        let superusers = match env::var("SUPERUSERS") {
            Ok(raw) => parse_superusers(&raw)?,
            Err(_) => Vec::new(),
        };

        let config = Self {
            port: parse_var("PORT", 3000)?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:db.db".to_string()),
            database_max_connections: parse_var("DATABASE_MAX_CONNECTIONS", 5)?,
            jwt_secret,
            jwt_expiration: parse_var("JWT_EXPIRATION", 86_400)?,
            jwt_remember_expiration: parse_var("JWT_REMEMBER_EXPIRATION", 30 * 86_400)?,
            bcrypt_cost: parse_var("BCRYPT_COST", bcrypt::DEFAULT_COST)?,
            cors_origins: env::var("CORS_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            rate_limit_requests: parse_var("RATE_LIMIT_REQUESTS", 20)?,
            rate_limit_window: parse_var("RATE_LIMIT_WINDOW", 60)?,
            superusers,
            environment,
        };
        config.validate()?;
        Ok(config)
    }

    /// Producción exige una lista explícita de orígenes CORS
    pub fn validate(&self) -> Result<()> {
        if self.is_production() && self.cors_origins.is_empty() {
            bail!("CORS_ORIGINS must be set in production");
        }
        Ok(())
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a valid value", name)),
        Err(_) => Ok(default),
    }
}

/// Formato: `email:password;email:password`
pub fn parse_superusers(raw: &str) -> Result<Vec<SuperuserSeed>> {
    raw.split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (email, password) = entry
                .split_once(':')
                .with_context(|| format!("SUPERUSERS entry '{}' must be email:password", entry))?;
            if email.trim().is_empty() || password.is_empty() {
                bail!("SUPERUSERS entry '{}' has an empty email or password", entry);
            }
            Ok(SuperuserSeed {
                email: email.trim().to_string(),
                password: password.to_string(),
            })
        })
        .collect()
}
