//! Superusuarios iniciales
//!
//! Los superusuarios configurados se crean al arrancar si su email aún no
//! existe. Una cuenta existente no se modifica.

use sqlx::SqlitePool;

use crate::config::environment::SuperuserSeed;
use crate::models::user::{NewUser, Role};
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::AppError;
use crate::utils::password::hash_password;

/// Devuelve cuántas cuentas se crearon
pub async fn bootstrap_superusers(
    pool: &SqlitePool,
    seeds: &[SuperuserSeed],
    bcrypt_cost: u32,
) -> Result<usize, AppError> {
    let repository = UserRepository::new(pool.clone());
    let mut created = 0;

    for seed in seeds {
        // El login busca siempre en minúsculas
        let email = seed.email.trim().to_lowercase();
        if repository.email_exists(&email).await? {
            continue;
        }

        let new_user = NewUser {
            email: email.clone(),
            password_hash: hash_password(&seed.password, bcrypt_cost)?,
            role: Some(Role::Superuser),
            nombre: Some("Administrador".to_string()),
            ..Default::default()
        };

        let mut conn = pool.acquire().await?;
        UserRepository::insert(&mut conn, &new_user).await?;
        created += 1;

        tracing::info!("Superusuario creado: {}", email);
    }

    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::database::schema::create_schema;

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let pool = DatabaseConfig::in_memory().create_test_pool().await.unwrap();
        create_schema(&pool).await.unwrap();

        let seeds = vec![SuperuserSeed {
            email: " Root@Example.com".into(),
            password: "secreto".into(),
        }];

        assert_eq!(bootstrap_superusers(&pool, &seeds, 4).await.unwrap(), 1);
        assert_eq!(bootstrap_superusers(&pool, &seeds, 4).await.unwrap(), 0);

        let user = UserRepository::new(pool.clone())
            .find_by_email("root@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.role, Role::Superuser);
    }

    #[tokio::test]
    async fn test_mixed_case_seed_matches_existing_account() {
        let pool = DatabaseConfig::in_memory().create_test_pool().await.unwrap();
        create_schema(&pool).await.unwrap();

        let lower = vec![SuperuserSeed {
            email: "admin@example.com".into(),
            password: "secreto".into(),
        }];
        let upper = vec![SuperuserSeed {
            email: "ADMIN@example.com".into(),
            password: "secreto".into(),
        }];

        assert_eq!(bootstrap_superusers(&pool, &lower, 4).await.unwrap(), 1);
        assert_eq!(bootstrap_superusers(&pool, &upper, 4).await.unwrap(), 0);
    }
}
