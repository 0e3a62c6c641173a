#![allow(dead_code)]

use axum::http::{header::AUTHORIZATION, HeaderValue, StatusCode};
use axum_test::{TestRequest, TestServer};
use serde_json::Value;
use sqlx::SqlitePool;

use panel_admin::config::{DatabaseConfig, EnvironmentConfig, SuperuserSeed};
use panel_admin::database::{schema::create_schema, seed::bootstrap_superusers};
use panel_admin::{create_app, AppState};

pub const ROOT_EMAIL: &str = "root@panel.test";
pub const ROOT_PASSWORD: &str = "rootpass";
pub const PASSWORD: &str = "secreto123";

pub struct TestApp {
    pub server: TestServer,
    pub pool: SqlitePool,
}

pub fn test_config() -> EnvironmentConfig {
    EnvironmentConfig {
        environment: "test".to_string(),
        port: 0,
        host: "127.0.0.1".to_string(),
        database_url: "sqlite::memory:".to_string(),
        database_max_connections: 1,
        jwt_secret: "test-secret".to_string(),
        jwt_expiration: 3600,
        jwt_remember_expiration: 7200,
        bcrypt_cost: 4,
        cors_origins: Vec::new(),
        rate_limit_requests: 1000,
        rate_limit_window: 60,
        superusers: vec![SuperuserSeed {
            email: ROOT_EMAIL.to_string(),
            password: ROOT_PASSWORD.to_string(),
        }],
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(test_config()).await
}

pub async fn spawn_app_with(config: EnvironmentConfig) -> TestApp {
    let pool = DatabaseConfig::in_memory()
        .create_test_pool()
        .await
        .expect("in-memory pool");
    create_schema(&pool).await.expect("schema");
    bootstrap_superusers(&pool, &config.superusers, config.bcrypt_cost)
        .await
        .expect("seed");

    let server = TestServer::new(create_app(AppState::new(pool.clone(), config)))
        .expect("test server");

    TestApp { server, pool }
}

pub fn with_token(request: TestRequest, token: &str) -> TestRequest {
    request.add_header(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", token)).expect("header"),
    )
}

impl TestApp {
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .server
            .post("/login")
            .form(&[("email", email), ("password", password)])
            .await;
        assert_eq!(response.status_code(), StatusCode::OK, "login de {}", email);

        let body: Value = response.json();
        body["data"]["token"]
            .as_str()
            .expect("token")
            .to_string()
    }

    pub async fn root_token(&self) -> String {
        self.login(ROOT_EMAIL, ROOT_PASSWORD).await
    }

    pub async fn register_persona(&self, email: &str, nombre: &str) -> i64 {
        self.register_persona_born(email, nombre, "").await
    }

    pub async fn register_persona_born(&self, email: &str, nombre: &str, fecha: &str) -> i64 {
        let response = self
            .server
            .post("/register")
            .form(&[
                ("tipo_registro", "Persona"),
                ("email", email),
                ("password", PASSWORD),
                ("confirm_password", PASSWORD),
                ("nombre", nombre),
                ("primer_apellido", "Prueba"),
                ("fecha_nacimiento", fecha),
            ])
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED, "registro de {}", email);

        let body: Value = response.json();
        body["data"]["user"]["id"].as_i64().expect("user id")
    }

    /// Registra y devuelve (id, token)
    pub async fn user_with_token(&self, email: &str, nombre: &str) -> (i64, String) {
        let id = self.register_persona(email, nombre).await;
        let token = self.login(email, PASSWORD).await;
        (id, token)
    }

    pub async fn get(&self, path: &str, token: &str) -> axum_test::TestResponse {
        with_token(self.server.get(path), token).await
    }

    pub async fn post_form<T: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        token: &str,
        form: &T,
    ) -> axum_test::TestResponse {
        with_token(self.server.post(path), token).form(form).await
    }

    pub async fn post(&self, path: &str, token: &str) -> axum_test::TestResponse {
        with_token(self.server.post(path), token).await
    }

    pub async fn count(&self, sql: &str) -> i64 {
        let (count,): (i64,) = sqlx::query_as(sql)
            .fetch_one(&self.pool)
            .await
            .expect("count query");
        count
    }
}
