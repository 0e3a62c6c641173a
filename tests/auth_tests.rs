mod common;

use axum::http::{
    header::{ACCESS_CONTROL_ALLOW_ORIGIN, LOCATION, ORIGIN},
    HeaderValue, StatusCode,
};
use common::*;
use serde_json::Value;

#[tokio::test]
async fn test_index_is_public() {
    let app = spawn_app().await;
    let response = app.server.get("/").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert!(body["data"]["user"].is_null());
}

#[tokio::test]
async fn test_index_includes_navbar_when_authenticated() {
    let app = spawn_app().await;
    let token = app.root_token().await;

    let body: Value = app.get("/", &token).await.json();
    assert_eq!(body["data"]["user"]["email"], ROOT_EMAIL);
    assert!(body["data"]["navbar"]["total_count"].is_number());
}

#[tokio::test]
async fn test_register_persona_and_login() {
    let app = spawn_app().await;
    let id = app.register_persona("ana@example.com", "Ana").await;
    assert!(id > 0);

    let response = app
        .server
        .post("/login")
        .form(&[("email", "ana@example.com"), ("password", PASSWORD)])
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["data"]["user"]["role"], "regular");
    assert_eq!(body["data"]["user"]["user_type"], "Persona");
    assert!(body["data"]["user"].get("password_hash").is_none());
    assert!(response.maybe_cookie("session").is_some());
}

#[tokio::test]
async fn test_register_empresa_requires_company_name() {
    let app = spawn_app().await;

    let response = app
        .server
        .post("/register")
        .form(&[
            ("tipo_registro", "Empresa"),
            ("email", "acme@example.com"),
            ("password", PASSWORD),
            ("confirm_password", PASSWORD),
        ])
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = app
        .server
        .post("/register")
        .form(&[
            ("tipo_registro", "Empresa"),
            ("email", "acme@example.com"),
            ("password", PASSWORD),
            ("confirm_password", PASSWORD),
            ("nombre_empresa", "Acme"),
            ("whatsapp_empresa", "8888-0000"),
        ])
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let body: Value = response.json();
    assert_eq!(body["data"]["user"]["user_type"], "Empresa");
    assert_eq!(body["data"]["user"]["nombre_empresa"], "Acme");
    assert_eq!(body["data"]["user"]["whatsapp"], "8888-0000");
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let app = spawn_app().await;
    app.register_persona("dup@example.com", "Uno").await;

    let response = app
        .server
        .post("/register")
        .form(&[
            ("tipo_registro", "Persona"),
            ("email", "DUP@example.com"),
            ("password", PASSWORD),
            ("confirm_password", PASSWORD),
            ("nombre", "Dos"),
        ])
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    assert_eq!(app.count("SELECT COUNT(*) FROM users WHERE email = 'dup@example.com'").await, 1);
}

#[tokio::test]
async fn test_password_confirmation_mismatch() {
    let app = spawn_app().await;

    let response = app
        .server
        .post("/register")
        .form(&[
            ("tipo_registro", "Persona"),
            ("email", "x@example.com"),
            ("password", PASSWORD),
            ("confirm_password", "otra-cosa"),
            ("nombre", "X"),
        ])
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(app.count("SELECT COUNT(*) FROM users").await, 1);
}

#[tokio::test]
async fn test_registration_notifies_staff() {
    let app = spawn_app().await;
    app.register_persona("nuevo@example.com", "Nuevo").await;

    let count = app
        .count("SELECT COUNT(*) FROM notifications WHERE message = 'Nuevo registro: Nuevo (Persona)'")
        .await;
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let app = spawn_app().await;

    let response = app
        .server
        .post("/login")
        .form(&[("email", ROOT_EMAIL), ("password", "incorrecta")])
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let body: Value = response.json();
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_login_is_rate_limited() {
    let mut config = test_config();
    config.rate_limit_requests = 2;
    let app = spawn_app_with(config).await;

    for _ in 0..2 {
        let response = app
            .server
            .post("/login")
            .form(&[("email", ROOT_EMAIL), ("password", "mal")])
            .await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    }

    let response = app
        .server
        .post("/login")
        .form(&[("email", ROOT_EMAIL), ("password", ROOT_PASSWORD)])
        .await;
    assert_eq!(response.status_code(), StatusCode::TOO_MANY_REQUESTS);

    // El formulario no cuenta para el límite
    assert_eq!(app.server.get("/login").await.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_protected_routes_require_session() {
    let app = spawn_app().await;

    assert_eq!(app.server.get("/perfil").await.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        app.server.get("/notifications/navbar").await.status_code(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(app.get("/perfil", "basura").await.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profile_edit_and_password_change() {
    let app = spawn_app().await;
    let (_, token) = app.user_with_token("perfil@example.com", "Pili").await;

    let response = app
        .post_form(
            "/editar_perfil",
            &token,
            &[("nombre", "Pilar"), ("telefono", "2222-3333"), ("fecha_nacimiento", "1990-04-01")],
        )
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["data"]["nombre"], "Pilar");
    assert_eq!(body["data"]["fecha_nacimiento"], "1990-04-01");

    let response = app
        .post_form(
            "/cambiar_password",
            &token,
            &[
                ("current_password", "incorrecta"),
                ("new_password", "nueva123"),
                ("confirm_password", "nueva123"),
            ],
        )
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = app
        .post_form(
            "/cambiar_password",
            &token,
            &[
                ("current_password", PASSWORD),
                ("new_password", "nueva123"),
                ("confirm_password", "nueva123"),
            ],
        )
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    app.login("perfil@example.com", "nueva123").await;
}

#[tokio::test]
async fn test_delete_account_ends_session() {
    let app = spawn_app().await;
    let (_, token) = app.user_with_token("bye@example.com", "Bye").await;

    assert_eq!(app.post("/delete_account", &token).await.status_code(), StatusCode::OK);
    assert_eq!(app.get("/perfil", &token).await.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = spawn_app().await;
    let response = app.server.get("/no-existe").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_logged_in_user_is_sent_home_from_login_and_register() {
    let app = spawn_app().await;
    let (_, token) = app.user_with_token("ya@example.com", "Ya").await;

    let response = with_token(app.server.post("/login"), &token)
        .form(&[("email", "ya@example.com"), ("password", PASSWORD)])
        .await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(LOCATION).expect("location"), "/");
    assert!(response.maybe_cookie("session").is_none());

    let response = app
        .post_form(
            "/register",
            &token,
            &[
                ("tipo_registro", "Persona"),
                ("email", "otra@example.com"),
                ("password", PASSWORD),
                ("confirm_password", PASSWORD),
                ("nombre", "Otra"),
            ],
        )
        .await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(app.count("SELECT COUNT(*) FROM users WHERE email = 'otra@example.com'").await, 0);
}

#[tokio::test]
async fn test_staff_can_register_other_users() {
    let app = spawn_app().await;
    let root = app.root_token().await;

    let response = app
        .post_form(
            "/register",
            &root,
            &[
                ("tipo_registro", "Persona"),
                ("email", "alta@example.com"),
                ("password", PASSWORD),
                ("confirm_password", PASSWORD),
                ("nombre", "Alta"),
            ],
        )
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let body: Value = response.json();
    assert_eq!(body["message"], "Usuario registrado exitosamente");
}

#[tokio::test]
async fn test_cors_is_open_outside_production_only() {
    let origin = HeaderValue::from_static("https://otro.example.com");

    let app = spawn_app().await;
    let response = app.server.get("/").add_header(ORIGIN, origin.clone()).await;
    assert_eq!(
        response.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN),
        Some(&origin)
    );

    let mut config = test_config();
    config.environment = "production".to_string();
    let app = spawn_app_with(config).await;
    let response = app.server.get("/").add_header(ORIGIN, origin).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}
