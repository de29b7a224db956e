//! Unit tests for Auth crate

#[cfg(test)]
mod support {
    use platform::password::HashCost;

    use crate::application::config::{AuthConfig, AuthServices, SigningSecret};

    pub fn services() -> AuthServices {
        let mut config = AuthConfig::development();
        config.hash_cost = HashCost::minimal();
        config.hash_concurrency = 4;
        AuthServices::new(config).unwrap()
    }

    /// Production cookie settings, cheap hashing
    pub fn production_services() -> AuthServices {
        let secret = SigningSecret::new(b"router-test-secret".to_vec()).unwrap();
        let mut config = AuthConfig::new(secret);
        config.hash_cost = HashCost::minimal();
        AuthServices::new(config).unwrap()
    }
}

#[cfg(test)]
mod use_case_tests {
    use std::sync::Arc;

    use super::support::services;
    use crate::application::{
        GetProfileUseCase, SignInInput, SignInUseCase, SignUpInput, SignUpUseCase,
    };
    use crate::domain::repository::UserRepository;
    use crate::domain::value_object::email::Email;
    use crate::error::AuthError;
    use crate::infra::memory::InMemoryUserRepository;

    fn sign_up_input(email: &str, password: &str) -> SignUpInput {
        SignUpInput {
            email: email.to_string(),
            password: password.to_string(),
            first_name: Some("Alice".to_string()),
            last_name: None,
            phone: None,
        }
    }

    #[tokio::test]
    async fn test_sign_up_stores_hash_not_password() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let services = services();
        let use_case = SignUpUseCase::new(repo.clone(), services.hasher.clone());

        let output = use_case
            .execute(sign_up_input("Alice@Example.com", "pw123"))
            .await
            .unwrap();

        let user = repo.find_by_id(&output.user_id).await.unwrap().unwrap();
        assert_eq!(user.email.as_str(), "alice@example.com");
        assert_eq!(user.profile.first_name.as_str(), "Alice");
        assert_eq!(user.profile.phone.as_str(), "");
        assert!(user.password.as_phc_string().starts_with("$argon2id$"));
        assert!(!user.password.as_phc_string().contains("pw123"));
    }

    #[tokio::test]
    async fn test_duplicate_sign_up_keeps_first_hash() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let services = services();
        let use_case = SignUpUseCase::new(repo.clone(), services.hasher.clone());

        use_case
            .execute(sign_up_input("alice@example.com", "first"))
            .await
            .unwrap();
        let email = Email::new("alice@example.com").unwrap();
        let before = repo.find_by_email(&email).await.unwrap().unwrap();

        let result = use_case
            .execute(sign_up_input("ALICE@example.com", "second"))
            .await;
        assert!(matches!(result, Err(AuthError::EmailTaken)));

        let after = repo.find_by_email(&email).await.unwrap().unwrap();
        assert_eq!(before.password, after.password);
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_sign_up_validation() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let services = services();
        let use_case = SignUpUseCase::new(repo.clone(), services.hasher.clone());

        for input in [
            sign_up_input("alice@example.com", ""),
            sign_up_input("not-an-email", "pw123"),
            SignUpInput {
                phone: Some("9".repeat(101)),
                ..sign_up_input("alice@example.com", "pw123")
            },
        ] {
            assert!(matches!(
                use_case.execute(input).await,
                Err(AuthError::Validation(_))
            ));
        }
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_sign_in_success_and_failures() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let services = services();
        SignUpUseCase::new(repo.clone(), services.hasher.clone())
            .execute(sign_up_input("alice@example.com", "pw123"))
            .await
            .unwrap();

        let sign_in = SignInUseCase::new(
            repo.clone(),
            services.hasher.clone(),
            services.issuer.clone(),
        );
        let attempt = |email: &str, password: &str| SignInInput {
            email: email.to_string(),
            password: password.to_string(),
        };

        let output = sign_in
            .execute(attempt(" ALICE@example.com", "pw123"))
            .await
            .unwrap();
        let claims = services.verifier.verify(&output.token.token).unwrap();
        assert_eq!(claims.user_id(), output.user_id);

        for (email, password) in [
            ("alice@example.com", "pw124"),
            ("bob@example.com", "pw123"),
            ("not-an-email", "pw123"),
            ("alice@example.com", ""),
        ] {
            let result = sign_in.execute(attempt(email, password)).await;
            assert!(
                matches!(result, Err(AuthError::InvalidCredentials)),
                "{email}/{password} should fail as invalid credentials"
            );
        }
    }

    #[tokio::test]
    async fn test_profile_of_removed_account() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let services = services();
        let output = SignUpUseCase::new(repo.clone(), services.hasher.clone())
            .execute(sign_up_input("alice@example.com", "pw123"))
            .await
            .unwrap();

        let use_case = GetProfileUseCase::new(repo.clone());
        assert!(use_case.execute(output.user_id).await.is_ok());

        repo.remove(&output.user_id).await;
        assert!(matches!(
            use_case.execute(output.user_id).await,
            Err(AuthError::AccountGone)
        ));
    }
}

#[cfg(test)]
mod router_tests {
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum::routing::get;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::support::{production_services, services};
    use crate::application::config::AuthServices;
    use crate::infra::memory::InMemoryUserRepository;
    use crate::presentation::middleware::CurrentUser;
    use crate::presentation::router::auth_router_generic;

    fn app() -> (Router, AuthServices) {
        let services = services();
        let router = auth_router_generic(InMemoryUserRepository::new(), services.clone());
        (router, services)
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn register(app: &Router, email: &str, password: &str) -> StatusCode {
        app.clone()
            .oneshot(json_request(
                "POST",
                "/register",
                json!({"email": email, "password": password, "firstname": "Alice"}),
            ))
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_register_json_and_form() {
        let (app, _) = app();

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/register",
                json!({"email": "alice@example.com", "password": "pw123"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert!(body["userId"].is_string());

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/register")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(
                        "firstname=Bob&lastname=Smith&phone=555&email=bob%40example.com&password=pw",
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_register_rejects_bad_input() {
        let (app, _) = app();

        assert_eq!(register(&app, "alice@example.com", "").await, StatusCode::BAD_REQUEST);
        assert_eq!(register(&app, "nope", "pw123").await, StatusCode::BAD_REQUEST);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/register")
                    .header(header::CONTENT_TYPE, "text/plain")
                    .body(Body::from("email=alice@example.com"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["status"], 400);
    }

    #[tokio::test]
    async fn test_duplicate_register_conflicts() {
        let (app, _) = app();
        assert_eq!(register(&app, "alice@example.com", "pw123").await, StatusCode::CREATED);
        assert_eq!(register(&app, "alice@example.com", "other").await, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_login_sets_body_token_and_cookie() {
        let (app, services) = app();
        register(&app, "alice@example.com", "pw123").await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/login",
                json!({"email": "alice@example.com", "password": "pw123"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        let body = body_json(response).await;
        let token = body["token"].as_str().unwrap();

        assert_eq!(body["tokenType"], "Bearer");
        assert_eq!(body["expiresIn"], 1800);
        assert!(cookie.starts_with(&format!("jwt-token={token}")));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("Max-Age=1800"));
        assert!(services.verifier.verify(token).is_ok());
    }

    #[tokio::test]
    async fn test_login_cookie_is_secure_by_default() {
        let services = production_services();
        let app = auth_router_generic(InMemoryUserRepository::new(), services.clone());
        register(&app, "alice@example.com", "pw123").await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/login",
                json!({"email": "alice@example.com", "password": "pw123"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        let body = body_json(response).await;
        let claims = services
            .verifier
            .verify(body["token"].as_str().unwrap())
            .unwrap();
        let expires = claims
            .expires_at()
            .unwrap()
            .format("%a, %d %b %Y %H:%M:%S GMT")
            .to_string();

        assert!(cookie.contains("; Secure"), "{cookie}");
        assert!(cookie.contains("; HttpOnly"));
        assert!(cookie.contains("; SameSite=Strict"));
        assert!(cookie.contains("; Path=/"));
        assert!(cookie.contains("; Max-Age=1800"));
        assert!(cookie.contains(&format!("; Expires={expires}")), "{cookie}");
    }

    #[tokio::test]
    async fn test_login_failures_are_identical() {
        let (app, _) = app();
        register(&app, "alice@example.com", "pw123").await;

        let mut bodies = Vec::new();
        for (email, password) in [
            ("alice@example.com", "pw124"),
            ("nobody@example.com", "pw123"),
            ("garbage", "pw123"),
        ] {
            let response = app
                .clone()
                .oneshot(json_request(
                    "POST",
                    "/login",
                    json!({"email": email, "password": password}),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            assert!(response.headers().get(header::SET_COOKIE).is_none());
            bodies.push(body_json(response).await);
        }

        assert_eq!(bodies[0]["detail"], "Invalid email or password");
        assert!(bodies.iter().all(|b| b == &bodies[0]));
    }

    #[tokio::test]
    async fn test_profile_requires_token() {
        let (app, _) = app();

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/profile").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers().get(header::WWW_AUTHENTICATE).unwrap(), "Bearer");
    }

    #[tokio::test]
    async fn test_profile_with_bearer_and_cookie() {
        let (app, _) = app();
        register(&app, "alice@example.com", "pw123").await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/login",
                json!({"email": "alice@example.com", "password": "pw123"}),
            ))
            .await
            .unwrap();
        let token = body_json(response).await["token"]
            .as_str()
            .unwrap()
            .to_string();

        for (name, value) in [
            (header::AUTHORIZATION, format!("Bearer {token}")),
            (header::COOKIE, format!("jwt-token={token}")),
        ] {
            let response = app
                .clone()
                .oneshot(
                    Request::builder()
                        .uri("/profile")
                        .header(name, value)
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);

            let body = body_json(response).await;
            assert_eq!(body["email"], "alice@example.com");
            assert_eq!(body["firstName"], "Alice");
            assert!(body.get("password").is_none());
            assert!(body.get("passwordHash").is_none());
        }
    }

    #[tokio::test]
    async fn test_logout_clears_cookie() {
        let (app, _) = app();

        let response = app
            .oneshot(Request::builder().uri("/logout").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let cookie = response.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cookie.starts_with("jwt-token=;"));
        assert!(cookie.contains("Max-Age=0"));
        assert!(cookie.contains("Expires=Thu, 01 Jan 1970 00:00:00 GMT"));
    }

    #[tokio::test]
    async fn test_handler_outside_gate_fails_closed() {
        async fn leaky(user: CurrentUser) -> String {
            user.user_id().to_string()
        }
        let app: Router = Router::new().route("/leaky", get(leaky));

        let response = app
            .oneshot(Request::builder().uri("/leaky").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
