use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::admin_clients::admin_clients;
use super::handlers::client_dashboard::client_dashboard;
use super::handlers::current_user::current_user;
use super::handlers::login::login;
use super::handlers::pages::index;
use super::handlers::pages::page;
use super::handlers::register::register;
use super::middleware::authenticate as auth_middleware;
use crate::domain::account::ports::AccountServicePort;
use crate::domain::dashboard::ports::DashboardServicePort;

/// Request-scoped dependencies. The storage handle lives inside the services.
#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServicePort>,
    pub dashboard_service: Arc<dyn DashboardServicePort>,
    pub templates_dir: Arc<PathBuf>,
}

pub fn create_router(
    account_service: Arc<dyn AccountServicePort>,
    dashboard_service: Arc<dyn DashboardServicePort>,
    templates_dir: PathBuf,
    static_dir: PathBuf,
) -> Router {
    let state = AppState {
        account_service,
        dashboard_service,
        templates_dir: Arc::new(templates_dir),
    };

    let public_routes = Router::new()
        .route("/token", post(login))
        .route("/api/register", post(register));

    let protected_routes = Router::new()
        .route("/api/users/me", get(current_user))
        .route("/api/client/dashboard", get(client_dashboard))
        .route("/api/admin/clients", get(admin_clients))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let page_routes = Router::new()
        .route("/", get(index))
        .route("/:filename", get(page))
        .nest_service("/static", ServeDir::new(static_dir));

    // Headers are left out of the span: they carry bearer tokens.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(page_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::http::header;
    use axum::http::StatusCode;
    use chrono::Utc;
    use mockall::mock;
    use tower::ServiceExt;

    use super::*;
    use crate::domain::account::errors::AccountError;
    use crate::domain::account::models::AccessToken;
    use crate::domain::account::models::EmailAddress;
    use crate::domain::account::models::ProvisionCommand;
    use crate::domain::account::models::ProvisionOutcome;
    use crate::domain::account::models::RegisterCommand;
    use crate::domain::account::models::Role;
    use crate::domain::account::models::User;
    use crate::domain::account::models::UserId;
    use crate::domain::dashboard::models::ClientDashboard;

    mock! {
        pub TestAccountService {}

        #[async_trait]
        impl AccountServicePort for TestAccountService {
            async fn register(&self, command: RegisterCommand) -> Result<User, AccountError>;
            async fn provision(&self, command: ProvisionCommand) -> Result<ProvisionOutcome, AccountError>;
            async fn login(&self, email: &str, password: &str) -> Result<AccessToken, AccountError>;
            async fn authorize(&self, token: &str) -> Result<User, AccountError>;
        }
    }

    mock! {
        pub TestDashboardService {}

        #[async_trait]
        impl DashboardServicePort for TestDashboardService {
            async fn client_dashboard(&self, caller: &User) -> Result<ClientDashboard, AccountError>;
            async fn client_list(&self, caller: &User) -> Result<Vec<User>, AccountError>;
        }
    }

    fn client_user() -> User {
        User {
            id: UserId::new(),
            email: EmailAddress::new("bob@x.com".to_string()).unwrap(),
            password_hash: "$argon2id$stub".to_string(),
            full_name: None,
            role: Role::Client,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    fn router(accounts: MockTestAccountService, dashboards: MockTestDashboardService) -> Router {
        create_router(
            Arc::new(accounts),
            Arc::new(dashboards),
            std::env::temp_dir().join("portal_router_test_templates_missing"),
            std::env::temp_dir().join("portal_router_test_static_missing"),
        )
    }

    #[tokio::test]
    async fn test_protected_route_without_token() {
        let mut accounts = MockTestAccountService::new();
        accounts.expect_authorize().never();

        let response = router(accounts, MockTestDashboardService::new())
            .oneshot(
                Request::builder()
                    .uri("/api/client/dashboard")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers().get(header::WWW_AUTHENTICATE).unwrap(), "Bearer");
    }

    #[tokio::test]
    async fn test_client_denied_admin_route() {
        let mut accounts = MockTestAccountService::new();
        accounts
            .expect_authorize()
            .withf(|token| token == "client-token")
            .times(1)
            .returning(|_| Ok(client_user()));

        let mut dashboards = MockTestDashboardService::new();
        dashboards.expect_client_list().times(1).returning(|_| {
            Err(AccountError::Forbidden {
                required: Role::Admin,
                actual: Role::Client,
            })
        });

        let response = router(accounts, dashboards)
            .oneshot(
                Request::builder()
                    .uri("/api/admin/clients")
                    .header(header::AUTHORIZATION, "Bearer client-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(response.headers().get(header::WWW_AUTHENTICATE).is_none());
    }

    #[tokio::test]
    async fn test_page_outside_templates_rejected() {
        let response = router(MockTestAccountService::new(), MockTestDashboardService::new())
            .oneshot(
                Request::builder()
                    .uri("/..%2Fetc%2Fpasswd")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_page() {
        let response = router(MockTestAccountService::new(), MockTestDashboardService::new())
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
