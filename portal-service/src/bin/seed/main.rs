use std::sync::Arc;

use auth::Authenticator;
use portal_service::config::Config;
use portal_service::domain::account::models::EmailAddress;
use portal_service::domain::account::models::ProfileDetails;
use portal_service::domain::account::models::ProjectStatus;
use portal_service::domain::account::models::ProvisionCommand;
use portal_service::domain::account::models::ProvisionOutcome;
use portal_service::domain::account::models::Role;
use portal_service::domain::account::ports::AccountServicePort;
use portal_service::domain::account::service::AccountService;
use portal_service::outbound::repositories::PostgresAccountRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Provisions the demo admin and client accounts. Safe to run repeatedly.
#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portal_service=info,portal_seed=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;

    let pg_pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&config.database.url)
        .await?;
    sqlx::migrate!("./migrations").run(&pg_pool).await?;

    let service = AccountService::new(
        Arc::new(PostgresAccountRepository::new(pg_pool)),
        Arc::new(Authenticator::new(config.jwt.secret.as_bytes())),
        chrono::Duration::minutes(config.jwt.expiration_minutes),
    );

    tracing::info!("Seeding database");

    let accounts = [
        ProvisionCommand {
            email: EmailAddress::new("admin@venturemond.com".to_string())?,
            password: "admin123".to_string(),
            full_name: Some("Admin User".to_string()),
            role: Role::Admin,
            profile: None,
        },
        ProvisionCommand {
            email: EmailAddress::new("client@venturemond.com".to_string())?,
            password: "client123".to_string(),
            full_name: Some("Client User".to_string()),
            role: Role::Client,
            profile: Some(ProfileDetails {
                company_name: "Venturemond Demo Corp".to_string(),
                project_name: "Dashboard Redesign".to_string(),
                budget: "$15k".to_string(),
                status: ProjectStatus::Active,
            }),
        },
    ];

    for command in accounts {
        match service.provision(command).await? {
            ProvisionOutcome::Created(user) => {
                tracing::info!(email = %user.email, role = %user.role, "Account created")
            }
            ProvisionOutcome::AlreadyExists(email) => {
                tracing::info!(email = %email, "Account already exists, skipped")
            }
        }
    }

    tracing::info!("Seeding complete");
    Ok(())
}
