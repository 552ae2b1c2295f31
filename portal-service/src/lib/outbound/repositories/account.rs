use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::ClientProfile;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::NewAccount;
use crate::domain::account::models::ProfileId;
use crate::domain::account::models::Role;
use crate::domain::account::models::User;
use crate::domain::account::models::UserId;
use crate::domain::account::ports::AccountRepository;

/// Credential store backed by a Postgres pool.
///
/// Every call checks a connection out of the pool and returns it when the
/// call ends, on success and on error alike.
pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    password_hash: String,
    full_name: Option<String>,
    role: String,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = AccountError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(row.id),
            email: EmailAddress::new(row.email)?,
            password_hash: row.password_hash,
            full_name: row.full_name,
            role: row
                .role
                .parse()
                .map_err(|e: AccountError| AccountError::DatabaseError(e.to_string()))?,
            is_active: row.is_active,
            created_at: row.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    id: Uuid,
    user_id: Uuid,
    company_name: String,
    project_name: String,
    budget: String,
    status: String,
}

impl TryFrom<ProfileRow> for ClientProfile {
    type Error = AccountError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        Ok(ClientProfile {
            id: ProfileId(row.id),
            user_id: UserId(row.user_id),
            company_name: row.company_name,
            project_name: row.project_name,
            budget: row.budget,
            status: row.status.parse()?,
        })
    }
}

fn map_insert_error(e: sqlx::Error, email: &EmailAddress) -> AccountError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() && db_err.constraint() == Some("users_email_key") {
            return AccountError::EmailAlreadyRegistered(email.to_string());
        }
    }
    AccountError::DatabaseError(e.to_string())
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create(&self, account: NewAccount) -> Result<User, AccountError> {
        let NewAccount { user, profile } = account;

        let mut transaction = self
            .pool
            .begin()
            .await
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, full_name, role, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.id.0)
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(&user.full_name)
        .bind(user.role.as_str())
        .bind(user.is_active)
        .bind(user.created_at)
        .execute(&mut *transaction)
        .await
        .map_err(|e| map_insert_error(e, &user.email))?;

        if let Some(profile) = &profile {
            sqlx::query(
                r#"
                INSERT INTO client_profiles (id, user_id, company_name, project_name, budget, status)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(profile.id.0)
            .bind(profile.user_id.0)
            .bind(&profile.company_name)
            .bind(&profile.project_name)
            .bind(&profile.budget)
            .bind(profile.status.as_str())
            .execute(&mut *transaction)
            .await
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;
        }

        // Dropping the transaction on any early return above rolls it back.
        transaction
            .commit()
            .await
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccountError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash, full_name, role, is_active, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(User::try_from).transpose()
    }

    async fn find_profile(
        &self,
        user_id: &UserId,
    ) -> Result<Option<ClientProfile>, AccountError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT id, user_id, company_name, project_name, budget, status
            FROM client_profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(ClientProfile::try_from).transpose()
    }

    async fn list_by_role(&self, role: Role) -> Result<Vec<User>, AccountError> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash, full_name, role, is_active, created_at
            FROM users
            WHERE role = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(role.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(User::try_from).collect()
    }
}
