use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::Claims;
use chrono::Duration;
use chrono::Utc;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::AccessToken;
use crate::domain::account::models::ClientProfile;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::NewAccount;
use crate::domain::account::models::ProfileId;
use crate::domain::account::models::ProvisionCommand;
use crate::domain::account::models::ProvisionOutcome;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::models::Role;
use crate::domain::account::models::User;
use crate::domain::account::models::UserId;
use crate::domain::account::ports::AccountRepository;
use crate::domain::account::ports::AccountServicePort;

/// Domain service implementation for registration, login and token
/// resolution.
pub struct AccountService<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
    authenticator: Arc<Authenticator>,
    token_ttl: Duration,
}

impl<AR> AccountService<AR>
where
    AR: AccountRepository,
{
    /// # Arguments
    /// * `repository` - Credential store
    /// * `authenticator` - Password hasher and token signer
    /// * `token_ttl` - Lifetime of issued access tokens
    pub fn new(repository: Arc<AR>, authenticator: Arc<Authenticator>, token_ttl: Duration) -> Self {
        Self {
            repository,
            authenticator,
            token_ttl,
        }
    }

    fn new_user(
        &self,
        email: EmailAddress,
        password: &str,
        full_name: Option<String>,
        role: Role,
    ) -> Result<User, AccountError> {
        let password_hash = self
            .authenticator
            .hash_password(password)
            .map_err(|e| AccountError::PasswordHashing(e.to_string()))?;

        Ok(User {
            id: UserId::new(),
            email,
            password_hash,
            full_name,
            role,
            is_active: true,
            created_at: Utc::now(),
        })
    }

    async fn ensure_email_available(&self, email: &EmailAddress) -> Result<(), AccountError> {
        match self.repository.find_by_email(email.as_str()).await? {
            Some(_) => Err(AccountError::EmailAlreadyRegistered(email.to_string())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl<AR> AccountServicePort for AccountService<AR>
where
    AR: AccountRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<User, AccountError> {
        self.ensure_email_available(&command.email).await?;

        let role = Role::for_self_registration(&command.email);
        let user = self.new_user(command.email, &command.password, command.full_name, role)?;

        let profile = match role {
            Role::Client => Some(ClientProfile::placeholder(
                user.id,
                command.company_name,
                command.project_name,
            )),
            Role::Admin => None,
        };

        let created = self.repository.create(NewAccount { user, profile }).await?;

        tracing::info!(
            user_id = %created.id,
            role = %created.role,
            "Account registered"
        );

        Ok(created)
    }

    async fn provision(
        &self,
        command: ProvisionCommand,
    ) -> Result<ProvisionOutcome, AccountError> {
        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Ok(ProvisionOutcome::AlreadyExists(command.email));
        }

        let user = self.new_user(
            command.email,
            &command.password,
            command.full_name,
            command.role,
        )?;

        let profile = match (command.role, command.profile) {
            (Role::Client, Some(details)) => Some(ClientProfile {
                id: ProfileId::new(),
                user_id: user.id,
                company_name: details.company_name,
                project_name: details.project_name,
                budget: details.budget,
                status: details.status,
            }),
            (Role::Client, None) => Some(ClientProfile::placeholder(user.id, None, None)),
            (Role::Admin, _) => None,
        };

        let created = self.repository.create(NewAccount { user, profile }).await?;

        tracing::info!(
            user_id = %created.id,
            role = %created.role,
            "Account provisioned"
        );

        Ok(ProvisionOutcome::Created(created))
    }

    async fn login(&self, email: &str, password: &str) -> Result<AccessToken, AccountError> {
        let Some(user) = self
            .repository
            .find_by_email(email)
            .await?
            .filter(|user| user.is_active)
        else {
            tracing::warn!("Login rejected: no active account for submitted email");
            let _ = self.authenticator.reject_password(password);
            return Err(AccountError::InvalidCredentials);
        };

        let claims = Claims::issue(
            user.email.as_str(),
            user.role.as_str(),
            Utc::now(),
            self.token_ttl,
        );

        let result = self
            .authenticator
            .authenticate(password, &user.password_hash, &claims)
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::warn!(user_id = %user.id, "Login rejected: password mismatch");
                    AccountError::InvalidCredentials
                }
                AuthenticationError::JwtError(err) => {
                    AccountError::TokenGeneration(err.to_string())
                }
            })?;

        tracing::info!(user_id = %user.id, role = %user.role, "Access token issued");

        Ok(AccessToken(result.access_token))
    }

    async fn authorize(&self, token: &str) -> Result<User, AccountError> {
        let identity = self
            .authenticator
            .validate_token(token, Utc::now())
            .map_err(|e| {
                tracing::warn!(error = %e, "Bearer token rejected");
                AccountError::Unauthorized
            })?;

        if let Err(e) = identity.role.parse::<Role>() {
            tracing::warn!(error = %e, "Bearer token rejected");
            return Err(AccountError::Unauthorized);
        }

        self.repository
            .find_by_email(&identity.subject)
            .await?
            .filter(|user| user.is_active)
            .ok_or_else(|| {
                tracing::warn!("Bearer token subject does not resolve to a live account");
                AccountError::Unauthorized
            })
    }
}
