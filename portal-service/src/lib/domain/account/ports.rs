use async_trait::async_trait;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::AccessToken;
use crate::domain::account::models::ClientProfile;
use crate::domain::account::models::NewAccount;
use crate::domain::account::models::ProvisionCommand;
use crate::domain::account::models::ProvisionOutcome;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::models::Role;
use crate::domain::account::models::User;
use crate::domain::account::models::UserId;

/// Port for account and authentication operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Self-service registration.
    ///
    /// Assigns the role from the email, and for clients creates a placeholder
    /// profile in the same transaction as the user.
    ///
    /// # Errors
    /// * `EmailAlreadyRegistered` - Email is already taken
    /// * `PasswordHashing` - Secret could not be hashed
    /// * `DatabaseError` - Storage failure; nothing was persisted
    async fn register(&self, command: RegisterCommand) -> Result<User, AccountError>;

    /// Create an account with an explicitly assigned role. Idempotent on email.
    ///
    /// # Errors
    /// * `PasswordHashing` - Secret could not be hashed
    /// * `DatabaseError` - Storage failure
    async fn provision(&self, command: ProvisionCommand)
        -> Result<ProvisionOutcome, AccountError>;

    /// Verify credentials and mint a bearer token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email, wrong password or inactive account
    /// * `TokenGeneration` - Signing failed
    /// * `DatabaseError` - Storage failure
    async fn login(&self, email: &str, password: &str) -> Result<AccessToken, AccountError>;

    /// Resolve a bearer token to the live account it was issued to.
    ///
    /// # Errors
    /// * `Unauthorized` - Token invalid or expired, or subject not a live account
    /// * `DatabaseError` - Storage failure
    async fn authorize(&self, token: &str) -> Result<User, AccountError>;
}

/// Persistence operations for users and their profiles.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist a user and, when present, its profile atomically.
    ///
    /// # Errors
    /// * `EmailAlreadyRegistered` - Unique constraint on email violated
    /// * `DatabaseError` - Storage failure; neither row was written
    async fn create(&self, account: NewAccount) -> Result<User, AccountError>;

    /// Retrieve user by exact email.
    ///
    /// # Errors
    /// * `DatabaseError` - Storage failure
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccountError>;

    /// Retrieve the profile owned by a user, if any.
    ///
    /// # Errors
    /// * `DatabaseError` - Storage failure
    async fn find_profile(&self, user_id: &UserId)
        -> Result<Option<ClientProfile>, AccountError>;

    /// Retrieve all users holding `role`, oldest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Storage failure
    async fn list_by_role(&self, role: Role) -> Result<Vec<User>, AccountError>;
}
