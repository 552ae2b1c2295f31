use async_trait::async_trait;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::User;
use crate::domain::dashboard::models::ClientDashboard;

/// Role-scoped read queries.
#[async_trait]
pub trait DashboardServicePort: Send + Sync + 'static {
    /// Caller's own project summary.
    ///
    /// Falls back to `ClientDashboard::no_active_project` when the caller has
    /// no profile.
    ///
    /// # Errors
    /// * `Forbidden` - Caller is not a client
    /// * `DatabaseError` - Storage failure
    async fn client_dashboard(&self, caller: &User) -> Result<ClientDashboard, AccountError>;

    /// Every client-role user.
    ///
    /// # Errors
    /// * `Forbidden` - Caller is not an admin
    /// * `DatabaseError` - Storage failure
    async fn client_list(&self, caller: &User) -> Result<Vec<User>, AccountError>;
}
