use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Role;
use crate::domain::account::models::User;
use crate::domain::account::ports::AccountRepository;
use crate::domain::dashboard::models::ClientDashboard;
use crate::domain::dashboard::ports::DashboardServicePort;

pub struct DashboardService<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
}

impl<AR> DashboardService<AR>
where
    AR: AccountRepository,
{
    pub fn new(repository: Arc<AR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<AR> DashboardServicePort for DashboardService<AR>
where
    AR: AccountRepository,
{
    async fn client_dashboard(&self, caller: &User) -> Result<ClientDashboard, AccountError> {
        caller.require_role(Role::Client)?;

        match self.repository.find_profile(&caller.id).await? {
            Some(profile) => Ok(ClientDashboard::for_profile(&profile)),
            None => {
                tracing::warn!(
                    user_id = %caller.id,
                    "Client has no profile, serving fallback dashboard"
                );
                Ok(ClientDashboard::no_active_project())
            }
        }
    }

    async fn client_list(&self, caller: &User) -> Result<Vec<User>, AccountError> {
        caller.require_role(Role::Admin)?;

        self.repository.list_by_role(Role::Client).await
    }
}
