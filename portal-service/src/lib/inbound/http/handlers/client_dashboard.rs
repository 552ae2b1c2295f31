use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::dashboard::models::ClientDashboard;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

pub async fn client_dashboard(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<ApiSuccess<ClientDashboardData>, ApiError> {
    state
        .dashboard_service
        .client_dashboard(&user)
        .await
        .map_err(ApiError::from)
        .map(|ref dashboard| ApiSuccess::new(StatusCode::OK, dashboard.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientDashboardData {
    pub project_name: String,
    pub status: String,
    pub budget: String,
    pub pending_invoices_count: i64,
    pub active_orders_count: i64,
}

impl From<&ClientDashboard> for ClientDashboardData {
    fn from(dashboard: &ClientDashboard) -> Self {
        Self {
            project_name: dashboard.project_name.clone(),
            status: dashboard.status.clone(),
            budget: dashboard.budget.clone(),
            pending_invoices_count: dashboard.pending_invoices_count,
            active_orders_count: dashboard.active_orders_count,
        }
    }
}
