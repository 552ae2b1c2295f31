use crate::domain::account::models::ClientProfile;

/// Client dashboard summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientDashboard {
    pub project_name: String,
    pub status: String,
    pub budget: String,
    pub pending_invoices_count: i64,
    pub active_orders_count: i64,
}

impl ClientDashboard {
    /// Served to a client whose profile row is missing.
    pub fn no_active_project() -> Self {
        Self {
            project_name: "No Active Project".to_string(),
            status: "Inactive".to_string(),
            budget: "$0".to_string(),
            pending_invoices_count: 0,
            active_orders_count: 0,
        }
    }

    // Counts are placeholders until invoices and orders are aggregated.
    pub fn for_profile(profile: &ClientProfile) -> Self {
        Self {
            project_name: profile.project_name.clone(),
            status: profile.status.as_str().to_string(),
            budget: profile.budget.clone(),
            pending_invoices_count: 0,
            active_orders_count: 1,
        }
    }
}
