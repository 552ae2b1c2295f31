use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::models::User;
use crate::inbound::http::middleware::CurrentUser;

pub async fn current_user(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    Ok(ApiSuccess::new(StatusCode::OK, (&user).into()))
}

/// Public view of a user. The password digest is never part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub email: String,
    pub full_name: Option<String>,
    pub role: String,
    pub is_active: bool,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.as_str().to_string(),
            full_name: user.full_name.clone(),
            role: user.role.as_str().to_string(),
            is_active: user.is_active,
        }
    }
}
