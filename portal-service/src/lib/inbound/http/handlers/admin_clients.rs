use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::current_user::UserData;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

pub async fn admin_clients(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<ApiSuccess<Vec<UserData>>, ApiError> {
    let clients = state.dashboard_service.client_list(&user).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        clients.iter().map(UserData::from).collect(),
    ))
}
