//! Account routes
//!
//! Sign-up returns the created profile. Sign-in hands the session token to
//! the client through the configured transport, never in the body.

use crate::error::{ApiError, ApiJson, ApiResult};
use crate::state::AppState;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use resume_manager_shared::{
    DataResponse, MessageResponse, ProfileResponse, SignInRequest, SignUpRequest,
};

/// Create account routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/sign-up", post(sign_up))
        .route("/sign-in", post(sign_in))
}

/// POST /api/sign-up
async fn sign_up(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SignUpRequest>,
) -> ApiResult<(StatusCode, Json<DataResponse<ProfileResponse>>)> {
    let profile = state.users().sign_up(req).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(profile))))
}

/// POST /api/sign-in
async fn sign_in(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SignInRequest>,
) -> ApiResult<(HeaderMap, Json<MessageResponse>)> {
    let token = state.users().sign_in(req).await?;

    let mut headers = HeaderMap::new();
    state
        .verifier()
        .transport()
        .attach(&mut headers, &token)
        .map_err(ApiError::Internal)?;

    Ok((headers, Json(MessageResponse::new("Signed in successfully."))))
}
