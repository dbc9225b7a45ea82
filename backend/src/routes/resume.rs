//! Resume routes
//!
//! Every route here sits behind `require_auth`; handlers receive the
//! verified identity as an extractor.

use crate::auth::{require_auth, AuthIdentity};
use crate::error::{ApiJson, ApiQuery, ApiResult};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::get,
    Json, Router,
};
use resume_manager_shared::{
    AuthzError, DataResponse, ResumeListQuery, ResumeRequest, ResumeResponse,
};

/// Create resume routes guarded by the token verifier
pub fn resume_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_resumes).post(create_resume))
        .route(
            "/:resume_id",
            get(get_resume).put(update_resume).delete(delete_resume),
        )
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}

/// Ids are store-assigned integers; anything else cannot name a resume.
fn parse_resume_id(raw: &str) -> Result<i64, AuthzError> {
    raw.parse().map_err(|_| AuthzError::ResourceNotFound)
}

/// POST /api/resume
async fn create_resume(
    State(state): State<AppState>,
    identity: AuthIdentity,
    ApiJson(req): ApiJson<ResumeRequest>,
) -> ApiResult<(StatusCode, Json<DataResponse<ResumeResponse>>)> {
    let created = state.resumes().create(&identity, req).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(created))))
}

/// GET /api/resume?sortBy=&sort=
async fn list_resumes(
    State(state): State<AppState>,
    identity: AuthIdentity,
    ApiQuery(query): ApiQuery<ResumeListQuery>,
) -> ApiResult<Json<DataResponse<Vec<ResumeResponse>>>> {
    let resumes = state.resumes().list(&identity, query).await?;
    Ok(Json(DataResponse::new(resumes)))
}

/// GET /api/resume/:resumeId
async fn get_resume(
    State(state): State<AppState>,
    identity: AuthIdentity,
    Path(resume_id): Path<String>,
) -> ApiResult<Json<DataResponse<ResumeResponse>>> {
    let resume_id = parse_resume_id(&resume_id)?;
    let resume = state.resumes().get(&identity, resume_id).await?;
    Ok(Json(DataResponse::new(resume)))
}

/// PUT /api/resume/:resumeId
async fn update_resume(
    State(state): State<AppState>,
    identity: AuthIdentity,
    Path(resume_id): Path<String>,
    ApiJson(req): ApiJson<ResumeRequest>,
) -> ApiResult<Json<DataResponse<ResumeResponse>>> {
    let resume_id = parse_resume_id(&resume_id)?;
    let resume = state.resumes().update(&identity, resume_id, req).await?;
    Ok(Json(DataResponse::new(resume)))
}

/// DELETE /api/resume/:resumeId
async fn delete_resume(
    State(state): State<AppState>,
    identity: AuthIdentity,
    Path(resume_id): Path<String>,
) -> ApiResult<Json<DataResponse<i64>>> {
    let resume_id = parse_resume_id(&resume_id)?;
    let deleted = state.resumes().delete(&identity, resume_id).await?;
    Ok(Json(DataResponse::new(deleted)))
}
