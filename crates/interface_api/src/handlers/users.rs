//! Operator account handlers
//!
//! All routes here sit behind the admin gate.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use validator::Validate;

use core_kernel::UserId;
use infra_db::{UserAccount, UserRepository};

use crate::dto::users::*;
use crate::error::ApiError;
use crate::AppState;

pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<UserListResponse>, ApiError> {
    let users = UserRepository::new(state.pool.clone()).list().await?;
    Ok(Json(UserListResponse { users }))
}

/// Invites a new operator
pub async fn invite_user(
    State(state): State<AppState>,
    Json(request): Json<InviteUserRequest>,
) -> Result<Json<UserAccount>, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let account = UserRepository::new(state.pool.clone())
        .invite(&request.email, request.name.as_deref(), request.role)
        .await?;
    Ok(Json(account))
}

pub async fn set_role(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    Json(request): Json<SetRoleRequest>,
) -> Result<Json<Value>, ApiError> {
    UserRepository::new(state.pool.clone())
        .set_role(id, request.role)
        .await?;
    Ok(Json(serde_json::json!({ "updated": true })))
}

pub async fn deactivate_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<Value>, ApiError> {
    UserRepository::new(state.pool.clone()).deactivate(id).await?;
    Ok(Json(serde_json::json!({ "deactivated": true })))
}
