//! Operator account DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use infra_db::{Role, UserAccount};

/// Invitation request
#[derive(Debug, Deserialize, Validate)]
pub struct InviteUserRequest {
    #[validate(email)]
    pub email: String,
    pub name: Option<String>,
    pub role: Role,
}

/// Role change request
#[derive(Debug, Deserialize)]
pub struct SetRoleRequest {
    pub role: Role,
}

/// Account roster
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<UserAccount>,
}
