//! Operator account repository
//!
//! Accounts are created by invitation; there is no open sign-up. The auth
//! provider owns credentials, this table mirrors the roster so role checks
//! and audit stay local.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use std::fmt;
use uuid::Uuid;

use core_kernel::UserId;

use crate::error::DatabaseError;

/// Operator role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    pub fn parse(raw: &str) -> Option<Role> {
        match raw {
            "admin" => Some(Role::Admin),
            "user" => Some(Role::User),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One operator account
#[derive(Debug, Clone, Serialize)]
pub struct UserAccount {
    pub id: UserId,
    pub email: String,
    pub name: Option<String>,
    pub role: Role,
    pub is_active: bool,
    pub invited_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    name: Option<String>,
    role: String,
    is_active: bool,
    invited_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for UserAccount {
    type Error = DatabaseError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = Role::parse(&row.role)
            .ok_or_else(|| DatabaseError::CorruptRow(format!("unknown role '{}'", row.role)))?;
        Ok(UserAccount {
            id: UserId::from_uuid(row.id),
            email: row.email,
            name: row.name,
            role,
            is_active: row.is_active,
            invited_at: row.invited_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const SELECT_COLUMNS: &str =
    "id, email, name, role, is_active, invited_at, created_at, updated_at";

/// Repository for operator accounts
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Records an invitation
    ///
    /// A second invite for the same email is a duplicate, not a silent
    /// overwrite.
    pub async fn invite(
        &self,
        email: &str,
        name: Option<&str>,
        role: Role,
    ) -> Result<UserAccount, DatabaseError> {
        let now = Utc::now();
        let row: Option<UserRow> = sqlx::query_as(&format!(
            r#"
            INSERT INTO users (id, email, name, role, is_active, invited_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, true, $5, $5, $5)
            ON CONFLICT (email) DO NOTHING
            RETURNING {SELECT_COLUMNS}
            "#
        ))
        .bind(Uuid::now_v7())
        .bind(email)
        .bind(name)
        .bind(role.as_str())
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| DatabaseError::duplicate("User", "email", email))?
            .try_into()
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, DatabaseError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    pub async fn list(&self) -> Result<Vec<UserAccount>, DatabaseError> {
        let rows: Vec<UserRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM users ORDER BY invited_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    pub async fn set_role(&self, id: UserId, role: Role) -> Result<(), DatabaseError> {
        let result = sqlx::query("UPDATE users SET role = $2, updated_at = $3 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(role.as_str())
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("User", id));
        }
        Ok(())
    }

    pub async fn deactivate(&self, id: UserId) -> Result<(), DatabaseError> {
        let result =
            sqlx::query("UPDATE users SET is_active = false, updated_at = $2 WHERE id = $1")
                .bind(id.as_uuid())
                .bind(Utc::now())
                .execute(&self.pool)
                .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("User", id));
        }
        Ok(())
    }
}
