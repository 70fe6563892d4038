use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::contract::model::{Credentials, NewUser, Session, User, UserPatch};

/// REST DTO for user representation. The password hash is deliberately
/// absent; it never crosses the API boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// REST DTO for registering a new user.
///
/// Fields are optional at the transport level so missing input surfaces as
/// the domain's validation error (HTTP 400), not a decode error.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CreateUserReq {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// REST DTO for signing in
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SignInReq {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// REST DTO for updating a user (partial)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct UpdateUserReq {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// REST DTO for a successful sign-in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDto {
    pub user: UserDto,
    pub token: String,
}

/// Confirmation body for DELETE
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteConfirmation {
    pub message: String,
}

// Conversion implementations between REST DTOs and contract models

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<CreateUserReq> for NewUser {
    fn from(req: CreateUserReq) -> Self {
        Self {
            name: req.name.unwrap_or_default(),
            email: req.email.unwrap_or_default(),
            password: req.password.unwrap_or_default(),
        }
    }
}

impl From<SignInReq> for Credentials {
    fn from(req: SignInReq) -> Self {
        Self {
            email: req.email.unwrap_or_default(),
            password: req.password.unwrap_or_default(),
        }
    }
}

impl From<UpdateUserReq> for UserPatch {
    fn from(req: UpdateUserReq) -> Self {
        Self {
            name: req.name,
            email: req.email,
        }
    }
}

impl From<Session> for SessionDto {
    fn from(session: Session) -> Self {
        Self {
            user: session.user.into(),
            token: session.token,
        }
    }
}
