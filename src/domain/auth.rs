//! Login payloads

use super::ids::CongregationId;
use crate::config::SecretString;
use serde::{Deserialize, Serialize};

/// Credentials as typed by the user
#[derive(Debug, Clone)]
pub struct LoginForm {
    /// Congregation number, sent as `congregation_id`
    pub congregation: String,
    pub email: String,
    pub password: SecretString,
}

/// Authenticated user as returned by `/auth/login`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: u64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub congregation_id: CongregationId,
}

/// Response of `/auth/login`
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub access_token: SecretString,
    pub user: AuthUser,
}
