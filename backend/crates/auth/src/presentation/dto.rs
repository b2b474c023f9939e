//! Data Transfer Objects
//!
//! Request fields are `Option` so a missing field surfaces as the
//! `invalidParameters` contract error instead of a deserialization
//! rejection.

use serde::{Deserialize, Serialize};

/// POST /user/register request
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// POST /user/login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Token response for register and login
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub name: String,
    pub email: String,
}

/// PATCH /user/update response
#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub token: String,
}
