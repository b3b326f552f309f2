use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{CourtError, CourtResult};
use crate::validation::{normalize_email, require, validate_email, validate_password};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    pub fn toggled(&self) -> Role {
        match self {
            Role::User => Role::Admin,
            Role::Admin => Role::User,
        }
    }
}

impl FromStr for Role {
    type Err = CourtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(CourtError::Validation(format!("Unknown role '{}'", other))),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Pending,
    Approved,
    Blocked,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Pending => "pending",
            UserStatus::Approved => "approved",
            UserStatus::Blocked => "blocked",
        }
    }

    /// Label used in spreadsheets handed to the administration.
    pub fn display_name(&self) -> &'static str {
        match self {
            UserStatus::Pending => "Pendiente",
            UserStatus::Approved => "Activo",
            UserStatus::Blocked => "Bloqueado",
        }
    }
}

impl FromStr for UserStatus {
    type Err = CourtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(UserStatus::Pending),
            "approved" => Ok(UserStatus::Approved),
            "blocked" => Ok(UserStatus::Blocked),
            other => Err(CourtError::Validation(format!("Unknown user status '{}'", other))),
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Residential unit: block (manzana) and house (villa).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Household {
    pub manzana: String,
    pub villa: String,
}

impl Household {
    pub fn new(manzana: impl Into<String>, villa: impl Into<String>) -> Self {
        Self {
            manzana: manzana.into(),
            villa: villa.into(),
        }
    }

    /// Case-insensitive comparison ignoring surrounding whitespace.
    pub fn same_as(&self, other: &Household) -> bool {
        self.manzana.trim().eq_ignore_ascii_case(other.manzana.trim())
            && self.villa.trim().eq_ignore_ascii_case(other.villa.trim())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub role: Role,
    pub status: UserStatus,
    pub household: Household,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
            status: self.status,
            manzana: self.household.manzana.clone(),
            villa: self.household.villa.clone(),
            created_at: self.created_at,
        }
    }

    /// Rejects accounts that may not hold a session.
    pub fn ensure_can_login(&self) -> CourtResult<()> {
        match self.status {
            UserStatus::Approved => Ok(()),
            UserStatus::Pending => Err(CourtError::Authorization(
                "Your account is pending approval by an administrator".to_string(),
            )),
            UserStatus::Blocked => Err(CourtError::Authorization(
                "Your account has been blocked, contact the administration".to_string(),
            )),
        }
    }
}

/// User as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub status: UserStatus,
    pub manzana: String,
    pub villa: String,
    pub created_at: DateTime<Utc>,
}

/// Validated data for a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub status: UserStatus,
    pub household: Household,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub manzana: String,
    pub villa: String,
}

impl RegisterRequest {
    /// Checks every field and returns a pending account ready to store.
    pub fn validate(&self) -> CourtResult<NewUser> {
        let name = require("name", &self.name)?;
        validate_email(&self.email)?;
        let manzana = require("manzana", &self.manzana)?;
        let villa = require("villa", &self.villa)?;
        validate_password(&self.password)?;
        if self.password != self.confirm_password {
            return Err(CourtError::Validation("Passwords do not match".to_string()));
        }

        Ok(NewUser {
            name: name.to_string(),
            email: normalize_email(&self.email),
            password: self.password.clone(),
            role: Role::User,
            status: UserStatus::Pending,
            household: Household::new(manzana, villa),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> CourtResult<()> {
        require("email", &self.email)?;
        require("password", &self.password)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: UserProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: String,
    pub manzana: String,
    pub villa: String,
}

impl UpdateProfileRequest {
    /// Returns the trimmed name and household.
    pub fn validate(&self) -> CourtResult<(String, Household)> {
        let name = require("name", &self.name)?;
        let manzana = require("manzana", &self.manzana)?;
        let villa = require("villa", &self.villa)?;
        Ok((name.to_string(), Household::new(manzana, villa)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordRecoveryRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordRecoveryResponse {
    pub message: String,
    pub contact_phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    pub new_password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserSearchQuery {
    pub search: Option<String>,
}

impl UserSearchQuery {
    pub fn term(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportUsersRequest {
    pub csv: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
}
