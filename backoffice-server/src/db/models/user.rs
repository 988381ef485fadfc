//! User Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

use super::serde_helpers;

/// User ID type
pub type UserId = RecordId;

/// 用户角色 (封闭枚举，替代散落的角色字符串)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Store,
    Customer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Store => "store",
            Role::Customer => "customer",
        }
    }
}

/// 账户状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

/// 店铺等级
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum StoreLevel {
    #[default]
    #[serde(rename = "800U")]
    L800,
    #[serde(rename = "1500U")]
    L1500,
    #[serde(rename = "3000U")]
    L3000,
    #[serde(rename = "5000U")]
    L5000,
}

impl StoreLevel {
    /// Parse the wire label ("800U", "1500U", ...)
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "800U" => Some(StoreLevel::L800),
            "1500U" => Some(StoreLevel::L1500),
            "3000U" => Some(StoreLevel::L3000),
            "5000U" => Some(StoreLevel::L5000),
            _ => None,
        }
    }
}

/// User model matching the SurrealDB schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<UserId>,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    #[serde(default)]
    pub status: UserStatus,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub store_level: StoreLevel,
    #[serde(default)]
    pub balance: f64,
    /// Percentage surcharge applied to this buyer's purchases
    #[serde(default)]
    pub fee_ratio: f64,
    pub created_at: i64,
}

impl User {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.password_hash)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }
}

/// Admin create-user payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserCreate {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,
    pub role: Role,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    pub store_level: Option<StoreLevel>,
    pub fee_ratio: Option<f64>,
}

/// Admin update-user payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_level: Option<StoreLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,
}

/// User view returned to clients (no password hash)
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Option<String>,
    pub name: String,
    pub phone: Option<String>,
    pub email: String,
    pub role: Role,
    pub status: UserStatus,
    pub is_verified: bool,
    pub store_level: StoreLevel,
    pub balance: f64,
    pub fee_ratio: f64,
    pub created_at: i64,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id.map(|id| id.to_string()),
            name: u.name,
            phone: u.phone,
            email: u.email,
            role: u.role,
            status: u.status,
            is_verified: u.is_verified,
            store_level: u.store_level,
            balance: u.balance,
            fee_ratio: u.fee_ratio,
            created_at: u.created_at,
        }
    }
}
