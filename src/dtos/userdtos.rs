// dtos/userdtos.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::usermodel::{User, UserRole};

#[derive(Debug, Serialize, Deserialize)]
pub struct FilterUserDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub is_verified: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl FilterUserDto {
    pub fn filter_user(user: &User) -> Self {
        FilterUserDto {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            is_verified: user.is_verified.unwrap_or(false),
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct RegisterUserDto {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "Email is invalid"))]
    pub email: String,

    #[serde(default = "default_role")]
    pub role: UserRole,
}

fn default_role() -> UserRole {
    UserRole::Client
}

#[derive(Debug, Serialize)]
pub struct RegisterResponseDto {
    pub user: FilterUserDto,
    pub token: String,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct UpsertProfileDto {
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,

    /// Empty means the professional covers every zone.
    #[serde(default)]
    pub zones: Vec<String>,

    /// Empty means the professional serves every subcategory.
    #[serde(default)]
    pub subcategories: Vec<String>,

    #[serde(default = "default_true")]
    pub is_active: bool,

    #[validate(length(max = 1000, message = "Bio must be at most 1000 characters"))]
    #[serde(default)]
    pub bio: String,

    #[validate(range(min = 0, max = 60, message = "Experience must be between 0 and 60 years"))]
    #[serde(default)]
    pub experience_years: i32,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_defaults_to_client_role() {
        let dto: RegisterUserDto =
            serde_json::from_str(r#"{"name": "Ana", "email": "ana@example.com"}"#).unwrap();
        assert!(dto.validate().is_ok());
        assert_eq!(dto.role, UserRole::Client);
    }

    #[test]
    fn registration_rejects_bad_email() {
        let dto: RegisterUserDto = serde_json::from_str(
            r#"{"name": "Ana", "email": "not-an-email", "role": "professional"}"#,
        )
        .unwrap();
        assert!(dto.validate().is_err());
    }
}
