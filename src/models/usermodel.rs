// models/usermodel.rs
use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
pub enum UserRole {
    Client,
    Professional,
    Admin,
}

impl UserRole {
    pub fn to_str(&self) -> &str {
        match self {
            UserRole::Client => "client",
            UserRole::Professional => "professional",
            UserRole::Admin => "admin",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub is_verified: Option<bool>, // Database has DEFAULT FALSE, can be NULL
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Per-category configuration of a professional: which subcategories they
/// serve and which zones they cover. Unique per (user, category).
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct ProfessionalProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category: String,
    pub zones: Vec<String>,
    pub subcategories: Vec<String>,
    pub is_active: Option<bool>, // Database has DEFAULT TRUE, can be NULL
    pub bio: String,
    pub experience_years: i32,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProfessionalProfile {
    /// A job is visible to this profile iff the profile is active for the
    /// job's category, the job's subcategory is served (empty set = all),
    /// and the job's zone is covered (empty set = everywhere).
    pub fn matches_job(&self, category: &str, subcategory: Option<&str>, location: &str) -> bool {
        if !self.is_active.unwrap_or(true) || self.category != category {
            return false;
        }

        if let Some(sub) = subcategory {
            if !self.subcategories.is_empty() && !self.subcategories.iter().any(|s| s == sub) {
                return false;
            }
        }

        self.zones.is_empty() || self.zones.iter().any(|z| z == location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(category: &str, subs: &[&str], zones: &[&str]) -> ProfessionalProfile {
        ProfessionalProfile {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            category: category.to_string(),
            zones: zones.iter().map(|z| z.to_string()).collect(),
            subcategories: subs.iter().map(|s| s.to_string()).collect(),
            is_active: Some(true),
            bio: String::new(),
            experience_years: 3,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn matching_subcategory_and_open_zones_sees_job() {
        let p = profile("Hogar", &["Plomería"], &[]);
        assert!(p.matches_job("Hogar", Some("Plomería"), "Palermo"));
    }

    #[test]
    fn different_subcategory_does_not_see_job() {
        let p = profile("Hogar", &["Electricidad"], &[]);
        assert!(!p.matches_job("Hogar", Some("Plomería"), "Palermo"));
    }

    #[test]
    fn empty_subcategory_set_means_all() {
        let p = profile("Hogar", &[], &["Palermo"]);
        assert!(p.matches_job("Hogar", Some("Plomería"), "Palermo"));
    }

    #[test]
    fn zone_mismatch_filters_job_out() {
        let p = profile("Hogar", &["Plomería"], &["Belgrano"]);
        assert!(!p.matches_job("Hogar", Some("Plomería"), "Palermo"));
    }

    #[test]
    fn inactive_profile_sees_nothing() {
        let mut p = profile("Hogar", &[], &[]);
        p.is_active = Some(false);
        assert!(!p.matches_job("Hogar", None, "Palermo"));
    }

    #[test]
    fn wrong_category_sees_nothing() {
        let p = profile("Jardín", &[], &[]);
        assert!(!p.matches_job("Hogar", Some("Plomería"), "Palermo"));
    }
}
