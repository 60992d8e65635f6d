// db/userdb.rs
use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::usermodel::{ProfessionalProfile, User, UserRole};

#[async_trait]
pub trait UserExt {
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        email: Option<&str>,
    ) -> Result<Option<User>, Error>;

    async fn save_user(
        &self,
        name: String,
        email: String,
        role: UserRole,
    ) -> Result<User, Error>;

    /// Insert or replace the professional's configuration for one category.
    /// Unique per (user_id, category).
    async fn upsert_professional_profile(
        &self,
        user_id: Uuid,
        category: String,
        zones: Vec<String>,
        subcategories: Vec<String>,
        is_active: bool,
        bio: String,
        experience_years: i32,
    ) -> Result<ProfessionalProfile, Error>;

    async fn get_professional_profiles(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ProfessionalProfile>, Error>;
}

#[async_trait]
impl UserExt for DBClient {
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        email: Option<&str>,
    ) -> Result<Option<User>, Error> {
        let mut user: Option<User> = None;

        if let Some(user_id) = user_id {
            user = sqlx::query_as::<_, User>(
                r#"
                SELECT id, name, email, role, is_verified, created_at, updated_at
                FROM users
                WHERE id = $1
                "#,
            )
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        } else if let Some(email) = email {
            user = sqlx::query_as::<_, User>(
                r#"
                SELECT id, name, email, role, is_verified, created_at, updated_at
                FROM users
                WHERE email = $1
                "#,
            )
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        }

        Ok(user)
    }

    async fn save_user(
        &self,
        name: String,
        email: String,
        role: UserRole,
    ) -> Result<User, Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, role)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, role, is_verified, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(role)
        .fetch_one(&self.pool)
        .await
    }

    async fn upsert_professional_profile(
        &self,
        user_id: Uuid,
        category: String,
        zones: Vec<String>,
        subcategories: Vec<String>,
        is_active: bool,
        bio: String,
        experience_years: i32,
    ) -> Result<ProfessionalProfile, Error> {
        sqlx::query_as::<_, ProfessionalProfile>(
            r#"
            INSERT INTO professional_profiles
                (user_id, category, zones, subcategories, is_active, bio, experience_years)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (user_id, category) DO UPDATE
            SET zones = EXCLUDED.zones,
                subcategories = EXCLUDED.subcategories,
                is_active = EXCLUDED.is_active,
                bio = EXCLUDED.bio,
                experience_years = EXCLUDED.experience_years,
                updated_at = NOW()
            RETURNING id, user_id, category, zones, subcategories, is_active, bio,
                      experience_years, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(category)
        .bind(zones)
        .bind(subcategories)
        .bind(is_active)
        .bind(bio)
        .bind(experience_years)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_professional_profiles(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ProfessionalProfile>, Error> {
        sqlx::query_as::<_, ProfessionalProfile>(
            r#"
            SELECT id, user_id, category, zones, subcategories, is_active, bio,
                   experience_years, created_at, updated_at
            FROM professional_profiles
            WHERE user_id = $1
            ORDER BY category
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }
}
