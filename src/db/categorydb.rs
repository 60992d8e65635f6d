// db/categorydb.rs
use async_trait::async_trait;
use sqlx::{types::Json, Error};
use uuid::Uuid;

use super::db::DBClient;
use crate::models::categorymodel::{Category, Subcategory};

#[async_trait]
pub trait CategoryExt {
    async fn create_category(
        &self,
        name: String,
        icon: String,
        color: String,
        subcategories: Vec<Subcategory>,
    ) -> Result<Category, Error>;

    async fn update_category(
        &self,
        category_id: Uuid,
        icon: Option<String>,
        color: Option<String>,
        subcategories: Option<Vec<Subcategory>>,
        is_active: Option<bool>,
    ) -> Result<Category, Error>;

    async fn get_category_by_name(&self, name: &str) -> Result<Option<Category>, Error>;

    async fn get_categories(&self, active_only: bool) -> Result<Vec<Category>, Error>;
}

#[async_trait]
impl CategoryExt for DBClient {
    async fn create_category(
        &self,
        name: String,
        icon: String,
        color: String,
        subcategories: Vec<Subcategory>,
    ) -> Result<Category, Error> {
        sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, icon, color, subcategories)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, icon, color, subcategories, is_active, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(icon)
        .bind(color)
        .bind(Json(subcategories))
        .fetch_one(&self.pool)
        .await
    }

    async fn update_category(
        &self,
        category_id: Uuid,
        icon: Option<String>,
        color: Option<String>,
        subcategories: Option<Vec<Subcategory>>,
        is_active: Option<bool>,
    ) -> Result<Category, Error> {
        sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET icon = COALESCE($2, icon),
                color = COALESCE($3, color),
                subcategories = COALESCE($4, subcategories),
                is_active = COALESCE($5, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, icon, color, subcategories, is_active, created_at, updated_at
            "#,
        )
        .bind(category_id)
        .bind(icon)
        .bind(color)
        .bind(subcategories.map(Json))
        .bind(is_active)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_category_by_name(&self, name: &str) -> Result<Option<Category>, Error> {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, icon, color, subcategories, is_active, created_at, updated_at
            FROM categories
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_categories(&self, active_only: bool) -> Result<Vec<Category>, Error> {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, icon, color, subcategories, is_active, created_at, updated_at
            FROM categories
            WHERE ($1 = FALSE OR is_active IS NOT FALSE)
            ORDER BY name
            "#,
        )
        .bind(active_only)
        .fetch_all(&self.pool)
        .await
    }
}
