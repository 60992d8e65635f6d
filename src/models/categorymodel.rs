// models/categorymodel.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Subcategory {
    pub name: String,
    pub icon: String,
    pub title_placeholder: String,
    pub description_placeholder: String,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub subcategories: Json<Vec<Subcategory>>,
    pub is_active: Option<bool>, // Database has DEFAULT TRUE, can be NULL
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Category {
    pub fn has_subcategory(&self, name: &str) -> bool {
        self.subcategories.0.iter().any(|s| s.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category_with(subs: &[&str]) -> Category {
        Category {
            id: Uuid::new_v4(),
            name: "Hogar".to_string(),
            icon: "home".to_string(),
            color: "#4A90D9".to_string(),
            subcategories: Json(
                subs.iter()
                    .map(|n| Subcategory {
                        name: n.to_string(),
                        icon: "wrench".to_string(),
                        title_placeholder: String::new(),
                        description_placeholder: String::new(),
                    })
                    .collect(),
            ),
            is_active: Some(true),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn finds_existing_subcategory() {
        let cat = category_with(&["Plomería", "Electricidad"]);
        assert!(cat.has_subcategory("Plomería"));
        assert!(!cat.has_subcategory("Jardinería"));
    }
}
