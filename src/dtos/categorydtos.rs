// dtos/categorydtos.rs
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::categorymodel::Subcategory;

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateCategoryDto {
    #[validate(length(min = 1, max = 60, message = "Name must be between 1 and 60 characters"))]
    pub name: String,

    #[serde(default)]
    pub icon: String,

    #[serde(default)]
    pub color: String,

    #[serde(default)]
    pub subcategories: Vec<Subcategory>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct UpdateCategoryDto {
    pub icon: Option<String>,
    pub color: Option<String>,
    pub subcategories: Option<Vec<Subcategory>>,
    pub is_active: Option<bool>,
}
