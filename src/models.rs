use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::{foods, nutrients};

#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = foods)]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct Food {
    pub food_id: i32,
    pub food_name: Option<String>,
    pub category: Option<String>,
    pub serving_size: Option<String>,
    pub image_url: Option<String>,
    pub calories_per_serving: f64,
}

#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = nutrients)]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct Nutrient {
    pub nutrient_id: i32,
    pub food_id: i32,
    pub protein: f64,
    pub fat: f64,
    pub carbohydrates: f64,
    pub fiber: f64,
    pub sugar: f64,
    pub sodium: f64,
}

/// One row of `Foods LEFT JOIN Nutrients`. The nutrient half is `None`
/// for a food that has no nutrient row.
#[derive(Debug, Clone, PartialEq, Queryable, Serialize, Deserialize)]
pub struct FoodWithNutrients {
    pub food_id: i32,
    pub food_name: Option<String>,
    pub category: Option<String>,
    pub serving_size: Option<String>,
    pub image_url: Option<String>,
    pub nutrient_id: Option<i32>,
    pub protein: Option<f64>,
    pub fat: Option<f64>,
    pub carbohydrates: Option<f64>,
    pub fiber: Option<f64>,
    pub sugar: Option<f64>,
    pub sodium: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = foods)]
pub struct NewFood {
    pub food_name: String,
    pub category: String,
    pub serving_size: String,
    pub image_url: Option<String>,
    pub calories_per_serving: f64,
}

/// Full replacement of the mutable text columns of a food.
/// `None` is written as NULL, not skipped.
#[derive(Debug, Clone, PartialEq, AsChangeset)]
#[diesel(table_name = foods)]
#[diesel(treat_none_as_null = true)]
pub struct FoodChanges {
    pub food_name: Option<String>,
    pub category: Option<String>,
    pub serving_size: Option<String>,
    pub image_url: Option<String>,
}

/// Used both for inserts and for full-replace updates of a nutrient row.
#[derive(Debug, Clone, PartialEq, Insertable, AsChangeset)]
#[diesel(table_name = nutrients)]
pub struct NewNutrient {
    pub food_id: i32,
    pub protein: f64,
    pub fat: f64,
    pub carbohydrates: f64,
    pub fiber: f64,
    pub sugar: f64,
    pub sodium: f64,
}
