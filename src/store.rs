use crate::models::{Food, FoodChanges, FoodWithNutrients, NewFood, NewNutrient, Nutrient};

pub type DbError = Box<dyn std::error::Error + Send + Sync>;

/// The relational store behind the HTTP layer.
///
/// Every method issues exactly one statement (plus the id lookup after an
/// insert) and is blocking; handlers call it from `web::block`. Update and
/// delete return the number of affected rows so the caller can decide on 404.
pub trait FoodStore: Send + Sync + 'static {
    fn insert_food(&self, food: NewFood) -> Result<i32, DbError>;

    fn insert_nutrient(&self, nutrient: NewNutrient) -> Result<i32, DbError>;

    fn find_all_foods(&self) -> Result<Vec<Food>, DbError>;

    fn find_all_nutrients(&self) -> Result<Vec<Nutrient>, DbError>;

    fn find_foods_with_nutrients(&self) -> Result<Vec<FoodWithNutrients>, DbError>;

    fn update_food(&self, food_id: i32, changes: FoodChanges) -> Result<usize, DbError>;

    fn update_nutrient(&self, nutrient_id: i32, nutrient: NewNutrient) -> Result<usize, DbError>;

    fn delete_food(&self, food_id: i32) -> Result<usize, DbError>;

    fn delete_nutrient(&self, nutrient_id: i32) -> Result<usize, DbError>;
}
