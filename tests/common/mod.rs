#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use actix_web::web;
use food_nutrient_api::models::{
    Food, FoodChanges, FoodWithNutrients, NewFood, NewNutrient, Nutrient,
};
use food_nutrient_api::store::{DbError, FoodStore};

/// In-memory stand-in for the MySQL store. Ids are generated from 1 like
/// an AUTO_INCREMENT column.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    foods: Vec<Food>,
    nutrients: Vec<Nutrient>,
    last_food_id: i32,
    last_nutrient_id: i32,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn foods(&self) -> Vec<Food> {
        self.inner.lock().unwrap().foods.clone()
    }

    pub fn nutrients(&self) -> Vec<Nutrient> {
        self.inner.lock().unwrap().nutrients.clone()
    }
}

fn nutrient_row(nutrient_id: i32, n: NewNutrient) -> Nutrient {
    Nutrient {
        nutrient_id,
        food_id: n.food_id,
        protein: n.protein,
        fat: n.fat,
        carbohydrates: n.carbohydrates,
        fiber: n.fiber,
        sugar: n.sugar,
        sodium: n.sodium,
    }
}

impl FoodStore for MemoryStore {
    fn insert_food(&self, food: NewFood) -> Result<i32, DbError> {
        let mut tables = self.inner.lock().unwrap();
        tables.last_food_id += 1;
        let food_id = tables.last_food_id;
        tables.foods.push(Food {
            food_id,
            food_name: Some(food.food_name),
            category: Some(food.category),
            serving_size: Some(food.serving_size),
            image_url: food.image_url,
            calories_per_serving: food.calories_per_serving,
        });
        Ok(food_id)
    }

    fn insert_nutrient(&self, nutrient: NewNutrient) -> Result<i32, DbError> {
        let mut tables = self.inner.lock().unwrap();
        tables.last_nutrient_id += 1;
        let nutrient_id = tables.last_nutrient_id;
        tables.nutrients.push(nutrient_row(nutrient_id, nutrient));
        Ok(nutrient_id)
    }

    fn find_all_foods(&self) -> Result<Vec<Food>, DbError> {
        Ok(self.foods())
    }

    fn find_all_nutrients(&self) -> Result<Vec<Nutrient>, DbError> {
        Ok(self.nutrients())
    }

    fn find_foods_with_nutrients(&self) -> Result<Vec<FoodWithNutrients>, DbError> {
        let tables = self.inner.lock().unwrap();
        let mut rows = Vec::new();
        for food in &tables.foods {
            let base = FoodWithNutrients {
                food_id: food.food_id,
                food_name: food.food_name.clone(),
                category: food.category.clone(),
                serving_size: food.serving_size.clone(),
                image_url: food.image_url.clone(),
                nutrient_id: None,
                protein: None,
                fat: None,
                carbohydrates: None,
                fiber: None,
                sugar: None,
                sodium: None,
            };
            let matches: Vec<&Nutrient> = tables
                .nutrients
                .iter()
                .filter(|n| n.food_id == food.food_id)
                .collect();
            if matches.is_empty() {
                rows.push(base);
                continue;
            }
            for n in matches {
                rows.push(FoodWithNutrients {
                    nutrient_id: Some(n.nutrient_id),
                    protein: Some(n.protein),
                    fat: Some(n.fat),
                    carbohydrates: Some(n.carbohydrates),
                    fiber: Some(n.fiber),
                    sugar: Some(n.sugar),
                    sodium: Some(n.sodium),
                    ..base.clone()
                });
            }
        }
        Ok(rows)
    }

    fn update_food(&self, food_id: i32, changes: FoodChanges) -> Result<usize, DbError> {
        let mut tables = self.inner.lock().unwrap();
        match tables.foods.iter_mut().find(|f| f.food_id == food_id) {
            Some(food) => {
                food.food_name = changes.food_name;
                food.category = changes.category;
                food.serving_size = changes.serving_size;
                food.image_url = changes.image_url;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn update_nutrient(&self, nutrient_id: i32, nutrient: NewNutrient) -> Result<usize, DbError> {
        let mut tables = self.inner.lock().unwrap();
        match tables
            .nutrients
            .iter_mut()
            .find(|n| n.nutrient_id == nutrient_id)
        {
            Some(row) => {
                *row = nutrient_row(nutrient_id, nutrient);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn delete_food(&self, food_id: i32) -> Result<usize, DbError> {
        let mut tables = self.inner.lock().unwrap();
        let before = tables.foods.len();
        tables.foods.retain(|f| f.food_id != food_id);
        Ok(before - tables.foods.len())
    }

    fn delete_nutrient(&self, nutrient_id: i32) -> Result<usize, DbError> {
        let mut tables = self.inner.lock().unwrap();
        let before = tables.nutrients.len();
        tables.nutrients.retain(|n| n.nutrient_id != nutrient_id);
        Ok(before - tables.nutrients.len())
    }
}

/// Store whose every call fails the way a dropped connection would.
pub struct BrokenStore;

fn connection_lost<T>() -> Result<T, DbError> {
    Err("connection lost".into())
}

impl FoodStore for BrokenStore {
    fn insert_food(&self, _food: NewFood) -> Result<i32, DbError> {
        connection_lost()
    }

    fn insert_nutrient(&self, _nutrient: NewNutrient) -> Result<i32, DbError> {
        connection_lost()
    }

    fn find_all_foods(&self) -> Result<Vec<Food>, DbError> {
        connection_lost()
    }

    fn find_all_nutrients(&self) -> Result<Vec<Nutrient>, DbError> {
        connection_lost()
    }

    fn find_foods_with_nutrients(&self) -> Result<Vec<FoodWithNutrients>, DbError> {
        connection_lost()
    }

    fn update_food(&self, _food_id: i32, _changes: FoodChanges) -> Result<usize, DbError> {
        connection_lost()
    }

    fn update_nutrient(&self, _nutrient_id: i32, _nutrient: NewNutrient) -> Result<usize, DbError> {
        connection_lost()
    }

    fn delete_food(&self, _food_id: i32) -> Result<usize, DbError> {
        connection_lost()
    }

    fn delete_nutrient(&self, _nutrient_id: i32) -> Result<usize, DbError> {
        connection_lost()
    }
}

pub fn data(store: Arc<dyn FoodStore>) -> web::Data<dyn FoodStore> {
    web::Data::from(store)
}
