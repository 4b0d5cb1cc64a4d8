//! Request bodies for the write endpoints.
//!
//! Shape checks happen during deserialization (an unusable numeric value
//! fails the JSON extractor); presence checks happen in `validate`, before
//! any store call.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::models::{FoodChanges, NewFood, NewNutrient};

const MISSING_FOOD_FIELDS: &str = "Missing required fields: food_name, category, serving_size";
const MISSING_FOOD_ID: &str = "Missing required field: food_id";

/// A non-negative quantity where every falsy JSON value (absent, `null`,
/// `0`, `false`, `""`) reads as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Amount(pub f64);

impl Amount {
    fn from_value(value: &Value) -> Result<Self, String> {
        let number = match value {
            Value::Null | Value::Bool(false) => 0.0,
            Value::Bool(true) => 1.0,
            Value::Number(n) => n
                .as_f64()
                .ok_or_else(|| format!("{n} is not a usable number"))?,
            Value::String(s) if s.trim().is_empty() => 0.0,
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("{s:?} is not a number"))?,
            other => return Err(format!("expected a number, found {other}")),
        };

        if number.is_nan() {
            return Ok(Amount(0.0));
        }
        if number.is_infinite() {
            return Err(format!("{number} is not a finite number"));
        }
        if number < 0.0 {
            return Err(format!("{number} must not be negative"));
        }
        Ok(Amount(number))
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Amount::from_value(&value).map_err(de::Error::custom)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateFood {
    #[serde(default)]
    pub food_name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub serving_size: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub calories_per_serving: Amount,
}

impl CreateFood {
    pub fn validate(self) -> Result<NewFood, ApiError> {
        match (
            present(self.food_name),
            present(self.category),
            present(self.serving_size),
        ) {
            (Some(food_name), Some(category), Some(serving_size)) => Ok(NewFood {
                food_name,
                category,
                serving_size,
                image_url: present(self.image_url),
                calories_per_serving: self.calories_per_serving.0,
            }),
            _ => Err(ApiError::validation(MISSING_FOOD_FIELDS)),
        }
    }
}

/// Body of `PUT /foods/{id}`. Fields are written as given, with no
/// required-field check.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateFood {
    #[serde(default)]
    pub food_name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub serving_size: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl UpdateFood {
    /// Parses a raw request body. An empty body reads as `{}`.
    pub fn from_body(body: &[u8]) -> Result<Self, ApiError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(UpdateFood::default());
        }
        serde_json::from_slice(body).map_err(|e| ApiError::validation(e.to_string()))
    }
}

impl From<UpdateFood> for FoodChanges {
    fn from(body: UpdateFood) -> Self {
        FoodChanges {
            food_name: body.food_name,
            category: body.category,
            serving_size: body.serving_size,
            image_url: present(body.image_url),
        }
    }
}

/// Body of both `POST /nutrients` and `PUT /nutrients/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct NutrientBody {
    #[serde(default)]
    pub food_id: Value,
    #[serde(default)]
    pub protein: Amount,
    #[serde(default)]
    pub fat: Amount,
    #[serde(default)]
    pub carbohydrates: Amount,
    #[serde(default)]
    pub fiber: Amount,
    #[serde(default)]
    pub sugar: Amount,
    #[serde(default)]
    pub sodium: Amount,
}

impl NutrientBody {
    pub fn validate(self) -> Result<NewNutrient, ApiError> {
        Ok(NewNutrient {
            food_id: food_id(&self.food_id)?,
            protein: self.protein.0,
            fat: self.fat.0,
            carbohydrates: self.carbohydrates.0,
            fiber: self.fiber.0,
            sugar: self.sugar.0,
            sodium: self.sodium.0,
        })
    }
}

fn present(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.is_empty())
}

fn food_id(value: &Value) -> Result<i32, ApiError> {
    let id = match value {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() <= i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => return Err(ApiError::validation("food_id must be an integer")),
    };

    match id {
        None if is_falsy(value) => Err(ApiError::validation(MISSING_FOOD_ID)),
        Some(0) => Err(ApiError::validation(MISSING_FOOD_ID)),
        Some(id) if id > 0 => {
            i32::try_from(id).map_err(|_| ApiError::validation("food_id is out of range"))
        }
        Some(_) => Err(ApiError::validation("food_id must be a positive integer")),
        None => Err(ApiError::validation("food_id must be an integer")),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}
