use actix_cors::Cors;
use actix_web::{delete, get, post, put, web, HttpResponse};
use serde_json::json;

use crate::error::ApiError;
use crate::models::FoodChanges;
use crate::requests::{CreateFood, NutrientBody, UpdateFood};
use crate::store::FoodStore;

type Store = web::Data<dyn FoodStore>;

const FOOD_NOT_FOUND: &str = "Food not found";
const NUTRIENT_NOT_FOUND: &str = "Nutrient not found";

//an id that can't name a row (not an integer, out of range) matches nothing
fn row_id(raw: web::Path<String>, not_found: &'static str) -> Result<i32, ApiError> {
    raw.trim().parse().map_err(|_| ApiError::NotFound(not_found))
}

#[post("/foods")]
async fn create_food(
    store: Store,
    body: web::Json<CreateFood>,
) -> Result<HttpResponse, ApiError> {
    let food = body.into_inner().validate()?;
    let food_id = web::block(move || store.insert_food(food))
        .await?
        .map_err(ApiError::storage("Error creating food"))?;
    Ok(HttpResponse::Created().json(json!({ "food_id": food_id, "message": "Food created" })))
}

#[post("/nutrients")]
async fn create_nutrient(
    store: Store,
    body: web::Json<NutrientBody>,
) -> Result<HttpResponse, ApiError> {
    let nutrient = body.into_inner().validate()?;
    let nutrient_id = web::block(move || store.insert_nutrient(nutrient))
        .await?
        .map_err(ApiError::storage("Error creating nutrient"))?;
    Ok(HttpResponse::Created()
        .json(json!({ "nutrient_id": nutrient_id, "message": "Nutrient created" })))
}

#[get("/foods")]
async fn list_foods(store: Store) -> Result<HttpResponse, ApiError> {
    let foods = web::block(move || store.find_all_foods())
        .await?
        .map_err(ApiError::storage("Error fetching foods"))?;
    Ok(HttpResponse::Ok().json(foods))
}

#[get("/nutrients")]
async fn list_nutrients(store: Store) -> Result<HttpResponse, ApiError> {
    let nutrients = web::block(move || store.find_all_nutrients())
        .await?
        .map_err(ApiError::storage("Error fetching nutrients"))?;
    Ok(HttpResponse::Ok().json(nutrients))
}

//every food appears at least once, nutrient columns are null when it has none
#[get("/foods/nutrients")]
async fn list_foods_with_nutrients(store: Store) -> Result<HttpResponse, ApiError> {
    let rows = web::block(move || store.find_foods_with_nutrients())
        .await?
        .map_err(ApiError::storage("Error fetching foods with nutrients"))?;
    Ok(HttpResponse::Ok().json(rows))
}

#[put("/foods/{id}")]
async fn update_food(
    store: Store,
    food_id: web::Path<String>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let food_id = row_id(food_id, FOOD_NOT_FOUND)?;
    let changes: FoodChanges = UpdateFood::from_body(&body)?.into();
    let affected = web::block(move || store.update_food(food_id, changes))
        .await?
        .map_err(ApiError::storage("Error updating food"))?;
    if affected == 0 {
        return Err(ApiError::NotFound(FOOD_NOT_FOUND));
    }
    Ok(HttpResponse::Ok().json(json!({ "message": "Food updated" })))
}

#[put("/nutrients/{id}")]
async fn update_nutrient(
    store: Store,
    nutrient_id: web::Path<String>,
    body: web::Json<NutrientBody>,
) -> Result<HttpResponse, ApiError> {
    let nutrient_id = row_id(nutrient_id, NUTRIENT_NOT_FOUND)?;
    let nutrient = body.into_inner().validate()?;
    let affected = web::block(move || store.update_nutrient(nutrient_id, nutrient))
        .await?
        .map_err(ApiError::storage("Error updating nutrient"))?;
    if affected == 0 {
        return Err(ApiError::NotFound(NUTRIENT_NOT_FOUND));
    }
    Ok(HttpResponse::Ok().json(json!({ "message": "Nutrient updated" })))
}

#[delete("/foods/{id}")]
async fn delete_food(store: Store, food_id: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let food_id = row_id(food_id, FOOD_NOT_FOUND)?;
    let affected = web::block(move || store.delete_food(food_id))
        .await?
        .map_err(ApiError::storage("Error deleting food"))?;
    if affected == 0 {
        return Err(ApiError::NotFound(FOOD_NOT_FOUND));
    }
    Ok(HttpResponse::Ok().json(json!({ "message": "Food deleted" })))
}

#[delete("/nutrients/{id}")]
async fn delete_nutrient(
    store: Store,
    nutrient_id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let nutrient_id = row_id(nutrient_id, NUTRIENT_NOT_FOUND)?;
    let affected = web::block(move || store.delete_nutrient(nutrient_id))
        .await?
        .map_err(ApiError::storage("Error deleting nutrient"))?;
    if affected == 0 {
        return Err(ApiError::NotFound(NUTRIENT_NOT_FOUND));
    }
    Ok(HttpResponse::Ok().json(json!({ "message": "Nutrient deleted" })))
}

/// Any origin, method and header may call the API, browser clients included.
pub fn cors() -> Cors {
    Cors::permissive()
}

/// Registers every route plus the JSON extractor config that turns
/// malformed bodies into `{error}` 400 responses.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| ApiError::validation(err.to_string()).into()),
    )
    .service(list_foods_with_nutrients)
    .service(list_foods)
    .service(list_nutrients)
    .service(create_food)
    .service(create_nutrient)
    .service(update_food)
    .service(update_nutrient)
    .service(delete_food)
    .service(delete_nutrient);
}
