use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager, PooledConnection};
use diesel::sql_types::{BigInt, Unsigned};

use crate::models::{Food, FoodChanges, FoodWithNutrients, NewFood, NewNutrient, Nutrient};
use crate::schema::{foods, nutrients};
use crate::store::{DbError, FoodStore};

pub type DbPool = r2d2::Pool<ConnectionManager<MysqlConnection>>;

pub(crate) fn insert_food(food: &NewFood, conn: &mut MysqlConnection) -> Result<i32, DbError> {
    diesel::insert_into(foods::table).values(food).execute(conn)?;
    last_insert_id(conn)
}

pub(crate) fn insert_nutrient(
    nutrient: &NewNutrient,
    conn: &mut MysqlConnection,
) -> Result<i32, DbError> {
    diesel::insert_into(nutrients::table)
        .values(nutrient)
        .execute(conn)?;
    last_insert_id(conn)
}

//must run on the connection that did the insert, LAST_INSERT_ID is per session
fn last_insert_id(conn: &mut MysqlConnection) -> Result<i32, DbError> {
    let id: u64 = diesel::select(sql::<Unsigned<BigInt>>("LAST_INSERT_ID()")).get_result(conn)?;
    Ok(i32::try_from(id)?)
}

pub(crate) fn find_all_foods(conn: &mut MysqlConnection) -> Result<Vec<Food>, DbError> {
    let all_foods = foods::table
        .select(Food::as_select())
        .order(foods::food_id.asc())
        .load(conn)?;
    Ok(all_foods)
}

pub(crate) fn find_all_nutrients(conn: &mut MysqlConnection) -> Result<Vec<Nutrient>, DbError> {
    let all_nutrients = nutrients::table
        .select(Nutrient::as_select())
        .order(nutrients::nutrient_id.asc())
        .load(conn)?;
    Ok(all_nutrients)
}

pub(crate) fn find_foods_with_nutrients(
    conn: &mut MysqlConnection,
) -> Result<Vec<FoodWithNutrients>, DbError> {
    let rows = foods::table
        .left_join(nutrients::table)
        .select((
            foods::food_id,
            foods::food_name,
            foods::category,
            foods::serving_size,
            foods::image_url,
            nutrients::nutrient_id.nullable(),
            nutrients::protein.nullable(),
            nutrients::fat.nullable(),
            nutrients::carbohydrates.nullable(),
            nutrients::fiber.nullable(),
            nutrients::sugar.nullable(),
            nutrients::sodium.nullable(),
        ))
        .order((foods::food_id.asc(), nutrients::nutrient_id.asc()))
        .load::<FoodWithNutrients>(conn)?;
    Ok(rows)
}

pub(crate) fn update_food(
    target_id: i32,
    changes: &FoodChanges,
    conn: &mut MysqlConnection,
) -> Result<usize, DbError> {
    let affected = diesel::update(foods::table.find(target_id))
        .set(changes)
        .execute(conn)?;
    Ok(affected)
}

pub(crate) fn update_nutrient(
    target_id: i32,
    nutrient: &NewNutrient,
    conn: &mut MysqlConnection,
) -> Result<usize, DbError> {
    let affected = diesel::update(nutrients::table.find(target_id))
        .set(nutrient)
        .execute(conn)?;
    Ok(affected)
}

pub(crate) fn delete_food(target_id: i32, conn: &mut MysqlConnection) -> Result<usize, DbError> {
    Ok(diesel::delete(foods::table.find(target_id)).execute(conn)?)
}

pub(crate) fn delete_nutrient(
    target_id: i32,
    conn: &mut MysqlConnection,
) -> Result<usize, DbError> {
    Ok(diesel::delete(nutrients::table.find(target_id)).execute(conn)?)
}

/// [`FoodStore`] backed by an r2d2 pool of MySQL connections.
#[derive(Clone)]
pub struct MysqlStore {
    pool: DbPool,
}

impl MysqlStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<PooledConnection<ConnectionManager<MysqlConnection>>, DbError> {
        Ok(self.pool.get()?)
    }
}

impl FoodStore for MysqlStore {
    fn insert_food(&self, food: NewFood) -> Result<i32, DbError> {
        insert_food(&food, &mut *self.conn()?)
    }

    fn insert_nutrient(&self, nutrient: NewNutrient) -> Result<i32, DbError> {
        insert_nutrient(&nutrient, &mut *self.conn()?)
    }

    fn find_all_foods(&self) -> Result<Vec<Food>, DbError> {
        find_all_foods(&mut *self.conn()?)
    }

    fn find_all_nutrients(&self) -> Result<Vec<Nutrient>, DbError> {
        find_all_nutrients(&mut *self.conn()?)
    }

    fn find_foods_with_nutrients(&self) -> Result<Vec<FoodWithNutrients>, DbError> {
        find_foods_with_nutrients(&mut *self.conn()?)
    }

    fn update_food(&self, food_id: i32, changes: FoodChanges) -> Result<usize, DbError> {
        update_food(food_id, &changes, &mut *self.conn()?)
    }

    fn update_nutrient(&self, nutrient_id: i32, nutrient: NewNutrient) -> Result<usize, DbError> {
        update_nutrient(nutrient_id, &nutrient, &mut *self.conn()?)
    }

    fn delete_food(&self, food_id: i32) -> Result<usize, DbError> {
        delete_food(food_id, &mut *self.conn()?)
    }

    fn delete_nutrient(&self, nutrient_id: i32) -> Result<usize, DbError> {
        delete_nutrient(nutrient_id, &mut *self.conn()?)
    }
}
