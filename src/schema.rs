diesel::table! {
    #[sql_name = "Foods"]
    foods (food_id) {
        food_id -> Integer,
        food_name -> Nullable<Varchar>,
        category -> Nullable<Varchar>,
        serving_size -> Nullable<Varchar>,
        image_url -> Nullable<Varchar>,
        calories_per_serving -> Double,
    }
}

diesel::table! {
    #[sql_name = "Nutrients"]
    nutrients (nutrient_id) {
        nutrient_id -> Integer,
        food_id -> Integer,
        protein -> Double,
        fat -> Double,
        carbohydrates -> Double,
        fiber -> Double,
        sugar -> Double,
        sodium -> Double,
    }
}

diesel::joinable!(nutrients -> foods (food_id));
diesel::allow_tables_to_appear_in_same_query!(foods, nutrients);
