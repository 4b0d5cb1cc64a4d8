use std::io;
use std::sync::Arc;

use actix_web::{middleware, web, App, HttpServer};
use diesel::r2d2::{self, ConnectionManager};
use diesel::MysqlConnection;

use food_nutrient_api::config::Config;
use food_nutrient_api::handlers;
use food_nutrient_api::query::{DbPool, MysqlStore};
use food_nutrient_api::store::FoodStore;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env().map_err(|err| {
        log::error!("{err}");
        io::Error::new(io::ErrorKind::InvalidInput, err)
    })?;

    // set up database connection pool, connections are opened lazily
    let manager = ConnectionManager::<MysqlConnection>::new(&config.database_url);
    let pool: DbPool = r2d2::Pool::builder()
        .max_size(config.pool_size)
        .build_unchecked(manager);

    //a failed first connection is only logged, requests will answer 500 until the db is reachable
    match pool.get() {
        Ok(_) => log::info!("connected to database"),
        Err(err) => log::error!("cannot connect to database: {err}"),
    }

    let store: Arc<dyn FoodStore> = Arc::new(MysqlStore::new(pool));
    let store = web::Data::from(store);

    log::info!(
        "starting HTTP server at http://{}:{}",
        config.host,
        config.port
    );

    HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .wrap(handlers::cors())
            .wrap(middleware::Logger::default())
            .configure(handlers::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
