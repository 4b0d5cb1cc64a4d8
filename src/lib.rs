//! HTTP CRUD API over the `Foods` and `Nutrients` tables.
//!
//! Handlers validate the request, hand one statement to a [`store::FoodStore`]
//! and map the outcome to a JSON response. The MySQL implementation lives in
//! [`query`].

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod query;
pub mod requests;
pub mod schema;
pub mod store;
