//! Restaurants Module
//!
//! The shared catalogue of restaurants that reviews and groups refer to.

pub mod db;
pub mod handlers;

pub use db::{Restaurant, RestaurantPatch};
pub use handlers::*;
