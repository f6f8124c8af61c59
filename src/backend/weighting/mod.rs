//! Weighting Module
//!
//! How much each user cares about food, ambience, service, price and
//! novelty. One weighting per user.

pub mod db;
pub mod handlers;

pub use db::Weighting;
pub use handlers::*;
