//! Reviewing Module
//!
//! Scored reviews of restaurants. Each user reviews a restaurant at most once.

pub mod db;
pub mod handlers;

pub use db::{Review, ReviewFilter};
pub use handlers::*;
