//! Posting Module
//!
//! Short text posts written by users, with optional display options.

pub mod db;
pub mod handlers;

pub use db::{Post, PostOptions};
pub use handlers::*;
