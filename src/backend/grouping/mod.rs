//! Grouping Module
//!
//! Named, ordered lists of restaurants owned by a user. A user's groups
//! are visible to the user and their friends.

pub mod db;
pub mod handlers;

pub use db::Group;
pub use handlers::*;
