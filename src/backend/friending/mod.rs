//! Friending Module
//!
//! Friend requests between users and the friendships they turn into.

pub mod db;
pub mod handlers;

pub use db::{FriendRequest, FriendRequestStatus, Friendship};
pub use handlers::*;
