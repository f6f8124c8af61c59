/**
 * API Route Table
 *
 * Every endpoint lives under `/api`. Handlers enforce authentication
 * themselves through the `AuthUser` / `MaybeSession` extractors, so the
 * table below is the whole routing story.
 *
 * # Routes
 *
 * ## Sessions and users
 * - `GET /api/session`
 * - `GET|POST|DELETE /api/users`, `GET /api/users/{username}`
 * - `PATCH /api/users/username`, `PATCH /api/users/password`
 * - `POST /api/login`, `POST /api/logout`
 *
 * ## Posts
 * - `GET|POST /api/posts`, `PATCH|DELETE /api/posts/{id}`
 *
 * ## Friends
 * - `GET /api/friends`, `DELETE /api/friends/{friend}`
 * - `GET /api/friend/requests`, `POST|DELETE /api/friend/requests/{to}`
 * - `PUT /api/friend/accept/{from}`, `PUT /api/friend/reject/{from}`
 *
 * ## Restaurants, reviews, weightings, groups
 * - `GET|POST /api/restaurants`, `PATCH|DELETE /api/restaurants/{id}`
 * - `GET|POST /api/reviews`, `PATCH|DELETE /api/reviews/{id}`
 * - `GET|POST /api/weightings`, `PATCH /api/weightings/{id}`,
 *   `PATCH /api/weightings/reset/{id}`
 * - `GET /api/groups/user`, `POST /api/groups`,
 *   `PATCH|DELETE /api/groups/{id}`,
 *   `DELETE /api/groups/{id}/restaurants/{restaurant}`
 */

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::backend::auth::handlers as auth;
use crate::backend::server::state::AppState;
use crate::backend::{friending, grouping, posting, restaurants, reviewing, weighting};

pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Sessions and accounts
        .route("/api/session", get(auth::get_session_user))
        .route(
            "/api/users",
            get(auth::get_users).post(auth::create_user).delete(auth::delete_user),
        )
        .route("/api/users/username", patch(auth::update_username))
        .route("/api/users/password", patch(auth::update_password))
        .route("/api/users/{username}", get(auth::get_user))
        .route("/api/login", post(auth::login))
        .route("/api/logout", post(auth::logout))
        // Posts
        .route("/api/posts", get(posting::get_posts).post(posting::create_post))
        .route(
            "/api/posts/{id}",
            patch(posting::update_post).delete(posting::delete_post),
        )
        // Friends
        .route("/api/friends", get(friending::get_friends))
        .route(
            "/api/friends/{friend}",
            axum::routing::delete(friending::remove_friend),
        )
        .route("/api/friend/requests", get(friending::get_requests))
        .route(
            "/api/friend/requests/{to}",
            post(friending::send_request).delete(friending::remove_request),
        )
        .route("/api/friend/accept/{from}", put(friending::accept_request))
        .route("/api/friend/reject/{from}", put(friending::reject_request))
        // Restaurants
        .route(
            "/api/restaurants",
            get(restaurants::get_restaurants).post(restaurants::create_restaurant),
        )
        .route(
            "/api/restaurants/{id}",
            patch(restaurants::update_restaurant).delete(restaurants::delete_restaurant),
        )
        // Weightings
        .route(
            "/api/weightings",
            get(weighting::get_user_weighting).post(weighting::create_weighting),
        )
        .route("/api/weightings/{id}", patch(weighting::update_weighting))
        .route("/api/weightings/reset/{id}", patch(weighting::reset_weighting))
        // Reviews
        .route(
            "/api/reviews",
            get(reviewing::get_reviews).post(reviewing::create_review),
        )
        .route(
            "/api/reviews/{id}",
            patch(reviewing::update_review).delete(reviewing::delete_review),
        )
        // Groups
        .route("/api/groups/user", get(grouping::get_user_groups))
        .route("/api/groups", post(grouping::create_group))
        .route(
            "/api/groups/{id}",
            patch(grouping::add_restaurant).delete(grouping::delete_group),
        )
        .route(
            "/api/groups/{id}/restaurants/{restaurant}",
            axum::routing::delete(grouping::remove_restaurant),
        )
}
