//! Route definitions for groups and the items they own.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::{action, button, group, input};
use crate::state::AppState;

/// Routes mounted at `/projects/{project_id}/groups`.
///
/// ```text
/// GET    /                                        -> group::list
/// POST   /                                        -> group::create
/// GET    /{group_id}                              -> group::get_detail
/// PUT    /{group_id}                              -> group::update
/// DELETE /{group_id}                              -> group::delete
///
/// GET    /{group_id}/actions                      -> action::list
/// POST   /{group_id}/actions                      -> action::create
/// POST   /{group_id}/actions/sequence             -> action::change_sequence
/// GET    /{group_id}/actions/{action_id}          -> action::get_by_id
/// PUT    /{group_id}/actions/{action_id}          -> action::update
/// DELETE /{group_id}/actions/{action_id}          -> action::delete
///
/// GET    /{group_id}/buttons                      -> button::list
/// POST   /{group_id}/buttons                      -> button::create
/// POST   /{group_id}/buttons/sequence             -> button::change_sequence
/// GET    /{group_id}/buttons/{button_id}          -> button::get_by_id
/// PUT    /{group_id}/buttons/{button_id}          -> button::update
/// DELETE /{group_id}/buttons/{button_id}          -> button::delete
/// PATCH  /{group_id}/buttons/{button_id}/destination -> button::set_destination
///
/// GET    /{group_id}/inputs                       -> input::list
/// POST   /{group_id}/inputs                       -> input::create
/// GET    /{group_id}/inputs/{input_id}            -> input::get_by_id
/// DELETE /{group_id}/inputs/{input_id}            -> input::delete
/// PATCH  /{group_id}/inputs/{input_id}/destination -> input::set_destination
/// ```
pub fn router() -> Router<AppState> {
    let action_routes = Router::new()
        .route("/", get(action::list).post(action::create))
        .route("/sequence", post(action::change_sequence))
        .route(
            "/{action_id}",
            get(action::get_by_id)
                .put(action::update)
                .delete(action::delete),
        );

    let button_routes = Router::new()
        .route("/", get(button::list).post(button::create))
        .route("/sequence", post(button::change_sequence))
        .route(
            "/{button_id}",
            get(button::get_by_id)
                .put(button::update)
                .delete(button::delete),
        )
        .route("/{button_id}/destination", patch(button::set_destination));

    let input_routes = Router::new()
        .route("/", get(input::list).post(input::create))
        .route("/{input_id}", get(input::get_by_id).delete(input::delete))
        .route("/{input_id}/destination", patch(input::set_destination));

    Router::new()
        .route("/", get(group::list).post(group::create))
        .route(
            "/{group_id}",
            get(group::get_detail)
                .put(group::update)
                .delete(group::delete),
        )
        .nest("/{group_id}/actions", action_routes)
        .nest("/{group_id}/buttons", button_routes)
        .nest("/{group_id}/inputs", input_routes)
}
