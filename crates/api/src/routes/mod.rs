pub mod group;
pub mod health;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /projects                                         list, create
/// /projects/{project_id}                            get, rename, delete
/// /projects/{project_id}/groups                     list, create
/// /projects/{project_id}/groups/{group_id}          get (with contents), rename, delete
///
/// .../groups/{group_id}/actions                     list, create
/// .../groups/{group_id}/actions/sequence            reorder (POST)
/// .../groups/{group_id}/actions/{action_id}         get, update, delete
///
/// .../groups/{group_id}/buttons                     list, create
/// .../groups/{group_id}/buttons/sequence            reorder (POST)
/// .../groups/{group_id}/buttons/{button_id}         get, update, delete
/// .../groups/{group_id}/buttons/{button_id}/destination   set or clear (PATCH)
///
/// .../groups/{group_id}/inputs                      list, create
/// .../groups/{group_id}/inputs/{input_id}           get, delete
/// .../groups/{group_id}/inputs/{input_id}/destination     set or clear (PATCH)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/projects", project::router())
}
