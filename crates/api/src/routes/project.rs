//! Route definitions for the `/projects` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::project;
use crate::routes::group;
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                        -> list
/// POST   /                        -> create
/// GET    /{project_id}            -> get_by_id
/// PUT    /{project_id}            -> update
/// DELETE /{project_id}            -> delete
/// *      /{project_id}/groups/... -> see routes::group
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route(
            "/{project_id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .nest("/{project_id}/groups", group::router())
}
