pub mod contact;
pub mod health;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /projects                                        filtered list (GET)
/// /projects/facets                                 facet option lists (GET)
/// /projects/{id}                                   single project (GET)
///
/// /contact                                         submit contact form (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/projects", project::router())
        .merge(contact::router())
}
