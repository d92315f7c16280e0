//! Handlers for the `/projects` resource.
//!
//! The dataset is immutable, so every request derives a fresh view from the
//! shared catalog; nothing is cached between requests.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use folio_core::facets::derive_facets;
use folio_core::filter::{derive_view, FilterState};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/projects?category=&projectType=&status=&sortBy=&search=
///
/// Missing parameters take their defaults (`all`, `recent`, empty search).
/// Returns the filtered, sorted list together with the facet lists.
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<FilterState>, QueryRejection>,
) -> AppResult<Response> {
    let Query(filters) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let view = derive_view(state.catalog.projects(), &filters);

    tracing::debug!(
        sort_by = filters.sort_by.as_str(),
        search = %filters.search,
        active_filters = view.active_filters,
        results = view.total,
        "Projects filtered",
    );

    Ok(Json(DataResponse { data: view }).into_response())
}

/// GET /api/v1/projects/facets
pub async fn facets(State(state): State<AppState>) -> impl IntoResponse {
    Json(DataResponse {
        data: derive_facets(state.catalog.projects()),
    })
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let project = state.catalog.require(&id)?;
    Ok(Json(DataResponse { data: project }).into_response())
}
