//! Route definitions for the contact form.

use axum::routing::post;
use axum::Router;

use crate::handlers::contact;
use crate::state::AppState;

/// ```text
/// POST   /contact          -> submit
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/contact", post(contact::submit))
}
