//! Draft snapshot routes, mounted at `/drafts`.
//!
//! ```text
//! PUT    /{scope}/{key}                 save_draft
//! GET    /{scope}/{key}                 get_draft
//! DELETE /{scope}/{key}                 clear_draft
//! ```

use axum::routing::put;
use axum::Router;

use crate::handlers::drafts;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{scope}/{key}",
        put(drafts::save_draft)
            .get(drafts::get_draft)
            .delete(drafts::clear_draft),
    )
}
