//! Form session routes, mounted at `/forms`.
//!
//! ```text
//! POST   /                              create_form
//! GET    /{id}                          get_form
//! DELETE /{id}                          delete_form
//!
//! POST   /{id}/rows                     append_row
//! PUT    /{id}/rows/{index}             replace_row
//! PATCH  /{id}/rows/{index}             set_field
//! DELETE /{id}/rows/{index}             delete_row
//! POST   /{id}/apply-all                apply_all
//! PUT    /{id}/trim                     set_trim
//!
//! POST   /{id}/resize                   resize
//! POST   /{id}/resize/confirm           confirm_resize
//! POST   /{id}/resize/cancel            cancel_resize
//!
//! GET    /{id}/metrics                  get_metrics
//! POST   /{id}/submit                   submit
//! ```

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::forms;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(forms::create_form))
        .route("/{id}", get(forms::get_form).delete(forms::delete_form))
        .route("/{id}/rows", post(forms::append_row))
        .route(
            "/{id}/rows/{index}",
            put(forms::replace_row)
                .patch(forms::set_field)
                .delete(forms::delete_row),
        )
        .route("/{id}/apply-all", post(forms::apply_all))
        .route("/{id}/trim", put(forms::set_trim))
        .route("/{id}/resize", post(forms::resize))
        .route("/{id}/resize/confirm", post(forms::confirm_resize))
        .route("/{id}/resize/cancel", post(forms::cancel_resize))
        .route("/{id}/metrics", get(forms::get_metrics))
        .route("/{id}/submit", post(forms::submit))
}
