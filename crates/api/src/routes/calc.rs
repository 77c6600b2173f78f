//! Stateless calculator routes, mounted at `/calc`.
//!
//! ```text
//! POST   /convert                       convert
//! POST   /slab                          slab
//! POST   /block                         block
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::calc;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/convert", post(calc::convert))
        .route("/slab", post(calc::slab))
        .route("/block", post(calc::block))
}
