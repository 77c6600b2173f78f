pub mod calc;
pub mod drafts;
pub mod forms;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /calc/convert                                    convert a value between units
/// /calc/slab                                       slab area and amount
/// /calc/block                                      block volume and weight
///
/// /forms                                           open a form session (POST)
/// /forms/{id}                                      get, discard
/// /forms/{id}/rows                                 append a row (POST)
/// /forms/{id}/rows/{index}                         replace, set field, delete
/// /forms/{id}/apply-all                            set one field on every row
/// /forms/{id}/trim                                 set slab trim (PUT)
/// /forms/{id}/resize                               request a new row count
/// /forms/{id}/resize/confirm                       confirm a pending shrink
/// /forms/{id}/resize/cancel                        cancel a pending shrink
/// /forms/{id}/metrics                              per-row metrics and totals
/// /forms/{id}/submit                               build the backend request
///
/// /drafts/{scope}/{key}                            save, load, clear a draft
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/calc", calc::router())
        .nest("/forms", forms::router())
        .nest("/drafts", drafts::router())
}
