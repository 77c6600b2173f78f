//! Request handlers.
//!
//! Handlers stay thin: they validate the request body, run the operation
//! from `stoneyard_core` against shared state and map errors via
//! [`AppError`](crate::error::AppError).

pub mod calc;
pub mod drafts;
pub mod forms;
