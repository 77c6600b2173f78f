//! Stoneyard API server library.
//!
//! Exposes the core building blocks (config, state, error handling, routes,
//! form and draft stores) so integration tests and the binary entrypoint
//! can both access them.

pub mod config;
pub mod drafts;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod state;
