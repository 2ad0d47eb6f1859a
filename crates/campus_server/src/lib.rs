//! REST surface for the campus student record manager.
//!
//! # Responsibility
//! - Map HTTP requests onto `campus_core::StudentService` use-cases.
//! - Translate service errors into status codes and JSON error bodies.
//! - Load process configuration from the environment.
//! - Publish the OpenAPI contract of every route.

pub mod app;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod openapi;
pub mod state;

pub use app::build_router;
