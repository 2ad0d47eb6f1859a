//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate gateway calls, merge and validation into use-case APIs.
//! - Keep HTTP and other outer layers decoupled from storage details.

pub mod student_service;
