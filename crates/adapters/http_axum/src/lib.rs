//! # workmate-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **JSON API**: submit a chat message, read the conversation
//!   log, execute an entry's automation steps, list task suggestions
//! - Serve the **SSE stream** of domain events for live progress rendering
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and errors into HTTP responses
//!
//! ## Dependency rule
//! Depends on `workmate-app` (for port traits and services) and
//! `workmate-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
