//! # globo-skill-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Accept one directive envelope per `POST /directive` and answer with
//!   exactly one assistant response (HTTP 200, even for error responses)
//! - Reject bodies that are not a directive envelope with `400` and a JSON
//!   `{"error": ...}` body
//! - Expose `GET /health` for liveness probes
//! - Tag every invocation with a fresh id in the tracing span
//!
//! ## Dependency rule
//! Depends on `globo-skill-app` (for the directive router and the bridge
//! port) and `globo-skill-domain` (for the envelope and response types).
//! Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
