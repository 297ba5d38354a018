//! # globo-skill-adapter-bridge-reqwest
//!
//! Bridge adapter built on [reqwest](https://docs.rs/reqwest).
//!
//! ## Responsibilities
//! - Implement the `BridgeClient` port against the Globo REST bridge
//! - Attach the static Basic-Auth header to every request
//! - Race each request against a cancel timer and an overall timeout so a
//!   call always resolves to exactly one `BackendOutcome`
//!
//! ## Dependency rule
//! Depends on `globo-skill-app` (for the port trait) and `globo-skill-domain`
//! (for requests and outcomes). Never leaks reqwest types into the domain.

pub mod client;
pub mod config;
pub mod error;

pub use client::ReqwestBridgeClient;
pub use config::BridgeConfig;
pub use error::BridgeError;
