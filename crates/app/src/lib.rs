//! # globo-skill-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **driven port** adapters must implement:
//!   - `BridgeClient`: issue one request against the Globo bridge and
//!     normalise the result into a `BackendOutcome`
//! - Define the **driving use-case**:
//!   - `DirectiveRouter`: dispatch a directive by name and endpoint, call the
//!     bridge, and assemble exactly one response
//!
//! ## Dependency rule
//! Depends on `globo-skill-domain` only (plus `tracing`).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
