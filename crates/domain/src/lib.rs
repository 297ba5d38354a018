//! # globo-skill-domain
//!
//! Pure domain model for the Globo smart-home skill adapter.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, timestamps
//! - Define **Directives** (incoming assistant requests) with closed name variants
//! - Define the static **Endpoint** catalog (light, fan) and its capabilities
//! - Map directives onto **Device commands** (range validation, power-level bucketing)
//! - Translate raw bridge **status strings** into reportable properties
//! - Normalise bridge results into a **Backend outcome** and map failures to
//!   assistant error kinds
//! - Build the assistant **Response** envelopes
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod time;

pub mod command;
pub mod directive;
pub mod endpoint;
pub mod outcome;
pub mod response;
pub mod status;
