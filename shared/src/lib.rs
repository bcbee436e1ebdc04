//! Shared types and models for the Stockroom inventory dashboard
//!
//! This crate contains the wire models exchanged with the inventory API,
//! plus the pure chart and dashboard logic used by the client and the
//! browser front-end (via WASM).

pub mod chart;
pub mod dashboard;
pub mod models;
pub mod types;
pub mod validation;

pub use chart::*;
pub use dashboard::*;
pub use models::*;
pub use types::*;
pub use validation::*;
