//! Stockroom inventory client
//!
//! Async client for the inventory dashboard API: transfer operations
//! (receive, ship, sell), the aggregation queries behind the charts, and a
//! dashboard session that caches aggregates between transfers.

pub mod api;
pub mod config;
pub mod error;
pub mod session;

pub use api::{HealthStatus, InventoryClient};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use session::{DashboardSession, TransferFormInput, TransferOutcome};
