//! HTTP handlers for the Stockroom API

mod auth;
mod health;
mod items;
mod stores;
mod warehouses;

pub use auth::*;
pub use health::*;
pub use items::*;
pub use stores::*;
pub use warehouses::*;
