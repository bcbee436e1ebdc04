//! Domain models for the Stockroom inventory dashboard

mod item;
mod location;
mod purchase;
mod report;
mod user;

pub use item::*;
pub use location::*;
pub use purchase::*;
pub use report::*;
pub use user::*;
