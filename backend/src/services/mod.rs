//! Business logic services for the Stockroom inventory server

pub mod auth;
pub mod catalog;
pub mod reporting;
pub mod transfer;

pub use auth::AuthService;
pub use catalog::CatalogService;
pub use reporting::ReportingService;
pub use transfer::TransferService;
