pub mod config;
pub mod db;
pub mod health;
pub mod middleware;
pub mod models;
pub mod params;
pub mod repos;
pub mod routes;
pub mod services;
pub mod store;

pub use routes::app;
pub use store::{DataAccessError, InMemoryReportingStore, PgReportingStore, ReportingStore};
