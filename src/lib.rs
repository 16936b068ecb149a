//! Periodic synchronization of HeavyJob jobs, employees, equipment and
//! timecards into a local store.

pub mod api_client;
pub mod config;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod session;
pub mod store;
pub mod tasks;
pub mod timecards;
pub mod transform;
pub mod types;

pub use error::Error;
