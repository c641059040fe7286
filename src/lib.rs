pub mod assistant;
pub mod config;
pub mod db;
pub mod error;
pub mod jungle;
pub mod logging;
pub mod metrics;
pub mod riot;
pub mod routes;
pub mod setup;
pub mod state;
