//! service-core: Shared infrastructure for the news services.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
