//! HTTP handlers for news-service.

pub mod health;
pub mod metrics;
pub mod news;

pub use health::health_check;
pub use self::metrics::metrics;
pub use news::{create_news, list_news};
