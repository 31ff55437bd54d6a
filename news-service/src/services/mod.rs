pub mod metrics;
pub mod news;
pub mod store;

pub use self::metrics::{get_metrics, init_metrics};
pub use news::{NewsFeed, NEWS_KEY};
pub use store::{InMemoryNewsStore, NewsStore, RedisNewsStore};
