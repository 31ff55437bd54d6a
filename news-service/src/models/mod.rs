pub mod news;

pub use news::NewsEntry;
