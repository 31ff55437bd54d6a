pub mod news;

pub use news::CreateNewsRequest;
