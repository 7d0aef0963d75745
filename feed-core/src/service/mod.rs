pub mod config;
pub mod feed_service;

pub use config::ServiceConfig;
pub use feed_service::{FeedService, ServiceError};
