pub mod models;
pub mod presentation;
pub mod service;

pub use models::*;
pub use service::{FeedService, ServiceConfig, ServiceError};
