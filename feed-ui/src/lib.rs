pub mod app;
pub mod config;
pub mod dispatch;
pub mod logging;
pub mod models;
pub mod sessions;
pub mod state;
pub mod utils;
pub mod views;
