pub mod analytics;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod members;
pub mod messages;
pub mod projects;
pub mod tasks;

pub use client::ApiClient;
pub use config::ApiConfig;
pub use error::ApiError;
