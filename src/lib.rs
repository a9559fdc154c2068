pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod services;
pub mod utils;

pub use config::ResizeConfig;
pub use error::{ResizeError, Result};
pub use models::ResizeResponse;
pub use services::resize_service::ResizeService;
