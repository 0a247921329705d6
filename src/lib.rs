// opti-week/client/src/lib.rs
pub mod config;
pub mod error_handler;
pub mod models;
pub mod services;

pub use config::ApiConfig;
pub use error_handler::ClientError;
pub use services::task_service::{delete_scheduled_task, fetch_tasks, TaskService};
