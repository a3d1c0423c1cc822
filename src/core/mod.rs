pub mod config;
pub mod db;
pub mod retry;

pub use config::AppConfig;
pub use retry::{RetryPolicy, retry};
