pub mod app_config;
pub mod error;
pub mod manager;
pub mod models;

pub use error::OrderError;
pub use manager::OrderManager;
pub use models::{MelonOrder, OrderDetails};
