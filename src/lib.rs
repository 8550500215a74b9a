pub mod config;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod metrics;
pub mod parser;
pub mod plugin;
pub mod transport;
pub mod utils;
pub mod validate;
