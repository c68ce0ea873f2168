pub mod analysis;
pub mod api;
pub mod data_collector;
pub mod error;
pub mod health;
pub mod logging;
pub mod models;
pub mod report;
pub mod scheduler;
pub mod screening;
pub mod ticker_source;
pub mod utils;
