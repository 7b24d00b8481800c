pub mod client;
pub mod config;

pub use client::{HttpApi, TransactionApi};
pub use config::ApiConfig;
