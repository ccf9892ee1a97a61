pub mod catalog;
pub mod config;
pub mod search;
pub mod traits;
pub mod types;
