pub mod admin;
pub mod config;
pub mod migrate;
pub mod ping;
