pub mod config;
pub mod contacts;
pub mod health;
pub mod import;
pub mod stats;
pub mod text;
