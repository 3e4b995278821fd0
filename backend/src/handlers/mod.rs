pub mod assistant;
pub mod audio;
pub mod auth;
pub mod config;
pub mod database;
pub mod prompts;
