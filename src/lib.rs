pub mod commands;
pub mod config;
pub mod console;
pub mod error;
pub mod llm;
pub mod palette;
pub mod quiz;
pub mod score;
pub mod utils;
