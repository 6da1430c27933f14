pub mod command;
pub mod config;
pub mod entry;
pub mod render;
