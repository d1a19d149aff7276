pub mod catalog;
pub mod commands;
pub mod config;
pub mod extractor;
pub mod fs;
pub mod logging;
