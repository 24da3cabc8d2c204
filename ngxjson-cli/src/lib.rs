//! CLI library for testing purposes

pub mod config;
pub mod export;
pub mod import;
pub mod validation;
pub mod view;

pub use config::{Config, ProjectOptions, Settings};
pub use view::truncate_to_width;
