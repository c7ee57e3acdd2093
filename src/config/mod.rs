//! Configuration module for Spendbook
//!
//! - Platform path resolution for the config directory
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::SpendbookPaths;
pub use settings::Settings;
