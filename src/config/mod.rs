//! Configuration module for Freelance CLI
//!
//! This module provides configuration management including:
//! - Data directory resolution
//! - Business settings persistence

pub mod paths;
pub mod settings;

pub use paths::FreelancePaths;
pub use settings::{Settings, SettingsUpdate};
