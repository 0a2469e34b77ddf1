//! Configuration loading for Lockbox.

pub mod settings;

pub use settings::Settings;
