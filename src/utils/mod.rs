//! Shared utilities
//!
//! - [`config`] - User configuration (stored under the platform config dir)
//! - [`progress`] - Progress bars that compile away without the `progress` feature

pub mod config;
pub mod progress;

pub use config::*;
