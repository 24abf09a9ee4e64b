//! Configuration loading for the payroll engine.
//!
//! This module loads engine-wide statutory constants (Professional Tax
//! and TDS thresholds, fallback base salary, batch driver defaults, the
//! system-default shift) from a YAML file.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/engine.yaml").unwrap();
//! println!("PT amount: {}", config.config().pt_amount);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::EngineConfig;
