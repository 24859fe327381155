//! Configuration loading for the payroll service.
//!
//! Settings come from a single YAML file. Missing sections and fields take
//! their defaults.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load_or_default("./config/payroll.yaml").unwrap();
//! println!("Currency: {}", config.config().payslip.currency_symbol);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, LoggingConfig, PayslipConfig, ServerConfig};
