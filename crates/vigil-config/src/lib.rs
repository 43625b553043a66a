pub mod config;
pub mod loader;
pub mod validate;

pub use config::{Config, RuleConfig, ScanConfig};
pub use loader::load_config;
pub use validate::validate_config;
