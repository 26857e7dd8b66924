pub mod defaults;
pub mod types;

pub use defaults::default_endpoints;
pub use types::{Config, ConfigError};
