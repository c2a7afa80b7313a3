#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command, ConsentAction};
pub use toml_config::{LoggingConfig, ShopConfig, StorageBackend, StorageConfig};
