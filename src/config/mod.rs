#[cfg(feature = "cli")]
pub mod cli;
pub mod pricing;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command, OutputFormat};
pub use pricing::PricingConfig;
pub use toml_config::{GeocodingConfig, LeadConfig, QuoteConfig, ServiceAreaConfig};
