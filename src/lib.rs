pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::HttpAvailabilityProber;
pub use config::toml_config::TomlConfig;
pub use crate::core::manager::{CartEvent, CartManager, PendingProbe, ProbeOutcome};
pub use crate::core::{AvailabilityProber, AvailabilityStatus, CartEntry, ConfigProvider, Domain};
pub use utils::error::{CartError, Result};
