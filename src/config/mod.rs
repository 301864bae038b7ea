pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/check-domain";
pub const MAX_TIMEOUT_SECONDS: u64 = 300;

#[cfg(feature = "cli")]
mod cli {
    use super::{DEFAULT_ENDPOINT, MAX_TIMEOUT_SECONDS};
    use crate::core::ConfigProvider;
    use crate::utils::error::Result;
    use crate::utils::validation::{self, Validate};
    use clap::Parser;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "domain-cart")]
    #[command(about = "Assemble a cart of domain names and check their availability")]
    pub struct CliConfig {
        /// Availability check endpoint, called as GET <endpoint>?domain=<name>
        #[arg(long, env = "DOMAIN_CART_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
        pub endpoint: String,

        /// Number of domains a purchasable cart must contain
        #[arg(long, default_value = "5")]
        pub required: usize,

        /// HTTP timeout for each availability check (1-300)
        #[arg(long)]
        pub timeout_seconds: Option<u64>,

        /// Load settings from a TOML file instead of the flags above
        #[arg(short, long)]
        pub config: Option<String>,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON")]
        pub json_logs: bool,
    }

    impl ConfigProvider for CliConfig {
        fn endpoint(&self) -> &str {
            &self.endpoint
        }

        fn required_domains(&self) -> usize {
            self.required
        }

        fn timeout_seconds(&self) -> Option<u64> {
            self.timeout_seconds
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validation::validate_endpoint("endpoint", &self.endpoint)?;
            validation::validate_positive_number("required", self.required, 1)?;
            if let Some(timeout) = self.timeout_seconds {
                validation::validate_range("timeout_seconds", timeout, 1, MAX_TIMEOUT_SECONDS)?;
            }
            Ok(())
        }
    }

}
