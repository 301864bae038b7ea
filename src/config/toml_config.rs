use crate::config::{DEFAULT_ENDPOINT, MAX_TIMEOUT_SECONDS};
use crate::core::manager::DEFAULT_REQUIRED_DOMAINS;
use crate::core::ConfigProvider;
use crate::utils::error::{CartError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is a valid regex"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub prober: ProberConfig,
    pub cart: Option<CartConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProberConfig {
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartConfig {
    pub required_domains: Option<usize>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| CartError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DOMAIN_CART_ENDPOINT})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_endpoint("prober.endpoint", self.endpoint())?;
        validation::validate_positive_number(
            "cart.required_domains",
            self.required_domains(),
            1,
        )?;
        if let Some(timeout) = self.prober.timeout_seconds {
            validation::validate_range("prober.timeout_seconds", timeout, 1, MAX_TIMEOUT_SECONDS)?;
        }
        Ok(())
    }

    pub fn endpoint(&self) -> &str {
        self.prober.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    pub fn required_domains(&self) -> usize {
        self.cart
            .as_ref()
            .and_then(|cart| cart.required_domains)
            .unwrap_or(DEFAULT_REQUIRED_DOMAINS)
    }
}

impl ConfigProvider for TomlConfig {
    fn endpoint(&self) -> &str {
        self.endpoint()
    }

    fn required_domains(&self) -> usize {
        self.required_domains()
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.prober.timeout_seconds
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
