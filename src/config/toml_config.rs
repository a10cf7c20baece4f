use crate::core::seed::SeedData;
use crate::utils::error::{RegistryError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_one_of, validate_unique_names, Validate,
    ValidationPolicy,
};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 2] = ["compact", "json"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub seed: SeedData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// 空白字串視為空值
    #[serde(default)]
    pub reject_blank: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "compact".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}

impl RegistryConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${NEAREST_STAR})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RegistryError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn policy(&self) -> ValidationPolicy {
        ValidationPolicy {
            reject_blank: self.validation.reject_blank,
        }
    }

    pub fn json_logs(&self) -> bool {
        self.logging.format == "json"
    }
}

impl Validate for RegistryConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("logging.level", &self.logging.level)?;
        validate_one_of(
            "logging.level",
            &self.logging.level.to_lowercase(),
            &LOG_LEVELS,
        )?;
        validate_one_of("logging.format", &self.logging.format, &LOG_FORMATS)?;

        // 任務以名稱引用行星與科學家，名稱必須唯一
        validate_unique_names(
            "seed.planets",
            self.seed.planets.iter().map(|p| p.name.as_str()),
        )?;
        validate_unique_names(
            "seed.scientists",
            self.seed
                .scientists
                .iter()
                .filter_map(|s| s.name.as_deref()),
        )?;

        Ok(())
    }
}
