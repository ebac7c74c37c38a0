use crate::adapters::catalog::CatalogFormat;
use crate::adapters::nutrition::DEFAULT_USDA_ENDPOINT;
use crate::core::ConfigProvider;
use crate::utils::error::{HealthError, Result};
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_path, validate_range, validate_url,
    Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub server: HttpConfig,
    pub auth: AuthConfig,
    pub nutrition: NutritionConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_seconds: i64,
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_seconds: 3600,
            bcrypt_cost: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NutritionConfig {
    pub endpoint: String,
    pub api_key: String,
    pub timeout_seconds: u64,
}

impl Default for NutritionConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_USDA_ENDPOINT.to_string(),
            api_key: String::new(),
            timeout_seconds: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: String,
    pub catalog_file: String,
    pub ledger_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
            catalog_file: "symptoms.json".to_string(),
            ledger_file: "ledger.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub verbose: bool,
    pub json: bool,
}

impl ServerConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(HealthError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        let mut config: Self =
            toml::from_str(&processed_content).map_err(|e| HealthError::ConfigValidationError {
                field: "toml_parsing".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;
        config.apply_env_fallbacks();
        Ok(config)
    }

    /// 沒有設定檔時使用預設值與環境變數
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_fallbacks();
        config
    }

    /// 替換環境變數 (例如 ${JWT_SECRET})；未設定的變數保留原字串
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| HealthError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 空白或未替換的密鑰改從 JWT_SECRET / USDA_API_KEY 讀取
    fn apply_env_fallbacks(&mut self) {
        if is_unset(&self.auth.jwt_secret) {
            self.auth.jwt_secret = std::env::var("JWT_SECRET").unwrap_or_default();
        }
        if is_unset(&self.nutrition.api_key) {
            self.nutrition.api_key = std::env::var("USDA_API_KEY").unwrap_or_default();
        }
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        if is_unset(&self.auth.jwt_secret) {
            return Err(HealthError::MissingConfigError {
                field: "auth.jwt_secret (JWT_SECRET)".to_string(),
            });
        }

        validate_range("server.port", self.server.port, 1, u16::MAX)?;
        validate_non_empty_string("server.host", &self.server.host)?;
        validate_range("auth.token_ttl_seconds", self.auth.token_ttl_seconds, 1, 60 * 60 * 24 * 30)?;
        validate_range("auth.bcrypt_cost", self.auth.bcrypt_cost, 4, 31)?;
        validate_url("nutrition.endpoint", &self.nutrition.endpoint)?;
        validate_range("nutrition.timeout_seconds", self.nutrition.timeout_seconds, 1, 300)?;
        validate_path("storage.data_dir", &self.storage.data_dir)?;
        validate_file_extension(
            "storage.catalog_file",
            &self.storage.catalog_file,
            &CatalogFormat::EXTENSIONS,
        )?;
        validate_file_extension("storage.ledger_file", &self.storage.ledger_file, &["json"])?;

        if self.nutrition.api_key.trim().is_empty() {
            tracing::warn!("⚠️ nutrition.api_key is empty; food search requests will likely be rejected");
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn is_unset(value: &str) -> bool {
    value.trim().is_empty() || value.starts_with("${")
}

impl ConfigProvider for ServerConfig {
    fn data_dir(&self) -> &str {
        &self.storage.data_dir
    }

    fn catalog_file(&self) -> &str {
        &self.storage.catalog_file
    }

    fn ledger_file(&self) -> &str {
        &self.storage.ledger_file
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
