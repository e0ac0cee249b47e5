//! Configuration module
//!
//! Environment-driven configuration for the HTTP server, the upload registry
//! limits and the generative gateway client.

use std::collections::HashMap;
use std::env;

use crate::models::FileCategory;

const DEFAULT_PORT: u16 = 8000;
const MAX_CONCURRENT_REQUESTS: usize = 256;
const GEMINI_TIMEOUT_SECS: u64 = 120;
const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_PRO_MODEL: &str = "gemini-1.5-pro-latest";
const DEFAULT_FLASH_MODEL: &str = "gemini-1.5-flash-latest";
const DEFAULT_EMBEDDING_MODEL: &str = "embedding-001";

const BYTES_PER_MB: usize = 1024 * 1024;

/// Maximum number of files accepted by a single batch upload.
pub const MAX_BATCH_FILES: usize = 10;

/// Server-level settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub max_concurrent_requests: usize,
    /// Transport-level body cap; `None` derives it from the upload limits.
    pub max_request_body_bytes: Option<usize>,
}

/// Generative gateway client settings
#[derive(Clone, Debug)]
pub struct GatewayConfig {
    /// Absent key keeps `/ai/*` registered but answering 503.
    pub google_api_key: Option<String>,
    pub api_base: String,
    pub pro_model: String,
    pub flash_model: String,
    pub embedding_model: String,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct FilegateConfig {
    pub base: BaseConfig,
    pub gateway: GatewayConfig,
    /// Per-category size ceiling in bytes.
    pub upload_limits: HashMap<FileCategory, usize>,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<FilegateConfig>);

impl Config {
    fn inner(&self) -> &FilegateConfig {
        &self.0
    }

    pub fn new(config: FilegateConfig) -> Self {
        Config(Box::new(config))
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let environment = self.inner().base.environment.to_lowercase();
        environment == "production" || environment == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = FilegateConfig::from_env()?;
        Ok(Config::new(config))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.inner().validate()
    }

    pub fn server_port(&self) -> u16 {
        self.inner().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.inner().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.inner().base.environment
    }

    pub fn max_concurrent_requests(&self) -> usize {
        self.inner().base.max_concurrent_requests
    }

    pub fn gateway(&self) -> &GatewayConfig {
        &self.inner().gateway
    }

    pub fn google_api_key(&self) -> Option<&str> {
        self.inner().gateway.google_api_key.as_deref()
    }

    pub fn gateway_configured(&self) -> bool {
        self.google_api_key().is_some()
    }

    pub fn max_upload_bytes(&self, category: FileCategory) -> usize {
        self.inner()
            .upload_limits
            .get(&category)
            .copied()
            .unwrap_or_else(|| default_limit_bytes(category))
    }

    /// Body cap applied to every request: the largest category limit for a
    /// full batch plus 1 MB of multipart framing, unless overridden.
    /// Saturates at `usize::MAX`; `validate` rejects limits that would.
    pub fn max_request_body_bytes(&self) -> usize {
        self.inner()
            .base
            .max_request_body_bytes
            .unwrap_or_else(|| self.inner().derived_request_body_bytes().unwrap_or(usize::MAX))
    }
}

/// `None` when the byte count does not fit in `usize`.
pub fn mb_to_bytes(mb: usize) -> Option<usize> {
    mb.checked_mul(BYTES_PER_MB)
}

fn default_limit_bytes(category: FileCategory) -> usize {
    category.default_max_size_mb() * BYTES_PER_MB
}

fn parse_mb(name: &str, default_mb: Option<usize>) -> Result<Option<usize>, anyhow::Error> {
    let Some(mb) = env::var(name)
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .or(default_mb)
    else {
        return Ok(None);
    };
    mb_to_bytes(mb)
        .map(Some)
        .ok_or_else(|| anyhow::anyhow!("{} is too large: {} MB overflows the byte count", name, mb))
}

impl Default for FilegateConfig {
    fn default() -> Self {
        Self {
            base: BaseConfig {
                server_port: DEFAULT_PORT,
                cors_origins: vec!["*".to_string()],
                environment: "development".to_string(),
                max_concurrent_requests: MAX_CONCURRENT_REQUESTS,
                max_request_body_bytes: None,
            },
            gateway: GatewayConfig {
                google_api_key: None,
                api_base: DEFAULT_GEMINI_API_BASE.to_string(),
                pro_model: DEFAULT_PRO_MODEL.to_string(),
                flash_model: DEFAULT_FLASH_MODEL.to_string(),
                embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
                timeout_secs: GEMINI_TIMEOUT_SECS,
            },
            upload_limits: FileCategory::ALL
                .into_iter()
                .map(|c| (c, default_limit_bytes(c)))
                .collect(),
        }
    }
}

impl FilegateConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins: Vec<String> = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let base = BaseConfig {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
            max_concurrent_requests: env::var("MAX_CONCURRENT_REQUESTS")
                .unwrap_or_else(|_| MAX_CONCURRENT_REQUESTS.to_string())
                .parse()
                .unwrap_or(MAX_CONCURRENT_REQUESTS),
            max_request_body_bytes: parse_mb("MAX_REQUEST_BODY_MB", None)?,
        };

        let gateway = GatewayConfig {
            google_api_key: env::var("GOOGLE_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            api_base: env::var("GEMINI_API_BASE")
                .unwrap_or_else(|_| DEFAULT_GEMINI_API_BASE.to_string()),
            pro_model: env::var("GEMINI_PRO_MODEL")
                .unwrap_or_else(|_| DEFAULT_PRO_MODEL.to_string()),
            flash_model: env::var("GEMINI_FLASH_MODEL")
                .unwrap_or_else(|_| DEFAULT_FLASH_MODEL.to_string()),
            embedding_model: env::var("GEMINI_EMBEDDING_MODEL")
                .unwrap_or_else(|_| DEFAULT_EMBEDDING_MODEL.to_string()),
            timeout_secs: env::var("GEMINI_TIMEOUT_SECS")
                .unwrap_or_else(|_| GEMINI_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(GEMINI_TIMEOUT_SECS),
        };

        let upload_limits = FileCategory::ALL
            .into_iter()
            .map(|category| {
                let name = format!("MAX_{}_SIZE_MB", category.as_str().to_uppercase());
                let bytes = parse_mb(&name, Some(category.default_max_size_mb()))?
                    .unwrap_or_else(|| default_limit_bytes(category));
                Ok((category, bytes))
            })
            .collect::<Result<HashMap<_, _>, anyhow::Error>>()?;

        Ok(Self {
            base,
            gateway,
            upload_limits,
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.base.server_port == 0 {
            return Err(anyhow::anyhow!("PORT must be greater than zero"));
        }

        let environment = self.base.environment.to_lowercase();
        let is_production = environment == "production" || environment == "prod";
        if is_production && self.base.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        if let Some((category, _)) = self.upload_limits.iter().find(|(_, max)| **max == 0) {
            return Err(anyhow::anyhow!(
                "MAX_{}_SIZE_MB must be greater than zero",
                category.as_str().to_uppercase()
            ));
        }

        if self.base.max_request_body_bytes.is_none() && self.derived_request_body_bytes().is_none()
        {
            return Err(anyhow::anyhow!(
                "Upload size limits are too large to derive a request body limit; lower MAX_<CATEGORY>_SIZE_MB or set MAX_REQUEST_BODY_MB"
            ));
        }

        Ok(())
    }

    /// Largest category limit times a full batch, plus 1 MB of framing.
    fn derived_request_body_bytes(&self) -> Option<usize> {
        let largest = FileCategory::ALL
            .into_iter()
            .map(|c| {
                self.upload_limits
                    .get(&c)
                    .copied()
                    .unwrap_or_else(|| default_limit_bytes(c))
            })
            .max()
            .unwrap_or(0);
        largest
            .checked_mul(MAX_BATCH_FILES)?
            .checked_add(BYTES_PER_MB)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits_match_categories() {
        let config = Config::new(FilegateConfig::default());
        assert_eq!(config.max_upload_bytes(FileCategory::Image), 10 * 1024 * 1024);
        assert_eq!(config.max_upload_bytes(FileCategory::Video), 100 * 1024 * 1024);
        assert_eq!(config.max_upload_bytes(FileCategory::Json), 5 * 1024 * 1024);
        assert!(!config.gateway_configured());
    }

    #[test]
    fn test_request_body_cap_covers_a_full_batch() {
        let config = Config::new(FilegateConfig::default());
        let expected = 100 * 1024 * 1024 * MAX_BATCH_FILES + 1024 * 1024;
        assert_eq!(config.max_request_body_bytes(), expected);
    }

    #[test]
    fn test_validate_rejects_wildcard_cors_in_production() {
        let mut inner = FilegateConfig::default();
        inner.base.environment = "production".to_string();
        let config = Config::new(inner);
        assert!(config.is_production());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_defaults() {
        let config = Config::new(FilegateConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_mb_to_bytes_overflow() {
        assert_eq!(mb_to_bytes(2), Some(2 * 1024 * 1024));
        assert_eq!(mb_to_bytes(usize::MAX), None);
    }

    #[test]
    fn test_validate_rejects_overflowing_upload_limit() {
        let mut inner = FilegateConfig::default();
        inner.upload_limits.insert(FileCategory::Video, usize::MAX / 2);
        let config = Config::new(inner);
        assert!(config.validate().is_err());
        assert_eq!(config.max_request_body_bytes(), usize::MAX);

        let mut inner = FilegateConfig::default();
        inner.upload_limits.insert(FileCategory::Video, usize::MAX / 2);
        inner.base.max_request_body_bytes = Some(50 * 1024 * 1024);
        assert!(Config::new(inner).validate().is_ok());
    }

    #[test]
    fn test_parse_mb_rejects_overflow() {
        std::env::set_var("FILEGATE_TEST_HUGE_MB", usize::MAX.to_string());
        assert!(parse_mb("FILEGATE_TEST_HUGE_MB", None).is_err());
        std::env::set_var("FILEGATE_TEST_SMALL_MB", "3");
        assert_eq!(
            parse_mb("FILEGATE_TEST_SMALL_MB", None).unwrap(),
            Some(3 * 1024 * 1024)
        );
        assert_eq!(parse_mb("FILEGATE_TEST_UNSET_MB", Some(1)).unwrap(), Some(1024 * 1024));
        assert_eq!(parse_mb("FILEGATE_TEST_UNSET_MB", None).unwrap(), None);
    }
}
