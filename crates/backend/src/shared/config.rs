use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::path::{Path, PathBuf};

static CONFIG: OnceCell<Config> = OnceCell::new();

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub access: AccessConfig,
    /// Advisor section; absent means insights are disabled
    pub llm: Option<LlmConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AccessConfig {
    /// Shared secret for the administrative role
    pub admin_secret: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LlmConfig {
    /// Custom endpoint for OpenAI-compatible APIs; default endpoint if absent
    pub api_endpoint: Option<String>,
    pub api_key: String,
    pub model: String,
    #[serde(default = "LlmConfig::default_temperature")]
    pub temperature: f64,
    #[serde(default = "LlmConfig::default_max_tokens")]
    pub max_tokens: i32,
}

impl LlmConfig {
    fn default_temperature() -> f64 {
        0.7
    }

    fn default_max_tokens() -> i32 {
        1024
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[database]
path = "target/db/app.db"

[access]
admin_secret = "1234"
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    // Try to find config.toml next to the executable
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    // Fall back to default config
    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

/// Load the configuration once and keep it for the whole process
pub fn initialize_config() -> anyhow::Result<&'static Config> {
    if let Some(config) = CONFIG.get() {
        return Ok(config);
    }
    let config = load_config()?;
    Ok(CONFIG.get_or_init(|| config))
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}

/// Get the database file path from configuration
/// Resolves relative paths relative to the executable directory
pub fn get_database_path(config: &Config) -> anyhow::Result<PathBuf> {
    let db_path_str = &config.database.path;
    let db_path = Path::new(db_path_str);

    // If absolute path, use as is
    if db_path.is_absolute() {
        return Ok(db_path.to_path_buf());
    }

    // If relative path, resolve it relative to the executable directory
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let resolved_path = exe_dir.join(db_path);
            return Ok(resolved_path);
        }
    }

    // Fallback: use relative to current directory
    Ok(PathBuf::from(db_path_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Result<Config, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.database.path, "target/db/app.db");
        assert_eq!(config.access.admin_secret, "1234");
        assert!(config.llm.is_none());
    }

    #[test]
    fn test_llm_section_defaults() {
        let config: Config = toml::from_str(
            r#"
            [database]
            path = "target/db/app.db"

            [access]
            admin_secret = "s3cret"

            [llm]
            api_key = "sk-test"
            model = "gpt-4o-mini"
            "#,
        )
        .unwrap();
        let llm = config.llm.unwrap();
        assert_eq!(llm.temperature, 0.7);
        assert_eq!(llm.max_tokens, 1024);
        assert!(llm.api_endpoint.is_none());
    }
}
