use contracts::shared::debt_band::DebtBands;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub api: ApiConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub debt_bands: DebtBands,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub request_timeout_ms: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AuthConfig {
    /// localStorage keys read for the bearer token, in order
    pub token_keys: Vec<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_keys: vec!["authToken".to_string(), "token".to_string()],
        }
    }
}

fn default_timeout_ms() -> u32 {
    15_000
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
base_url = "http://localhost:8080"
request_timeout_ms = 15000

[auth]
token_keys = ["authToken", "token"]

[debt_bands]
high = 50000000
medium = 10000000
"#;

/// Parses the embedded configuration.
///
/// `AGENT_CONSOLE_API_BASE`, when set at build time, replaces `api.base_url`.
pub fn load_config() -> anyhow::Result<AppConfig> {
    let mut config = parse_config(DEFAULT_CONFIG)?;
    if let Some(base) = option_env!("AGENT_CONSOLE_API_BASE") {
        log::info!("Using API base from build environment: {}", base);
        config.api.base_url = base.to_string();
    }
    Ok(config)
}

pub fn parse_config(source: &str) -> anyhow::Result<AppConfig> {
    let config: AppConfig = toml::from_str(source)?;
    if config.debt_bands.medium > config.debt_bands.high {
        anyhow::bail!(
            "debt_bands.medium ({}) must not exceed debt_bands.high ({})",
            config.debt_bands.medium,
            config.debt_bands.high
        );
    }
    Ok(config)
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://localhost:8080".to_string(),
                request_timeout_ms: default_timeout_ms(),
            },
            auth: AuthConfig::default(),
            debt_bands: DebtBands::default(),
        }
    }
}
