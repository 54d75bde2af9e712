use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Recommendation API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Number of recommendations requested per submission
    #[serde(default = "default_top_k")]
    pub top_k: u32,
}

fn default_api_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_top_k() -> u32 {
    5
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
