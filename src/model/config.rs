//! Application configuration built from the process environment at startup

const ENV_NVD_API_KEY: &str = "NVD_API_KEY";

/// Application configuration
///
/// Built once in `main` and handed to the services that need it. Request
/// handlers never consult the environment themselves.
#[derive(Debug, Clone)]
pub struct Config {
    /// NVD API key. `None` means every fetch request will fail with an
    /// explicit missing-key error; startup still succeeds.
    pub nvd_api_key: Option<String>,
    pub port: u16,
    pub host: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            nvd_api_key: None,
            port: 8080,
            host: "127.0.0.1".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the environment
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let nvd_api_key = std::env::var(ENV_NVD_API_KEY)
            .ok()
            .filter(|k| !k.trim().is_empty());

        Self {
            nvd_api_key,
            port,
            host,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
