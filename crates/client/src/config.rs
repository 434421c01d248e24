use std::path::PathBuf;

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root, without a trailing slash (e.g. `http://localhost:3000`).
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// JSON file holding the favorite animal ids.
    pub favorites_path: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout_secs: 15,
            favorites_path: PathBuf::from("dogland-favorites.json"),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env var                    | Default                  |
    /// |----------------------------|--------------------------|
    /// | `DOGLAND_API_URL`          | `http://localhost:3000`  |
    /// | `DOGLAND_TIMEOUT_SECS`     | `15`                     |
    /// | `DOGLAND_FAVORITES_PATH`   | `dogland-favorites.json` |
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let base_url = std::env::var("DOGLAND_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.base_url);

        let timeout_secs = std::env::var("DOGLAND_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.timeout_secs);

        let favorites_path = std::env::var("DOGLAND_FAVORITES_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.favorites_path);

        Self {
            base_url,
            timeout_secs,
            favorites_path,
        }
    }
}
