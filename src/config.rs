use color_eyre::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server origin; requests go to `{base_url}/api/...`
    pub base_url: Option<String>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        // Use ~/.config instead of platform-specific directory
        let home_dir = dirs::home_dir()
            .ok_or_else(|| color_eyre::eyre::eyre!("Could not find home directory"))?;

        let app_dir = home_dir.join(".config").join("lazy-grades-tui");

        if !app_dir.exists() {
            fs::create_dir_all(&app_dir)?;
        }

        Ok(app_dir.join("config.toml"))
    }

    /// Load config from file, or return default if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&config_path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        let toml_string = toml::to_string_pretty(self)?;
        fs::write(&config_path, toml_string)?;
        Ok(())
    }

    /// Normalize and store the server URL, then save
    pub fn set_base_url(&mut self, base_url: &str) -> Result<()> {
        self.server.base_url = Some(normalize_base_url(base_url));
        self.save()
    }
}

/// Simple URL validation
pub fn validate_url(url: &str) -> Result<(), String> {
    if url.is_empty() {
        return Err("URL cannot be empty".to_string());
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err("URL must start with http:// or https://".to_string());
    }

    if url::Url::parse(url).is_err() {
        return Err("Invalid URL format".to_string());
    }

    Ok(())
}

/// Reduce a URL to scheme, host, port and path, without a trailing slash.
/// Example: http://localhost:5000/?x=1 -> http://localhost:5000
pub fn normalize_base_url(base_url: &str) -> String {
    let trimmed = base_url.trim();
    if let Ok(parsed) = url::Url::parse(trimmed) {
        let scheme = parsed.scheme();
        let host = parsed.host_str().unwrap_or("localhost");
        let path = parsed.path().trim_end_matches('/');

        if let Some(port) = parsed.port() {
            format!("{scheme}://{host}:{port}{path}")
        } else {
            format!("{scheme}://{host}{path}")
        }
    } else {
        // Fallback: keep what the user typed if parsing fails
        trimmed.trim_end_matches('/').to_string()
    }
}
