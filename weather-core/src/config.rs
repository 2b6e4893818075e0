use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// How the dashboard reaches the weather provider.
///
/// `Direct` calls the upstream API with a client-held key and is meant for
/// trusted local setups. `Proxy` routes through the relay endpoint, which
/// holds the key server-side. The mode is resolved once at startup, never
/// per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointMode {
    Direct,
    Proxy,
}

impl EndpointMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndpointMode::Direct => "direct",
            EndpointMode::Proxy => "proxy",
        }
    }

    pub const fn all() -> &'static [EndpointMode] {
        &[EndpointMode::Direct, EndpointMode::Proxy]
    }
}

impl std::fmt::Display for EndpointMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for EndpointMode {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "direct" => Ok(EndpointMode::Direct),
            "proxy" => Ok(EndpointMode::Proxy),
            _ => Err(anyhow!("Unknown endpoint mode '{value}'. Supported modes: direct, proxy.")),
        }
    }
}

/// Direct-call configuration: client-held API key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectConfig {
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    // Free-tier Weatherstack only serves plaintext HTTP; the proxy exists to
    // keep that leg off secure origins.
    "http://api.weatherstack.com".to_string()
}

impl DirectConfig {
    pub fn new(api_key: String) -> Self {
        Self { api_key, base_url: default_base_url() }
    }
}

/// Proxied-call configuration: URL of the relay endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyClientConfig {
    pub url: String,
}

/// Fixed position for the "locate me" shortcut on setups without a
/// geolocation backend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LocationConfig {
    pub latitude: f64,
    pub longitude: f64,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// City fetched on startup when no last search is persisted.
    pub default_city: Option<String>,

    /// Optional explicit endpoint mode, "direct" or "proxy".
    pub mode: Option<String>,

    pub direct: Option<DirectConfig>,
    pub proxy: Option<ProxyClientConfig>,
    pub location: Option<LocationConfig>,
}

pub const FALLBACK_CITY: &str = "London";

impl Config {
    /// Resolve the endpoint mode: an explicit `mode` wins, otherwise it is
    /// inferred from whichever section is configured.
    pub fn endpoint_mode(&self) -> Result<EndpointMode> {
        if let Some(s) = self.mode.as_deref() {
            return EndpointMode::try_from(s);
        }

        if self.direct.is_some() {
            Ok(EndpointMode::Direct)
        } else if self.proxy.is_some() {
            Ok(EndpointMode::Proxy)
        } else {
            Err(anyhow!(
                "No endpoint configured.\n\
                 Hint: run `weather configure` to set an API key or a proxy URL first."
            ))
        }
    }

    pub fn default_city(&self) -> &str {
        self.default_city.as_deref().unwrap_or(FALLBACK_CITY)
    }

    pub fn set_mode(&mut self, mode: EndpointMode) {
        self.mode = Some(mode.as_str().to_string());
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-dash", "weather-dash")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
