use std::time::Duration;

use reqwest::Url;

use crate::client::error::config::ConfigError;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Runtime configuration of the admin client
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the marketplace API, e.g. `http://localhost:5000/api`
    pub api_url: String,
    /// Static bearer token used when no interactive session is available
    pub api_token: Option<String>,
    /// Upper bound for every request (seconds)
    pub request_timeout_secs: u64,
    /// Hosts remote images may be rendered from; `*` matches any host
    pub image_hosts: Vec<String>,
}

impl Config {
    /// Create a configuration for `api_url` with defaults for everything else
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            api_token: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            image_hosts: Vec::new(),
        }
    }

    /// Read configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` beforehand to pick up a local `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, which returns the value of an environment variable
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = lookup("ADMIN_API_URL")
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("ADMIN_API_URL".to_string()))?;

        let mut config = Self::new(api_url);
        config.api_base_url()?;
        config.api_token = lookup("ADMIN_API_TOKEN").filter(|token| !token.is_empty());

        if let Some(raw) = lookup("ADMIN_REQUEST_TIMEOUT_SECS") {
            config.request_timeout_secs = match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::InvalidEnvValue {
                        var: "ADMIN_REQUEST_TIMEOUT_SECS".to_string(),
                        reason: format!("expected a positive number of seconds, got {:?}", raw),
                    })
                }
            };
        }

        if let Some(raw) = lookup("ADMIN_IMAGE_HOSTS") {
            config.image_hosts = raw
                .split(',')
                .map(str::trim)
                .filter(|host| !host.is_empty())
                .map(str::to_string)
                .collect();
        }

        Ok(config)
    }

    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Parse `api_url` into the base every request path is joined onto
    ///
    /// # Returns
    /// - `Ok(Url)` - An `http` or `https` URL
    /// - `Err(ConfigError::InvalidEnvValue)` - The URL does not parse or has another scheme
    pub fn api_base_url(&self) -> Result<Url, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidEnvValue {
            var: "ADMIN_API_URL".to_string(),
            reason,
        };

        let url = Url::parse(&self.api_url).map_err(|e| invalid(e.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(invalid(format!(
                "scheme must be http or https, got {}",
                scheme
            ))),
        }
    }

    /// Whether an image at `url` may be rendered
    pub fn is_allowed_image_host(&self, url: &str) -> bool {
        let Some(host) = Url::parse(url)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
        else {
            return false;
        };

        self.image_hosts
            .iter()
            .any(|allowed| allowed == "*" || allowed.eq_ignore_ascii_case(&host))
    }
}
