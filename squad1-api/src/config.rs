/// Configuration management for the API server
///
/// This module loads configuration from environment variables and provides
/// a type-safe configuration struct.
///
/// # Environment Variables
///
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 8080)
/// - `CORS_ORIGINS`: Comma-separated allowed origins (default: `*`)
/// - `PRODUCTION`: Enables HSTS (default: false)
/// - `SQUAD1_DB_PATH`: JSON dataset file; unset keeps the dataset in memory
/// - `NUGGET_CLIENT_ID`: Numeric Nugget client id (default: 0)
/// - `NUGGET_BASIC_AUTH_TOKEN`: Credential sent to the Nugget auth API
/// - `NUGGET_AUTH_URL`: Nugget access-token endpoint
/// - `NUGGET_DOMAIN`: Nugget tenant prefix for the widget script (default: security)
/// - `NUGGET_TIMEOUT_SECS`: Upstream request timeout (default: 10)
/// - `CHAT_MODE`: `nugget` or `scripted` (default: nugget)
/// - `RUST_LOG`: Log level (default: squad1_api=debug,tower_http=debug)
///
/// # Example
///
/// ```no_run
/// use squad1_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}:{}", config.api.host, config.api.port);
/// # Ok(())
/// # }
/// ```

use secrecy::SecretString;
use serde::Serialize;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Default Nugget access-token endpoint
pub const DEFAULT_NUGGET_AUTH_URL: &str =
    "https://api.nugget.com/unified-support/auth/users/getAccessToken";

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Dataset storage configuration
    pub store: StoreConfig,

    /// Nugget chat vendor configuration
    pub nugget: NuggetConfig,

    /// Landing page chat configuration
    pub chat: ChatConfig,
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins (`*` for permissive)
    pub cors_origins: Vec<String>,

    /// Production mode (enables HSTS)
    pub production: bool,
}

/// Dataset storage configuration
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    /// JSON file path; `None` keeps everything in memory
    pub db_path: Option<PathBuf>,
}

/// Nugget chat vendor configuration
#[derive(Debug, Clone)]
pub struct NuggetConfig {
    /// Numeric client id included in token requests
    pub client_id: i64,

    /// Credential sent verbatim as the `Authorization` header
    ///
    /// Never logged and never returned to callers.
    pub auth_token: SecretString,

    /// Access-token endpoint
    pub auth_url: String,

    /// Tenant prefix, as in `https://<domain>.nugget.com`
    pub domain: String,

    /// Upstream request timeout in seconds
    pub timeout_secs: u64,
}

impl NuggetConfig {
    /// URL of the embeddable chat script
    pub fn script_url(&self) -> String {
        format!("https://{}.nugget.com/user/chat-embed.js", self.domain)
    }
}

/// Which chat the landing page shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMode {
    /// Embedded Nugget widget
    Nugget,

    /// Local scripted assistant
    Scripted,
}

impl FromStr for ChatMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nugget" => Ok(ChatMode::Nugget),
            "scripted" => Ok(ChatMode::Scripted),
            other => anyhow::bail!("CHAT_MODE must be 'nugget' or 'scripted', got '{}'", other),
        }
    }
}

/// Landing page chat configuration
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Chat implementation shown on the page
    pub mode: ChatMode,

    /// DOM id of the embedded widget container
    pub container_id: String,

    /// How long the vendor script waits for the container, in milliseconds
    pub container_timeout_ms: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            mode: ChatMode::Nugget,
            container_id: "nugget-embedded-container".to_string(),
            container_timeout_ms: 5000,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Environment variables have invalid values
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let api_port = env::var("API_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()?;

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let production = env::var("PRODUCTION")
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let db_path = env::var("SQUAD1_DB_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let client_id = env::var("NUGGET_CLIENT_ID")
            .unwrap_or_else(|_| "0".to_string())
            .parse::<i64>()?;

        let auth_token = SecretString::from(env::var("NUGGET_BASIC_AUTH_TOKEN").unwrap_or_default());
        if env::var("NUGGET_BASIC_AUTH_TOKEN").is_err() {
            tracing::warn!("NUGGET_BASIC_AUTH_TOKEN is not set; token requests will be rejected upstream");
        }

        let auth_url =
            env::var("NUGGET_AUTH_URL").unwrap_or_else(|_| DEFAULT_NUGGET_AUTH_URL.to_string());
        let domain = env::var("NUGGET_DOMAIN").unwrap_or_else(|_| "security".to_string());
        let timeout_secs = env::var("NUGGET_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u64>()?;

        let mode = match env::var("CHAT_MODE") {
            Ok(v) => v.parse::<ChatMode>()?,
            Err(_) => ChatMode::Nugget,
        };

        Ok(Self {
            api: ApiConfig {
                host: api_host,
                port: api_port,
                cors_origins,
                production,
            },
            store: StoreConfig { db_path },
            nugget: NuggetConfig {
                client_id,
                auth_token,
                auth_url,
                domain,
                timeout_secs,
            },
            chat: ChatConfig {
                mode,
                ..ChatConfig::default()
            },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                cors_origins: vec!["*".to_string()],
                production: false,
            },
            store: StoreConfig::default(),
            nugget: NuggetConfig {
                client_id: 9,
                auth_token: SecretString::from("Basic dGVzdDp0ZXN0".to_string()),
                auth_url: DEFAULT_NUGGET_AUTH_URL.to_string(),
                domain: "security".to_string(),
                timeout_secs: 10,
            },
            chat: ChatConfig::default(),
        }
    }

    #[test]
    fn test_bind_address() {
        assert_eq!(config().bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_script_url() {
        assert_eq!(
            config().nugget.script_url(),
            "https://security.nugget.com/user/chat-embed.js"
        );
    }

    #[test]
    fn test_debug_redacts_credential() {
        let rendered = format!("{:?}", config());
        assert!(!rendered.contains("dGVzdDp0ZXN0"));
    }

    #[test]
    fn test_chat_mode_parse() {
        assert_eq!("Scripted".parse::<ChatMode>().unwrap(), ChatMode::Scripted);
        assert_eq!("nugget".parse::<ChatMode>().unwrap(), ChatMode::Nugget);
        assert!("voice".parse::<ChatMode>().is_err());
    }
}
