// src/config/mod.rs
// All tunables come from the environment (with .env support), loaded once at
// startup into a read-only struct.

use once_cell::sync::Lazy;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct AppConfig {
    // ── Server
    pub host: String,
    pub port: u16,
    pub cors_origin: String,

    // ── Database
    pub database_url: String,
    pub sqlite_max_connections: u32,

    // ── Model provider
    pub openai_base_url: String,
    pub openai_timeout_secs: u64,

    // ── Context pipeline
    /// Messages of history loaded per request.
    pub history_message_cap: i64,
    /// User messages analyzed when building a profile.
    pub profile_message_cap: i64,
    /// Upper bound on the composed prompt, in estimated tokens.
    pub prompt_token_budget: usize,

    // ── Persona style examples (optional, scraped offline)
    pub persona_data_dir: String,

    // ── Logging
    pub log_level: String,
}

fn env_var_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    match std::env::var(key) {
        Ok(val) => {
            let clean_val = val.split('#').next().unwrap_or("").trim();
            clean_val.parse::<T>().unwrap_or(default)
        }
        Err(_) => default,
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        // Not an error if missing; plain environment variables still apply.
        let _ = dotenvy::dotenv();

        Self {
            host: env_var_or("GURUKUL_HOST", "0.0.0.0".to_string()),
            port: env_var_or("GURUKUL_PORT", 3001),
            cors_origin: env_var_or("GURUKUL_CORS_ORIGIN", "http://localhost:3000".to_string()),
            database_url: env_var_or("DATABASE_URL", "sqlite:./gurukul.db".to_string()),
            sqlite_max_connections: env_var_or("SQLITE_MAX_CONNECTIONS", 10),
            openai_base_url: env_var_or(
                "OPENAI_BASE_URL",
                "https://api.openai.com/v1".to_string(),
            ),
            openai_timeout_secs: env_var_or("OPENAI_TIMEOUT", 60),
            history_message_cap: env_var_or("GURUKUL_HISTORY_CAP", 20),
            profile_message_cap: env_var_or("GURUKUL_PROFILE_CAP", 100),
            prompt_token_budget: env_var_or("GURUKUL_PROMPT_TOKEN_BUDGET", 24000),
            persona_data_dir: env_var_or("GURUKUL_PERSONA_DATA_DIR", "./data".to_string()),
            log_level: env_var_or("GURUKUL_LOG_LEVEL", "info".to_string()),
        }
    }

    /// Server bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// Global config instance - loaded once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = AppConfig::from_env();
        assert_eq!(config.history_message_cap, 20);
        assert_eq!(config.profile_message_cap, 100);
        assert!(config.prompt_token_budget > 0);
    }

    #[test]
    fn test_bind_address() {
        let config = AppConfig::from_env();
        assert!(config.bind_address().contains(':'));
    }
}
