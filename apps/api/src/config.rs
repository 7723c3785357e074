use anyhow::{Context, Result};

pub const DEFAULT_DATABASE_PATH: &str = "resume.db";
pub const DEFAULT_FRONTEND_ORIGIN: &str = "https://web-3-jobmatching-frontend.vercel.app";
pub const DEFAULT_CHAIN_RPC_URL: &str = "https://rpc-mumbai.maticvigil.com";
pub const DEFAULT_PAYMENT_RECIPIENT: &str = "0xYourAdminWalletAddress";

/// Application configuration loaded from environment variables.
/// Startup fails if a required secret is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: String,
    pub gemini_api_key: String,
    pub gemini_api_base: Option<String>,
    pub image_bucket: String,
    pub image_access_key_id: String,
    pub image_secret_access_key: String,
    pub image_region: String,
    pub image_endpoint: Option<String>,
    pub jwt_secret: String,
    pub frontend_origin: String,
    pub chain_rpc_url: String,
    pub payment_recipient: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_path: optional_env("SQLITE_DB_PATH")
                .unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_string()),
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            gemini_api_base: optional_env("GEMINI_API_BASE"),
            image_bucket: require_env("IMAGE_BUCKET")?,
            image_access_key_id: require_env("IMAGE_ACCESS_KEY_ID")?,
            image_secret_access_key: require_env("IMAGE_SECRET_ACCESS_KEY")?,
            image_region: optional_env("IMAGE_REGION").unwrap_or_else(|| "us-east-1".to_string()),
            image_endpoint: optional_env("IMAGE_ENDPOINT"),
            jwt_secret: require_env("JWT_SECRET")?,
            frontend_origin: optional_env("FRONTEND_ORIGIN")
                .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGIN.to_string()),
            chain_rpc_url: optional_env("CHAIN_RPC_URL")
                .unwrap_or_else(|| DEFAULT_CHAIN_RPC_URL.to_string()),
            payment_recipient: optional_env("PAYMENT_RECIPIENT")
                .unwrap_or_else(|| DEFAULT_PAYMENT_RECIPIENT.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    let value = std::env::var(key)
        .with_context(|| format!("Required environment variable '{key}' is not set"))?;
    if value.trim().is_empty() {
        anyhow::bail!("Required environment variable '{key}' is empty");
    }
    Ok(value)
}

/// Unset and blank values are treated the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_env_names_the_missing_variable() {
        let err = require_env("JOBMATCH_TEST_DEFINITELY_UNSET_VAR").unwrap_err();
        assert!(err
            .to_string()
            .contains("JOBMATCH_TEST_DEFINITELY_UNSET_VAR"));
    }

    #[test]
    fn optional_env_ignores_unset_variables() {
        assert_eq!(optional_env("JOBMATCH_TEST_ANOTHER_UNSET_VAR"), None);
    }
}
