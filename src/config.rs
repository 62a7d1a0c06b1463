use anyhow::{anyhow, Result};
use dotenvy::dotenv;
use log::warn;
use serde::Deserialize;
use std::env;

const CONFIG_PATH_ENV: &str = "CONFIG_PATH";
const STORE_URL_ENV: &str = "SUPABASE_URL";
const STORE_KEY_ENV: &str = "SUPABASE_ANON_KEY";

pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

/// Optional tuning values, read from the TOML file named by CONFIG_PATH.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
struct Tuning {
    http_bind_address: Option<String>,
    request_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub store_url: String,
    pub store_anon_key: String,
    pub http_bind_address: Option<String>,
    pub request_timeout_seconds: u64,
}

pub fn create_test_config() -> Config {
    Config {
        store_url: "http://localhost:54321".to_string(),
        store_anon_key: "xxx".to_string(),
        http_bind_address: None,
        request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
    }
}

/// Reads the startup configuration.
///
/// The two store values are required; without them the process must not
/// serve requests, so the error propagates out of main. Tuning values fall
/// back to defaults when CONFIG_PATH is unset or unreadable.
pub fn read_config() -> Result<Config> {
    dotenv().ok();

    let store_url =
        env::var(STORE_URL_ENV).map_err(|_| anyhow!("{STORE_URL_ENV} must be set"))?;
    let store_anon_key =
        env::var(STORE_KEY_ENV).map_err(|_| anyhow!("{STORE_KEY_ENV} must be set"))?;

    let tuning = read_tuning();

    Ok(Config {
        store_url,
        store_anon_key,
        http_bind_address: tuning.http_bind_address,
        request_timeout_seconds: tuning
            .request_timeout_seconds
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECONDS),
    })
}

fn read_tuning() -> Tuning {
    let config_path = match env::var(CONFIG_PATH_ENV) {
        Ok(path) => path,
        Err(_) => return Tuning::default(),
    };

    std::fs::read_to_string(&config_path)
        .map_err(|e| e.to_string())
        .and_then(|raw| toml::from_str(&raw).map_err(|e| e.to_string()))
        .unwrap_or_else(|err| {
            warn!("failed to read config from {config_path}: {err}");
            Tuning::default()
        })
}
