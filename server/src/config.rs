use std::{env, fmt::Display, fs::read_to_string, str::FromStr};

use tracing::{info, warn};

const DEFAULT_GEMINI_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent";

pub struct Config {
    pub port: u16,
    pub gemini_url: String,
    pub gemini_key: String,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("CANTEEN_PORT", "3000"),
            gemini_url: try_load("GEMINI_URL", DEFAULT_GEMINI_URL),
            gemini_key: load_secret("GEMINI_API_KEY"),
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}

// Env var first for local runs, then the mounted secret file.
fn load_secret(secret_name: &str) -> String {
    if let Ok(value) = env::var(secret_name) {
        return value;
    }

    let path = format!("/run/secrets/{secret_name}");

    read_to_string(&path)
        .map(|s| s.trim().to_string())
        .map_err(|e| {
            warn!("Failed to read {secret_name} from file: {e}");
        })
        .expect("Secrets misconfigured!")
}
