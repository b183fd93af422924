/// Runtime configuration
///
/// The only knob is the API base URL, taken from the environment with
/// a logged fallback to the public shelter service.

use std::env;

use tracing::info;

const BASE_URL_VAR: &str = "SHELTER_API_BASE_URL";
const DEFAULT_BASE_URL: &str = "https://frontend-take-home-service.fetch.com";

pub struct Config {
    pub api_base_url: String,
}

impl Config {
    pub fn load() -> Self {
        Config {
            api_base_url: try_load(BASE_URL_VAR, DEFAULT_BASE_URL),
        }
    }
}

fn try_load(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    })
}
