/// Runtime configuration
///
/// Everything is environment-driven with sensible defaults, matching
/// how the bot is deployed: point SPLAT3_API_SOURCE at the schedule
/// endpoint and the rest takes care of itself.

use chrono::Duration;
use std::env;
use std::path::PathBuf;

/// Default upstream schedule endpoint (versus families).
pub const DEFAULT_API_BASE: &str = "https://spla3.yuu26.com/api/schedule";

/// How long a fetched snapshot stays fresh before a refresh refetches.
const DEFAULT_TTL_MINUTES: i64 = 30;

/// Settings for the schedule store and its collaborators.
#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    /// Versus schedule endpoint; the Salmon-Run endpoint is derived
    /// from it.
    pub api_base: String,
    /// Sent with every upstream request. The upstream asks callers to
    /// identify themselves.
    pub user_agent: String,
    /// Directory holding the snapshot cache files.
    pub cache_dir: PathBuf,
    pub ttl: Duration,
}

impl ScheduleConfig {
    /// Build the config from the environment, defaulting anything
    /// unset. Malformed values fall back to the default.
    pub fn from_env() -> Self {
        let api_base =
            env::var("SPLAT3_API_SOURCE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        let user_agent = env::var("SPLAT3_USER_AGENT").unwrap_or_else(|_| default_user_agent());
        let cache_dir = env::var("SPLAT3_CACHE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_cache_dir());
        let ttl = env::var("SPLAT3_CACHE_TTL_MINUTES")
            .ok()
            .and_then(|value| value.parse::<i64>().ok())
            .map(Duration::minutes)
            .unwrap_or_else(|| Duration::minutes(DEFAULT_TTL_MINUTES));

        Self {
            api_base,
            user_agent,
            cache_dir,
            ttl,
        }
    }
}

fn default_user_agent() -> String {
    format!("splat-rotations/{}", env!("CARGO_PKG_VERSION"))
}

fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("splat-rotations")
}
