use std::env;
use std::path::PathBuf;

use crate::error::ConfigError;

pub const DEFAULT_TICK_MS: u64 = 33;
pub const DEFAULT_RENDER_FPS: u64 = 60;

const TICK_VAR: &str = "MAZE_CHASE_TICK_MS";
const FPS_VAR: &str = "MAZE_CHASE_FPS";
const SEED_VAR: &str = "MAZE_CHASE_SEED";
const LAYOUT_VAR: &str = "MAZE_CHASE_LAYOUT";
const LOG_VAR: &str = "MAZE_CHASE_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub tick_ms: u64,
    pub render_fps: u64,
    pub seed: Option<u64>,
    pub layout: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
            render_fps: DEFAULT_RENDER_FPS,
            seed: None,
            layout: None,
            log_file: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Unset or blank variables keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut settings = Settings::default();
        if let Some(v) = get(TICK_VAR) {
            settings.tick_ms = positive(TICK_VAR, &v)?;
        }
        if let Some(v) = get(FPS_VAR) {
            settings.render_fps = positive(FPS_VAR, &v)?;
        }
        if let Some(v) = get(SEED_VAR) {
            settings.seed = Some(v.trim().parse().map_err(|_| ConfigError::NotInteger {
                var: SEED_VAR,
                value: v.clone(),
            })?);
        }
        settings.layout = get(LAYOUT_VAR).map(PathBuf::from);
        settings.log_file = get(LOG_VAR).map(PathBuf::from);
        Ok(settings)
    }
}

fn positive(var: &'static str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|v| *v > 0)
        .ok_or_else(|| ConfigError::NotPositive {
            var,
            value: value.to_string(),
        })
}
