use crate::core::ProofOfWork;
use crate::error::{LedgerError, Result};
use log::info;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;
use std::sync::RwLock;

pub static GLOBAL_CONFIG: Lazy<Config> = Lazy::new(Config::new);

static DEFAULT_DIFFICULTY: &str = "3";

const DIFFICULTY_KEY: &str = "DIFFICULTY";
const MAX_SEAL_ITERATIONS_KEY: &str = "MAX_SEAL_ITERATIONS";

const DIFFICULTY_ENV: &str = "LEDGER_DIFFICULTY";
const MAX_SEAL_ITERATIONS_ENV: &str = "LEDGER_MAX_SEAL_ITERATIONS";

/// Layout of a TOML settings file
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    difficulty: Option<i64>,
    max_seal_iterations: Option<u64>,
}

pub struct Config {
    inner: RwLock<HashMap<String, String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Defaults overlaid with `LEDGER_*` environment variables
    pub fn new() -> Config {
        Self::with_env(|key| env::var(key).ok())
    }

    fn with_env(lookup: impl Fn(&str) -> Option<String>) -> Config {
        let mut map = HashMap::new();
        map.insert(
            String::from(DIFFICULTY_KEY),
            String::from(DEFAULT_DIFFICULTY),
        );
        Self::apply_env(&mut map, &lookup);

        Config {
            inner: RwLock::new(map),
        }
    }

    fn apply_env(map: &mut HashMap<String, String>, lookup: &impl Fn(&str) -> Option<String>) {
        if let Some(difficulty) = lookup(DIFFICULTY_ENV) {
            map.insert(String::from(DIFFICULTY_KEY), difficulty);
        }
        if let Some(max) = lookup(MAX_SEAL_ITERATIONS_ENV) {
            map.insert(String::from(MAX_SEAL_ITERATIONS_KEY), max);
        }
    }

    /// Load a TOML file. Environment variables still take precedence over it.
    pub fn load_file(&self, path: &Path) -> Result<()> {
        let text = fs::read_to_string(path)?;
        self.load_toml_str(&text, |key| env::var(key).ok())?;
        info!("Loaded configuration from {}", path.display());
        Ok(())
    }

    fn load_toml_str(&self, text: &str, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        let settings: FileSettings = toml::from_str(text)?;

        let mut inner = self
            .inner
            .write()
            .expect("Failed to acquire write lock on config - this should never happen");
        if let Some(difficulty) = settings.difficulty {
            inner.insert(String::from(DIFFICULTY_KEY), difficulty.to_string());
        }
        if let Some(max) = settings.max_seal_iterations {
            inner.insert(String::from(MAX_SEAL_ITERATIONS_KEY), max.to_string());
        }
        Self::apply_env(&mut inner, &lookup);
        Ok(())
    }

    pub fn get_difficulty(&self) -> Result<u32> {
        let inner = self
            .inner
            .read()
            .expect("Failed to acquire read lock on config - this should never happen");
        let raw = inner
            .get(DIFFICULTY_KEY)
            .expect("Difficulty should always be present in config");
        let difficulty = raw
            .trim()
            .parse::<i64>()
            .map_err(|e| LedgerError::Config(format!("Invalid difficulty '{raw}': {e}")))?;
        ProofOfWork::check_difficulty(difficulty)
    }

    pub fn set_difficulty(&self, difficulty: u32) {
        let mut inner = self
            .inner
            .write()
            .expect("Failed to acquire write lock on config - this should never happen");
        inner.insert(String::from(DIFFICULTY_KEY), difficulty.to_string());
    }

    pub fn get_max_seal_iterations(&self) -> Result<Option<u64>> {
        let inner = self
            .inner
            .read()
            .expect("Failed to acquire read lock on config - this should never happen");
        match inner.get(MAX_SEAL_ITERATIONS_KEY) {
            Some(raw) => raw.trim().parse::<u64>().map(Some).map_err(|e| {
                LedgerError::Config(format!("Invalid max seal iterations '{raw}': {e}"))
            }),
            None => Ok(None),
        }
    }

    pub fn set_max_seal_iterations(&self, max: u64) {
        let mut inner = self
            .inner
            .write()
            .expect("Failed to acquire write lock on config - this should never happen");
        inner.insert(String::from(MAX_SEAL_ITERATIONS_KEY), max.to_string());
    }
}
