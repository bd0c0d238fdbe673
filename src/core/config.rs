// src/core/config.rs
use std::env;
use std::path::PathBuf;
use log::LevelFilter;

use crate::generators::{ExpansionBudget, MAX_TARGET};
use crate::models::DEFAULT_TARGET_SIZE;

// Configuration for the wordlist forge
#[derive(Debug, Clone)]
pub struct Config {
    // Output
    pub output_dir: PathBuf,

    // Generation
    pub default_target: usize,
    pub max_target: usize,
    pub attempt_factor: usize,

    // Viewer
    pub sample_size: usize,

    // Logging
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // Output
            output_dir: PathBuf::from("wordforge_output"),

            // Generation
            default_target: DEFAULT_TARGET_SIZE,
            max_target: MAX_TARGET,
            attempt_factor: ExpansionBudget::default().attempt_factor,

            // Viewer
            sample_size: 20,

            // Logging
            log_level: LevelFilter::Info,
            log_file: PathBuf::from("logs/wordforge.log"),
        }
    }
}

impl Config {
    // Load configuration from environment variables
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        // Output
        if let Some(dir) = lookup("WORDFORGE_OUTPUT_DIR") {
            if !dir.trim().is_empty() {
                config.output_dir = PathBuf::from(dir);
            }
        }

        // Generation
        if let Some(val) = lookup("WORDFORGE_MAX_TARGET") {
            match val.parse() {
                Ok(max) => config.max_target = max,
                Err(_) => log::warn!("Invalid WORDFORGE_MAX_TARGET '{}', using {}", val, config.max_target),
            }
        }

        if let Some(val) = lookup("WORDFORGE_DEFAULT_TARGET") {
            match val.parse() {
                Ok(target) => config.default_target = target,
                Err(_) => log::warn!("Invalid WORDFORGE_DEFAULT_TARGET '{}', using {}", val, config.default_target),
            }
        }

        if config.default_target > config.max_target {
            log::warn!(
                "Default target {} exceeds maximum {}, clamping",
                config.default_target,
                config.max_target
            );
            config.default_target = config.max_target;
        }

        if let Some(val) = lookup("WORDFORGE_ATTEMPT_FACTOR") {
            match val.parse::<usize>() {
                Ok(factor) if factor > 0 => config.attempt_factor = factor,
                _ => log::warn!("Invalid WORDFORGE_ATTEMPT_FACTOR '{}', using {}", val, config.attempt_factor),
            }
        }

        // Viewer
        if let Some(val) = lookup("WORDFORGE_SAMPLE_SIZE") {
            if let Ok(size) = val.parse() {
                config.sample_size = size;
            }
        }

        // Logging
        if let Some(level) = lookup("LOG_LEVEL") {
            match level.to_lowercase().as_str() {
                "off" => config.log_level = LevelFilter::Off,
                "error" => config.log_level = LevelFilter::Error,
                "warn" => config.log_level = LevelFilter::Warn,
                "info" => config.log_level = LevelFilter::Info,
                "debug" => config.log_level = LevelFilter::Debug,
                "trace" => config.log_level = LevelFilter::Trace,
                _ => {}
            }
        }

        if let Some(file) = lookup("LOG_FILE") {
            config.log_file = PathBuf::from(file);
        }

        config
    }

    pub fn expansion_budget(&self) -> ExpansionBudget {
        ExpansionBudget {
            attempt_factor: self.attempt_factor,
            ..ExpansionBudget::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = load(&[]);
        assert_eq!(config.output_dir, PathBuf::from("wordforge_output"));
        assert_eq!(config.default_target, 50_000);
        assert_eq!(config.max_target, 1_000_000);
        assert_eq!(config.log_level, LevelFilter::Info);
        assert_eq!(config.expansion_budget(), ExpansionBudget::default());
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = load(&[
            ("WORDFORGE_OUTPUT_DIR", "/tmp/lists"),
            ("WORDFORGE_DEFAULT_TARGET", "1000"),
            ("LOG_LEVEL", "DEBUG"),
            ("LOG_FILE", "forge.log"),
        ]);
        assert_eq!(config.output_dir, PathBuf::from("/tmp/lists"));
        assert_eq!(config.default_target, 1000);
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.log_file, PathBuf::from("forge.log"));
    }

    #[test]
    fn default_target_is_clamped_to_maximum() {
        let config = load(&[("WORDFORGE_MAX_TARGET", "5000"), ("WORDFORGE_DEFAULT_TARGET", "bogus")]);
        assert_eq!(config.max_target, 5000);
        assert_eq!(config.default_target, 5000);
    }

    #[test]
    fn attempt_factor_must_be_positive() {
        assert_eq!(load(&[("WORDFORGE_ATTEMPT_FACTOR", "0")]).attempt_factor, 10);
        assert_eq!(load(&[("WORDFORGE_ATTEMPT_FACTOR", "3")]).expansion_budget().attempt_factor, 3);
    }
}
