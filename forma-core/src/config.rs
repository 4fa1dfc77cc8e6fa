use crate::logging::parse_level;
use anyhow::{Context, Result, bail};
use log::LevelFilter;
use std::env;
use std::time::Duration;

pub const DEFAULT_WORKOUT_NAME: &str = "Track Workout";
pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub tick_interval: Duration,
    pub default_workout_name: String,
    pub start_timer_running: bool,
    pub log_level: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            tick_interval: DEFAULT_TICK,
            default_workout_name: DEFAULT_WORKOUT_NAME.to_string(),
            start_timer_running: true,
            log_level: "info".to_string(),
        }
    }
}

impl SessionConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup, falling back to defaults for missing keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = SessionConfig::default();

        if let Some(raw) = lookup("FORMA_TICK_MS") {
            let ms: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("FORMA_TICK_MS must be a number of milliseconds, got {:?}", raw))?;
            if ms == 0 {
                bail!("FORMA_TICK_MS must be greater than zero");
            }
            config.tick_interval = Duration::from_millis(ms);
        }

        if let Some(name) = lookup("FORMA_WORKOUT_NAME") {
            let name = name.trim();
            if !name.is_empty() {
                config.default_workout_name = name.to_string();
            }
        }

        if let Some(raw) = lookup("FORMA_TIMER_AUTOSTART") {
            config.start_timer_running = parse_bool(&raw)
                .with_context(|| format!("FORMA_TIMER_AUTOSTART must be a boolean, got {:?}", raw))?;
        }

        if let Some(raw) = lookup("FORMA_LOG") {
            config.set_log_level(&raw).context("Invalid FORMA_LOG")?;
        }

        Ok(config)
    }

    /// Accepts the names understood by [`parse_level`], stored lowercased.
    pub fn set_log_level(&mut self, level: &str) -> Result<()> {
        let level = level.trim().to_lowercase();
        if parse_level(&level).is_none() {
            bail!("unknown log level {:?}", level);
        }
        self.log_level = level;
        Ok(())
    }

    pub fn log_filter(&self) -> LevelFilter {
        parse_level(&self.log_level).unwrap_or(LevelFilter::Info)
    }
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(anyhow::anyhow!("not a boolean")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let config = SessionConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, SessionConfig::default());
        assert_eq!(config.default_workout_name, "Track Workout");
    }

    #[test]
    fn reads_overrides() {
        let config = SessionConfig::from_lookup(lookup_from(&[
            ("FORMA_TICK_MS", "250"),
            ("FORMA_WORKOUT_NAME", " Push Day "),
            ("FORMA_TIMER_AUTOSTART", "off"),
            ("FORMA_LOG", "DEBUG"),
        ]))
        .unwrap();
        assert_eq!(config.tick_interval, Duration::from_millis(250));
        assert_eq!(config.default_workout_name, "Push Day");
        assert!(!config.start_timer_running);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn rejects_bad_values() {
        let err = SessionConfig::from_lookup(lookup_from(&[("FORMA_TICK_MS", "soon")])).unwrap_err();
        assert!(err.to_string().contains("FORMA_TICK_MS"));
        assert!(SessionConfig::from_lookup(lookup_from(&[("FORMA_TICK_MS", "0")])).is_err());
        assert!(SessionConfig::from_lookup(lookup_from(&[("FORMA_TIMER_AUTOSTART", "maybe")])).is_err());

        let err = SessionConfig::from_lookup(lookup_from(&[("FORMA_LOG", "loud")])).unwrap_err();
        assert!(format!("{:#}", err).contains("FORMA_LOG"));
    }

    #[test]
    fn log_level_maps_to_filter() {
        let config = SessionConfig::from_lookup(lookup_from(&[("FORMA_LOG", " Warning ")])).unwrap();
        assert_eq!(config.log_level, "warning");
        assert_eq!(config.log_filter(), LevelFilter::Warn);
        assert_eq!(SessionConfig::default().log_filter(), LevelFilter::Info);
    }
}
