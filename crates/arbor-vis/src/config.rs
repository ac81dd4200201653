//! Environment configuration.

use std::net::SocketAddr;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Visualizer settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisConfig {
    /// Address the HTTP server binds to
    pub addr: SocketAddr,
    /// Playback interval at the normal speed, in milliseconds
    pub step_ms: u64,
    /// Start playing a fresh storyboard immediately
    pub autoplay: bool,
    /// Seed for random population
    pub seed: u64,
}

impl Default for VisConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            step_ms: 750,
            autoplay: true,
            seed: 42,
        }
    }
}

impl VisConfig {
    /// Read `ARBOR_ADDR`, `ARBOR_STEP_MS`, `ARBOR_AUTOPLAY` and `ARBOR_SEED`,
    /// falling back to the defaults for unset variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            addr: parse(&lookup, "ARBOR_ADDR")?.unwrap_or(defaults.addr),
            step_ms: parse(&lookup, "ARBOR_STEP_MS")?.unwrap_or(defaults.step_ms),
            autoplay: parse_flag(&lookup, "ARBOR_AUTOPLAY")?.unwrap_or(defaults.autoplay),
            seed: parse(&lookup, "ARBOR_SEED")?.unwrap_or(defaults.seed),
        };
        if config.step_ms == 0 {
            return Err(Error::InvalidConfig {
                name: "ARBOR_STEP_MS",
                value: "0".into(),
                reason: "must be positive".into(),
            });
        }
        Ok(config)
    }
}

fn parse<F, T>(lookup: &F, name: &'static str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = lookup(name) else {
        return Ok(None);
    };
    raw.trim()
        .parse()
        .map(Some)
        .map_err(|e: T::Err| Error::InvalidConfig {
            name,
            value: raw.clone(),
            reason: e.to_string(),
        })
}

fn parse_flag<F>(lookup: &F, name: &'static str) -> Result<Option<bool>>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(name) else {
        return Ok(None);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" => Ok(Some(false)),
        _ => Err(Error::InvalidConfig {
            name,
            value: raw,
            reason: "expected a boolean".into(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn unset_variables_use_defaults() {
        let config = VisConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, VisConfig::default());
        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.step_ms, 750);
    }

    #[test]
    fn variables_override_defaults() {
        let config = VisConfig::from_lookup(lookup(&[
            ("ARBOR_ADDR", "127.0.0.1:8080"),
            ("ARBOR_STEP_MS", "300"),
            ("ARBOR_AUTOPLAY", "off"),
            ("ARBOR_SEED", "7"),
        ]))
        .unwrap();
        assert_eq!(config.addr, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.step_ms, 300);
        assert!(!config.autoplay);
        assert_eq!(config.seed, 7);
    }

    #[test]
    fn malformed_values_are_rejected() {
        let err = VisConfig::from_lookup(lookup(&[("ARBOR_STEP_MS", "fast")])).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { name: "ARBOR_STEP_MS", .. }));

        let err = VisConfig::from_lookup(lookup(&[("ARBOR_AUTOPLAY", "maybe")])).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { name: "ARBOR_AUTOPLAY", .. }));

        let err = VisConfig::from_lookup(lookup(&[("ARBOR_STEP_MS", "0")])).unwrap_err();
        assert!(err.to_string().contains("must be positive"));
    }
}
