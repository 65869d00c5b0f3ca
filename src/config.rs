// Construction parameters for a skip list. Fixed for the lifetime of the list.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::storage::arena::{ArenaSize, MAX_ARENA_CAP};

pub const DEFAULT_MAX_LEVEL: usize = 18;
pub const DEFAULT_LEVEL_UP_PROBABILITY: f64 = 0.5;
// Towers are allocated max_level + 1 wide on the header, so keep this sane
pub const MAX_LEVEL_LIMIT: usize = 64;

const ENV_MAX_LEVEL: &str = "SKIPLIST_MAX_LEVEL";
const ENV_PROBABILITY: &str = "SKIPLIST_LEVEL_UP_PROBABILITY";
const ENV_SEED: &str = "SKIPLIST_SEED";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkipListConfig {
    /// Hard ceiling on node levels. Levels are numbered `0..=max_level`.
    pub max_level: usize,
    /// Chance that a new node is promoted one more level.
    pub level_up_probability: f64,
    /// Fixed seed for level generation. `None` seeds from the OS.
    pub seed: Option<u64>,
    pub arena: ArenaSize,
}

impl Default for SkipListConfig {
    fn default() -> Self {
        Self {
            max_level: DEFAULT_MAX_LEVEL,
            level_up_probability: DEFAULT_LEVEL_UP_PROBABILITY,
            seed: None,
            arena: ArenaSize::Default,
        }
    }
}

impl SkipListConfig {
    pub fn new(max_level: usize, level_up_probability: f64) -> Self {
        Self {
            max_level,
            level_up_probability,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_arena(mut self, arena: ArenaSize) -> Self {
        self.arena = arena;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_level == 0 || self.max_level > MAX_LEVEL_LIMIT {
            return Err(ConfigError::MaxLevel {
                actual: self.max_level,
                limit: MAX_LEVEL_LIMIT,
            });
        }

        let p = self.level_up_probability;
        if !(p > 0.0 && p < 1.0) {
            return Err(ConfigError::Probability(p));
        }

        if let ArenaSize::Nodes(nodes) = self.arena {
            if nodes > MAX_ARENA_CAP {
                return Err(ConfigError::ArenaCapacity {
                    actual: nodes,
                    limit: MAX_ARENA_CAP,
                });
            }
        }

        Ok(())
    }

    /// Defaults overridden by `SKIPLIST_MAX_LEVEL`, `SKIPLIST_LEVEL_UP_PROBABILITY` and `SKIPLIST_SEED`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_MAX_LEVEL) {
            config.max_level = parse(ENV_MAX_LEVEL, value)?;
        }
        if let Some(value) = lookup(ENV_PROBABILITY) {
            config.level_up_probability = parse(ENV_PROBABILITY, value)?;
        }
        if let Some(value) = lookup(ENV_SEED) {
            config.seed = Some(parse(ENV_SEED, value)?);
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse<T: std::str::FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Env { var, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SkipListConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_level, 18);
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(matches!(
            SkipListConfig::new(0, 0.5).validate(),
            Err(ConfigError::MaxLevel { actual: 0, .. })
        ));
        assert!(matches!(
            SkipListConfig::new(65, 0.5).validate(),
            Err(ConfigError::MaxLevel { actual: 65, .. })
        ));

        for p in [0.0, 1.0, -0.1, 1.5, f64::NAN] {
            assert!(matches!(
                SkipListConfig::new(6, p).validate(),
                Err(ConfigError::Probability(_))
            ));
        }
    }

    #[test]
    fn env_overrides() {
        let config = SkipListConfig::from_lookup(|var| match var {
            ENV_MAX_LEVEL => Some("32".into()),
            ENV_SEED => Some(" 99 ".into()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.max_level, 32);
        assert_eq!(config.level_up_probability, DEFAULT_LEVEL_UP_PROBABILITY);
        assert_eq!(config.seed, Some(99));
    }

    #[test]
    fn env_rejects_garbage() {
        let err = SkipListConfig::from_lookup(|var| {
            (var == ENV_PROBABILITY).then(|| "half".to_string())
        })
        .unwrap_err();

        assert!(matches!(err, ConfigError::Env { var: ENV_PROBABILITY, .. }));
    }

    #[test]
    fn deserializes_partial() {
        let config: SkipListConfig =
            serde_json::from_str(r#"{ "max_level": 6, "arena": { "nodes": 32 } }"#).unwrap();

        assert_eq!(config.max_level, 6);
        assert_eq!(config.level_up_probability, 0.5);
        assert_eq!(config.arena, ArenaSize::Nodes(32));
    }

    #[test]
    fn rejects_oversized_arena() {
        let config: SkipListConfig =
            serde_json::from_str(r#"{ "max_level": 6, "arena": { "nodes": 18446744073709551615 } }"#)
                .unwrap();

        assert!(matches!(
            config.validate(),
            Err(ConfigError::ArenaCapacity { actual: usize::MAX, limit: MAX_ARENA_CAP })
        ));
        assert!(
            SkipListConfig::new(6, 0.5)
                .with_arena(ArenaSize::Nodes(MAX_ARENA_CAP))
                .validate()
                .is_ok()
        );
    }
}
