use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use thiserror::Error;

pub const DEFAULT_MIN_NUMBER: u8 = 1;
pub const DEFAULT_MAX_NUMBER: u8 = 45;
pub const DEFAULT_PICK_COUNT: usize = 6;
pub const DEFAULT_MAX_PRESELECT: usize = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("min_number must be at least 1 (got {0})")]
    ZeroMinimum(u8),
    #[error("empty number range {min}..={max}")]
    EmptyRange { min: u8, max: u8 },
    #[error("pick_count must be at least 1")]
    NoPicks,
    #[error("pick_count {picks} exceeds the {pool} numbers in range")]
    PoolTooSmall { picks: usize, pool: usize },
    #[error("max_preselect {max_preselect} must be below pick_count {picks}")]
    PreselectTooLarge { max_preselect: usize, picks: usize },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LottoConfig {
    #[serde(default = "default_min_number")]
    pub min_number: u8,
    #[serde(default = "default_max_number")]
    pub max_number: u8,
    #[serde(default = "default_pick_count")]
    pub pick_count: usize,
    #[serde(default = "default_max_preselect")]
    pub max_preselect: usize,
}

fn default_min_number() -> u8 {
    DEFAULT_MIN_NUMBER
}

fn default_max_number() -> u8 {
    DEFAULT_MAX_NUMBER
}

fn default_pick_count() -> usize {
    DEFAULT_PICK_COUNT
}

fn default_max_preselect() -> usize {
    DEFAULT_MAX_PRESELECT
}

impl Default for LottoConfig {
    fn default() -> Self {
        Self {
            min_number: DEFAULT_MIN_NUMBER,
            max_number: DEFAULT_MAX_NUMBER,
            pick_count: DEFAULT_PICK_COUNT,
            max_preselect: DEFAULT_MAX_PRESELECT,
        }
    }
}

impl LottoConfig {
    pub fn range(&self) -> RangeInclusive<u8> {
        self.min_number..=self.max_number
    }

    pub fn contains(&self, number: u8) -> bool {
        self.range().contains(&number)
    }

    pub fn pool_size(&self) -> usize {
        if self.max_number < self.min_number {
            return 0;
        }
        usize::from(self.max_number - self.min_number) + 1
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_number == 0 {
            return Err(ConfigError::ZeroMinimum(self.min_number));
        }
        if self.min_number > self.max_number {
            return Err(ConfigError::EmptyRange {
                min: self.min_number,
                max: self.max_number,
            });
        }
        if self.pick_count == 0 {
            return Err(ConfigError::NoPicks);
        }
        if self.pick_count > self.pool_size() {
            return Err(ConfigError::PoolTooSmall {
                picks: self.pick_count,
                pool: self.pool_size(),
            });
        }
        if self.max_preselect >= self.pick_count {
            return Err(ConfigError::PreselectTooLarge {
                max_preselect: self.max_preselect,
                picks: self.pick_count,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_six_of_forty_five() {
        let config = LottoConfig::default();
        assert_eq!(config.range(), 1..=45);
        assert_eq!(config.pool_size(), 45);
        assert_eq!(config.pick_count, 6);
        assert_eq!(config.max_preselect, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: LottoConfig = serde_json::from_str(r#"{"max_number":49}"#).expect("parse");
        assert_eq!(config.min_number, 1);
        assert_eq!(config.max_number, 49);
        assert_eq!(config.pick_count, 6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_impossible_configs() {
        let zero = LottoConfig {
            min_number: 0,
            ..LottoConfig::default()
        };
        assert_eq!(zero.validate(), Err(ConfigError::ZeroMinimum(0)));

        let inverted = LottoConfig {
            min_number: 10,
            max_number: 5,
            ..LottoConfig::default()
        };
        assert!(matches!(
            inverted.validate(),
            Err(ConfigError::EmptyRange { min: 10, max: 5 })
        ));

        let tiny = LottoConfig {
            max_number: 4,
            ..LottoConfig::default()
        };
        assert!(matches!(
            tiny.validate(),
            Err(ConfigError::PoolTooSmall { picks: 6, pool: 4 })
        ));

        let greedy = LottoConfig {
            max_preselect: 6,
            ..LottoConfig::default()
        };
        assert!(matches!(
            greedy.validate(),
            Err(ConfigError::PreselectTooLarge { .. })
        ));
    }
}
