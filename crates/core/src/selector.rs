use crate::{ConfigError, Event, EventBus, LottoConfig, RngState};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SelectError {
    #[error("a draw already happened; reset first")]
    AlreadyRun,
    #[error("number {number} is outside {min}..={max}")]
    OutOfRange { number: u8, min: u8, max: u8 },
    #[error("at most {max} numbers may be preselected")]
    CapacityExceeded { max: usize },
    #[error("number {0} is already selected")]
    DuplicateValue(u8),
}

/// Outcome of a draw: preselected numbers first, in the order they were
/// added, followed by the random fillers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "RawDrawResult")]
pub struct DrawResult {
    numbers: Vec<u8>,
    preselected: usize,
}

#[derive(Deserialize)]
struct RawDrawResult {
    numbers: Vec<u8>,
    preselected: usize,
}

impl TryFrom<RawDrawResult> for DrawResult {
    type Error = String;

    fn try_from(raw: RawDrawResult) -> Result<Self, Self::Error> {
        if raw.preselected > raw.numbers.len() {
            return Err(format!(
                "preselected count {} exceeds {} drawn numbers",
                raw.preselected,
                raw.numbers.len()
            ));
        }
        let mut seen = HashSet::with_capacity(raw.numbers.len());
        if let Some(dup) = raw.numbers.iter().find(|number| !seen.insert(**number)) {
            return Err(format!("number {dup} drawn twice"));
        }
        Ok(Self {
            numbers: raw.numbers,
            preselected: raw.preselected,
        })
    }
}

impl DrawResult {
    pub fn numbers(&self) -> &[u8] {
        &self.numbers
    }

    pub fn preselected(&self) -> &[u8] {
        &self.numbers[..self.preselected]
    }

    pub fn fillers(&self) -> &[u8] {
        &self.numbers[self.preselected..]
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    pub fn contains(&self, number: u8) -> bool {
        self.numbers.contains(&number)
    }

    pub fn sorted(&self) -> Vec<u8> {
        let mut out = self.numbers.clone();
        out.sort_unstable();
        out
    }
}

#[derive(Debug, Clone)]
pub struct Selector {
    config: LottoConfig,
    rng: RngState,
    preselected: Vec<u8>,
    has_run: bool,
}

impl Selector {
    pub fn new(config: LottoConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            rng: RngState::from_seed(seed),
            preselected: Vec::new(),
            has_run: false,
        })
    }

    /// Default 6-of-45 selector.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            config: LottoConfig::default(),
            rng: RngState::from_seed(seed),
            preselected: Vec::new(),
            has_run: false,
        }
    }

    pub fn from_entropy(config: LottoConfig) -> Result<Self, ConfigError> {
        let seed = RngState::from_entropy().seed();
        Self::new(config, seed)
    }

    pub fn config(&self) -> &LottoConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn preselected(&self) -> &[u8] {
        &self.preselected
    }

    pub fn has_run(&self) -> bool {
        self.has_run
    }

    pub fn is_preselected(&self, number: u8) -> bool {
        self.preselected.contains(&number)
    }

    pub fn remaining_slots(&self) -> usize {
        self.config.max_preselect.saturating_sub(self.preselected.len())
    }

    pub fn add_preselection(
        &mut self,
        number: u8,
        events: &mut EventBus,
    ) -> Result<(), SelectError> {
        if self.has_run {
            return Err(SelectError::AlreadyRun);
        }
        if !self.config.contains(number) {
            return Err(SelectError::OutOfRange {
                number,
                min: self.config.min_number,
                max: self.config.max_number,
            });
        }
        if self.preselected.len() >= self.config.max_preselect {
            return Err(SelectError::CapacityExceeded {
                max: self.config.max_preselect,
            });
        }
        if self.is_preselected(number) {
            return Err(SelectError::DuplicateValue(number));
        }
        self.preselected.push(number);
        debug!(number, count = self.preselected.len(), "preselected");
        events.push(Event::Preselected {
            number,
            count: self.preselected.len(),
        });
        Ok(())
    }

    pub fn reset(&mut self, events: &mut EventBus) {
        let cleared = self.preselected.len();
        self.preselected.clear();
        self.has_run = false;
        debug!(cleared, "selector reset");
        events.push(Event::Reset { cleared });
    }

    pub fn draw(&mut self, events: &mut EventBus) -> DrawResult {
        self.has_run = true;
        let mut pool: Vec<u8> = self
            .config
            .range()
            .filter(|number| !self.preselected.contains(number))
            .collect();
        trace!(pool = pool.len(), "shuffling unused numbers");
        self.rng.shuffle(&mut pool);
        let fill = self.config.pick_count - self.preselected.len();
        let mut numbers = Vec::with_capacity(self.config.pick_count);
        numbers.extend_from_slice(&self.preselected);
        numbers.extend(pool.into_iter().take(fill));
        let result = DrawResult {
            numbers,
            preselected: self.preselected.len(),
        };
        debug!(numbers = ?result.numbers(), "drawn");
        events.push(Event::Drawn {
            numbers: result.numbers.clone(),
            preselected: result.preselected,
        });
        result
    }
}
