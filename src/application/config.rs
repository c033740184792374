//! Simulation configuration: board size, rules, step cadence and topology.
//!
//! Every setter clamps into the accepted range instead of failing, so user
//! input can never put the simulation in an invalid state. Only reading the
//! configuration from the environment can fail, and only on values that do
//! not parse at all.

use std::time::Duration;

use tracing::warn;

use crate::domain::{RuleParseError, RuleSet};

pub const MIN_SIZE: usize = 10;
pub const MAX_SIZE: usize = 200;
pub const DEFAULT_ROWS: usize = 50;
pub const DEFAULT_COLS: usize = 50;
pub const MIN_STEP_MS: u64 = 20;
pub const MAX_STEP_MS: u64 = 1000;

/// Errors raised while loading configuration from the environment
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?} is not a number")]
    InvalidNumber { var: &'static str, value: String },

    #[error("invalid {var}: {value:?} is not a boolean")]
    InvalidBool { var: &'static str, value: String },

    #[error("invalid LIFE_RULE: {source}")]
    InvalidRule {
        #[from]
        source: RuleParseError,
    },
}

/// Discrete speed settings, slowest first
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpeedLevel {
    Speed1,
    Speed2,
    Speed3,
    Speed4,
    Speed5,
    Speed6,
    Speed7,
    Speed8,
    Speed9,
    Speed10,
}

impl SpeedLevel {
    pub const DEFAULT: SpeedLevel = SpeedLevel::Speed6;

    const ALL: [SpeedLevel; 10] = [
        SpeedLevel::Speed1,
        SpeedLevel::Speed2,
        SpeedLevel::Speed3,
        SpeedLevel::Speed4,
        SpeedLevel::Speed5,
        SpeedLevel::Speed6,
        SpeedLevel::Speed7,
        SpeedLevel::Speed8,
        SpeedLevel::Speed9,
        SpeedLevel::Speed10,
    ];

    pub fn all() -> [SpeedLevel; 10] {
        Self::ALL
    }

    /// Delay between generations
    pub const fn delay_ms(self) -> u64 {
        match self {
            SpeedLevel::Speed1 => 1000,
            SpeedLevel::Speed2 => 500,
            SpeedLevel::Speed3 => 300,
            SpeedLevel::Speed4 => 200,
            SpeedLevel::Speed5 => 150,
            SpeedLevel::Speed6 => 100,
            SpeedLevel::Speed7 => 70,
            SpeedLevel::Speed8 => 50,
            SpeedLevel::Speed9 => 30,
            SpeedLevel::Speed10 => 20,
        }
    }

    /// 1-based number shown to users
    pub fn display_number(self) -> usize {
        self.ordinal() + 1
    }

    fn ordinal(self) -> usize {
        self as usize
    }

    /// Level at a 0-based index, or the default when out of range
    pub fn from_ordinal(ordinal: usize) -> SpeedLevel {
        Self::ALL.get(ordinal).copied().unwrap_or(Self::DEFAULT)
    }

    pub fn faster(self) -> SpeedLevel {
        Self::ALL[(self.ordinal() + 1).min(Self::ALL.len() - 1)]
    }

    pub fn slower(self) -> SpeedLevel {
        Self::ALL[self.ordinal().saturating_sub(1)]
    }

    /// Level whose delay is closest to `ms`
    pub fn nearest(ms: u64) -> SpeedLevel {
        Self::ALL
            .into_iter()
            .min_by_key(|level| level.delay_ms().abs_diff(ms))
            .unwrap_or(Self::DEFAULT)
    }
}

impl Default for SpeedLevel {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Complete simulation configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimulationConfig {
    pub rows: usize,
    pub cols: usize,
    pub rules: RuleSet,
    pub step_interval_ms: u64,
    /// Toroidal topology when true, bounded board otherwise
    pub wrap_edges: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            rules: RuleSet::CONWAY,
            step_interval_ms: SpeedLevel::DEFAULT.delay_ms(),
            wrap_edges: true,
        }
    }
}

impl SimulationConfig {
    pub fn clamp_size(size: usize) -> usize {
        size.clamp(MIN_SIZE, MAX_SIZE)
    }

    pub fn clamp_step_interval(ms: u64) -> u64 {
        ms.clamp(MIN_STEP_MS, MAX_STEP_MS)
    }

    pub fn with_size(self, rows: usize, cols: usize) -> Self {
        Self {
            rows: Self::clamp_size(rows),
            cols: Self::clamp_size(cols),
            ..self
        }
    }

    pub fn with_step_interval(self, ms: u64) -> Self {
        Self {
            step_interval_ms: Self::clamp_step_interval(ms),
            ..self
        }
    }

    pub fn with_rules(self, rules: RuleSet) -> Self {
        Self { rules, ..self }
    }

    pub fn with_wrap_edges(self, wrap_edges: bool) -> Self {
        Self { wrap_edges, ..self }
    }

    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(self.step_interval_ms)
    }

    /// Load configuration from environment variables.
    ///
    /// Optional variables (defaults in parentheses):
    /// - `LIFE_ROWS` / `LIFE_COLS` -- board size, clamped to 10..=200 (50)
    /// - `LIFE_RULE` -- B/S notation such as `B36/S23` (`B3/S23`)
    /// - `LIFE_STEP_MS` -- delay between generations, clamped to 20..=1000 (100)
    /// - `LIFE_WRAP` -- `true`/`false`, toroidal edges (`true`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` with a custom variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let rows = parse_number(&lookup, "LIFE_ROWS")?.unwrap_or(defaults.rows as i64);
        let cols = parse_number(&lookup, "LIFE_COLS")?.unwrap_or(defaults.cols as i64);
        let step_ms = parse_number(&lookup, "LIFE_STEP_MS")?.unwrap_or(defaults.step_interval_ms as i64);

        let rules = match lookup("LIFE_RULE") {
            Some(text) => text.trim().parse::<RuleSet>()?,
            None => defaults.rules,
        };

        let wrap_edges = match lookup("LIFE_WRAP") {
            Some(value) => value
                .trim()
                .parse::<bool>()
                .map_err(|_| ConfigError::InvalidBool { var: "LIFE_WRAP", value })?,
            None => defaults.wrap_edges,
        };

        let requested = (rows, cols, step_ms);
        let config = defaults
            .with_size(saturating_usize(rows), saturating_usize(cols))
            .with_step_interval(saturating_u64(step_ms))
            .with_rules(rules)
            .with_wrap_edges(wrap_edges);

        if (config.rows as i64, config.cols as i64, config.step_interval_ms as i64) != requested {
            warn!(
                rows,
                cols,
                step_ms,
                clamped_rows = config.rows,
                clamped_cols = config.cols,
                clamped_step_ms = config.step_interval_ms,
                "configuration clamped into accepted range"
            );
        }

        Ok(config)
    }
}

/// Signed, so a negative value is clamped like any other out-of-range number
fn parse_number(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<i64>, ConfigError> {
    lookup(var)
        .map(|value| {
            value
                .trim()
                .parse::<i64>()
                .map_err(|_| ConfigError::InvalidNumber { var, value })
        })
        .transpose()
}

fn saturating_usize(n: i64) -> usize {
    usize::try_from(n.max(0)).unwrap_or(usize::MAX)
}

fn saturating_u64(n: i64) -> u64 {
    u64::try_from(n).unwrap_or(0)
}
