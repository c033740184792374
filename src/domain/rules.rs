use std::fmt;
use std::str::FromStr;

/// Largest neighbour count a Moore neighbourhood can produce
pub const MAX_NEIGHBORS: u8 = 8;

/// Errors from building or parsing a rule set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleParseError {
    #[error("rule notation must start with 'B'")]
    MissingBirth,

    #[error("rule notation is missing the '/S' survival part")]
    MissingSurvival,

    #[error("unexpected character {0:?} in rule notation")]
    UnexpectedChar(char),

    #[error("neighbor count {0} is outside 0..=8")]
    CountOutOfRange(u8),
}

/// A set of neighbour counts in `0..=8`, stored as a 9-bit mask.
/// Iteration is always ascending and duplicates cannot exist.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NeighborCounts(u16);

impl NeighborCounts {
    pub const EMPTY: Self = Self(0);

    /// Build from counts known to be in range (used for the preset constants)
    const fn of(counts: &[u8]) -> Self {
        let mut mask = 0u16;
        let mut i = 0;
        while i < counts.len() {
            mask |= 1 << counts[i];
            i += 1;
        }
        Self(mask)
    }

    /// Build from arbitrary counts, rejecting anything above 8
    pub fn from_counts(counts: &[u8]) -> Result<Self, RuleParseError> {
        counts.iter().try_fold(Self::EMPTY, |set, &n| set.with(n))
    }

    fn with(self, count: u8) -> Result<Self, RuleParseError> {
        if count > MAX_NEIGHBORS {
            return Err(RuleParseError::CountOutOfRange(count));
        }
        Ok(Self(self.0 | 1 << count))
    }

    #[inline]
    pub const fn contains(self, count: u8) -> bool {
        count <= MAX_NEIGHBORS && (self.0 >> count) & 1 == 1
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Counts in ascending order
    pub fn iter(self) -> impl Iterator<Item = u8> {
        (0..=MAX_NEIGHBORS).filter(move |&n| self.contains(n))
    }

    fn digits(self) -> String {
        self.iter().map(|n| char::from(b'0' + n)).collect()
    }

    fn parse_digits(digits: &str) -> Result<Self, RuleParseError> {
        digits.chars().try_fold(Self::EMPTY, |set, c| {
            let n = c.to_digit(10).ok_or(RuleParseError::UnexpectedChar(c))?;
            set.with(n as u8)
        })
    }
}

impl fmt::Debug for NeighborCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Birth/survival rule set for life-like automata.
/// A dead cell is born when its neighbour count is in `birth`;
/// a live cell survives when its count is in `survival`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct RuleSet {
    pub birth: NeighborCounts,
    pub survival: NeighborCounts,
}

impl RuleSet {
    /// Conway's Game of Life (B3/S23)
    pub const CONWAY: Self = Self {
        birth: NeighborCounts::of(&[3]),
        survival: NeighborCounts::of(&[2, 3]),
    };

    /// HighLife (B36/S23), known for its replicator
    pub const HIGH_LIFE: Self = Self {
        birth: NeighborCounts::of(&[3, 6]),
        survival: NeighborCounts::of(&[2, 3]),
    };

    /// Day & Night (B3678/S34678), symmetric under inversion
    pub const DAY_AND_NIGHT: Self = Self {
        birth: NeighborCounts::of(&[3, 6, 7, 8]),
        survival: NeighborCounts::of(&[3, 4, 6, 7, 8]),
    };

    /// Seeds (B2/S), every live cell dies each generation
    pub const SEEDS: Self = Self {
        birth: NeighborCounts::of(&[2]),
        survival: NeighborCounts::EMPTY,
    };

    pub fn new(birth: &[u8], survival: &[u8]) -> Result<Self, RuleParseError> {
        Ok(Self {
            birth: NeighborCounts::from_counts(birth)?,
            survival: NeighborCounts::from_counts(survival)?,
        })
    }

    /// The whole transition law: survival membership for live cells,
    /// birth membership for dead ones.
    #[inline]
    pub const fn should_be_alive(&self, is_currently_alive: bool, alive_neighbors: u8) -> bool {
        if is_currently_alive {
            self.survival.contains(alive_neighbors)
        } else {
            self.birth.contains(alive_neighbors)
        }
    }

    /// Canonical `B<digits>/S<digits>` form
    pub fn to_notation(&self) -> String {
        format!("B{}/S{}", self.birth.digits(), self.survival.digits())
    }

    /// Lenient entry point: `None` when the text is not valid notation,
    /// so callers can keep their previous rule set.
    pub fn from_notation(text: &str) -> Option<Self> {
        text.parse().ok()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::CONWAY
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_notation())
    }
}

impl FromStr for RuleSet {
    type Err = RuleParseError;

    /// Parses `B<digits>/S<digits>`, letters in either case, digit runs may be empty
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let rest = text
            .strip_prefix(['B', 'b'])
            .ok_or(RuleParseError::MissingBirth)?;
        let (birth, survival) = rest.split_once('/').ok_or(RuleParseError::MissingSurvival)?;
        let survival = survival
            .strip_prefix(['S', 's'])
            .ok_or(RuleParseError::MissingSurvival)?;

        Ok(Self {
            birth: NeighborCounts::parse_digits(birth)?,
            survival: NeighborCounts::parse_digits(survival)?,
        })
    }
}

/// Named presets in menu order
pub fn all_rules() -> [(&'static str, RuleSet); 4] {
    [
        ("Conway", RuleSet::CONWAY),
        ("HighLife", RuleSet::HIGH_LIFE),
        ("Day & Night", RuleSet::DAY_AND_NIGHT),
        ("Seeds", RuleSet::SEEDS),
    ]
}
