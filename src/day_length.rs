use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Portion of a single day, at half-day resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayLength {
    #[default]
    Zero,
    Morning,
    Noon,
    Full,
}

impl DayLength {
    pub const ALL: [DayLength; 4] = [
        DayLength::Zero,
        DayLength::Morning,
        DayLength::Noon,
        DayLength::Full,
    ];

    /// Work units this length stands for: 0, 0.5 or 1.
    pub fn duration(self) -> f64 {
        match self {
            DayLength::Zero => 0.0,
            DayLength::Morning | DayLength::Noon => 0.5,
            DayLength::Full => 1.0,
        }
    }

    pub fn is_full(self) -> bool {
        self == DayLength::Full
    }

    /// True when the morning half is covered (`Morning` or `Full`).
    pub fn is_morning(self) -> bool {
        matches!(self, DayLength::Morning | DayLength::Full)
    }

    /// True when the noon half is covered (`Noon` or `Full`).
    pub fn is_noon(self) -> bool {
        matches!(self, DayLength::Noon | DayLength::Full)
    }

    pub fn is_zero(self) -> bool {
        self == DayLength::Zero
    }

    /// Rebuilds a length from the two halves.
    pub fn from_halves(morning: bool, noon: bool) -> Self {
        match (morning, noon) {
            (true, true) => DayLength::Full,
            (true, false) => DayLength::Morning,
            (false, true) => DayLength::Noon,
            (false, false) => DayLength::Zero,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DayLength::Zero => "ZERO",
            DayLength::Morning => "MORNING",
            DayLength::Noon => "NOON",
            DayLength::Full => "FULL",
        }
    }
}

impl fmt::Display for DayLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayLength {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ZERO" | "NONE" | "" => Ok(DayLength::Zero),
            "MORNING" => Ok(DayLength::Morning),
            "NOON" => Ok(DayLength::Noon),
            "FULL" => Ok(DayLength::Full),
            other => Err(format!("unknown day length '{other}'")),
        }
    }
}
