use crate::constants::METERS_PER_FOOT;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display unit preference. `Km` shows metric values (km, m), `Ft` shows
/// imperial values (mi, ft).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Km,
    Ft,
}

impl Unit {
    pub fn toggled(self) -> Self {
        match self {
            Unit::Km => Unit::Ft,
            Unit::Ft => Unit::Km,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Km => write!(f, "km"),
            Unit::Ft => write!(f, "ft"),
        }
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "km" | "m" | "metric" => Ok(Unit::Km),
            "ft" | "mi" | "imperial" => Ok(Unit::Ft),
            _ => Err(format!("Invalid unit: '{}'", s)),
        }
    }
}

/// Altitude or height difference in feet
/// The dataset records every altitude in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Feet(pub f64);

impl Feet {
    /// Convert to meters
    pub fn to_meters(self) -> Meters {
        Meters(self.0 * METERS_PER_FOOT)
    }

    pub fn as_feet(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Feet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ft", group_thousands(self.0.round() as i64))
    }
}

impl From<Meters> for Feet {
    fn from(meters: Meters) -> Self {
        Feet(meters.0 / METERS_PER_FOOT)
    }
}

/// Altitude or height difference in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Meters(pub f64);

impl Meters {
    /// Convert to feet
    pub fn to_feet(self) -> Feet {
        Feet(self.0 / METERS_PER_FOOT)
    }

    pub fn as_meters(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Meters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} m", group_thousands(self.0.round() as i64))
    }
}

impl From<Feet> for Meters {
    fn from(feet: Feet) -> Self {
        Meters(feet.0 * METERS_PER_FOOT)
    }
}

/// Format an integer with thousands separators (e.g. 17598 -> "17,598").
pub fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        result.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result
}
