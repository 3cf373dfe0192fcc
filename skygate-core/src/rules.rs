use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

/// Numeric limits applied by the validator. Defaults are the airline's
/// published booking rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRules {
    #[serde(default = "default_min_passengers")]
    pub min_passengers: u32,
    #[serde(default = "default_max_passengers")]
    pub max_passengers: u32,
    #[serde(default = "default_max_children_per_adult")]
    pub max_children_per_adult: u32,
    #[serde(default = "default_max_infants_per_adult")]
    pub max_infants_per_adult: u32,
}

fn default_min_passengers() -> u32 {
    1
}

fn default_max_passengers() -> u32 {
    9
}

fn default_max_children_per_adult() -> u32 {
    2
}

// Each infant travels on an adult's lap
fn default_max_infants_per_adult() -> u32 {
    1
}

impl Default for SearchRules {
    fn default() -> Self {
        Self {
            min_passengers: default_min_passengers(),
            max_passengers: default_max_passengers(),
            max_children_per_adult: default_max_children_per_adult(),
            max_infants_per_adult: default_max_infants_per_adult(),
        }
    }
}

impl SearchRules {
    pub fn check(&self) -> CoreResult<()> {
        if self.min_passengers == 0 {
            return Err(CoreError::InvalidRules("min_passengers must be at least 1".to_string()));
        }
        if self.min_passengers > self.max_passengers {
            return Err(CoreError::InvalidRules(format!(
                "min_passengers ({}) exceeds max_passengers ({})",
                self.min_passengers, self.max_passengers
            )));
        }
        Ok(())
    }
}

/// A single broken booking rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleViolation {
    PartySize,
    NegativeCount,
    AirportCodes,
    Dates,
    SeatingClass,
    EmergencyRowClass,
    ChildSeating,
    InfantSeating,
    ChildRatio,
    InfantRatio,
}

impl RuleViolation {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleViolation::PartySize => "party_size",
            RuleViolation::NegativeCount => "negative_count",
            RuleViolation::AirportCodes => "airport_codes",
            RuleViolation::Dates => "dates",
            RuleViolation::SeatingClass => "seating_class",
            RuleViolation::EmergencyRowClass => "emergency_row_class",
            RuleViolation::ChildSeating => "child_seating",
            RuleViolation::InfantSeating => "infant_seating",
            RuleViolation::ChildRatio => "child_ratio",
            RuleViolation::InfantRatio => "infant_ratio",
        }
    }
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            RuleViolation::PartySize => "total passengers out of range",
            RuleViolation::NegativeCount => "passenger counts must not be negative",
            RuleViolation::AirportCodes => "airport codes must be 3 characters and differ",
            RuleViolation::Dates => "return date must be a valid date after departure",
            RuleViolation::SeatingClass => "seating class must be economy, business or first",
            RuleViolation::EmergencyRowClass => "emergency row is only available in economy",
            RuleViolation::ChildSeating => {
                "children cannot sit in the emergency row or first class"
            }
            RuleViolation::InfantSeating => {
                "infants cannot sit in the emergency row or business class"
            }
            RuleViolation::ChildRatio => "too many children per adult",
            RuleViolation::InfantRatio => "too many infants per adult",
        };
        f.write_str(msg)
    }
}
