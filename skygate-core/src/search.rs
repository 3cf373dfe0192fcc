use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const AIRPORT_CODE_LEN: usize = 3;

/// Raw search request as supplied by the caller.
///
/// Every field defaults when missing so that an absent value is turned into a
/// rejection by the validator rather than a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
    pub departure_date: String,
    pub departure_airport_code: String,
    pub emergency_row_seating: bool,
    pub return_date: String,
    pub destination_airport_code: String,
    pub seating_class: String,
    // Signed so negative input reaches the validator
    pub adult_count: i32,
    pub child_count: i32,
    pub infant_count: i32,
}

impl SearchRequest {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        departure_date: impl Into<String>,
        departure_airport_code: impl Into<String>,
        emergency_row_seating: bool,
        return_date: impl Into<String>,
        destination_airport_code: impl Into<String>,
        seating_class: impl Into<String>,
        adult_count: i32,
        child_count: i32,
        infant_count: i32,
    ) -> Self {
        Self {
            departure_date: departure_date.into(),
            departure_airport_code: departure_airport_code.into(),
            emergency_row_seating,
            return_date: return_date.into(),
            destination_airport_code: destination_airport_code.into(),
            seating_class: seating_class.into(),
            adult_count,
            child_count,
            infant_count,
        }
    }

    pub fn route(&self) -> String {
        format!("{}->{}", self.departure_airport_code, self.destination_airport_code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatingClass {
    Economy,
    Business,
    First,
}

impl SeatingClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeatingClass::Economy => "economy",
            SeatingClass::Business => "business",
            SeatingClass::First => "first",
        }
    }
}

impl fmt::Display for SeatingClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeatingClass {
    type Err = CoreError;

    // Case-sensitive: "Economy" is not a seating class
    fn from_str(s: &str) -> CoreResult<Self> {
        match s {
            "economy" => Ok(SeatingClass::Economy),
            "business" => Ok(SeatingClass::Business),
            "first" => Ok(SeatingClass::First),
            other => Err(CoreError::InvalidSeatingClass(other.to_string())),
        }
    }
}

/// Three character airport identifier, case preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AirportCode(String);

impl AirportCode {
    pub fn parse(raw: &str) -> CoreResult<Self> {
        if raw.chars().count() != AIRPORT_CODE_LEN {
            return Err(CoreError::InvalidAirportCode(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AirportCode {
    type Error = CoreError;

    fn try_from(value: String) -> CoreResult<Self> {
        Self::parse(&value)
    }
}

impl From<AirportCode> for String {
    fn from(code: AirportCode) -> Self {
        code.0
    }
}

impl fmt::Display for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parses a strict `YYYY-MM-DD` calendar date.
///
/// chrono alone would take `2025-1-5`, so the shape is checked first.
pub fn parse_date(raw: &str) -> CoreResult<NaiveDate> {
    let bytes = raw.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(CoreError::InvalidDate(raw.to_string()));
    }

    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|e| CoreError::InvalidDate(format!("{}: {}", raw, e)))
}

/// Normalized copy of a request that passed every rule.
///
/// Not deserializable: JSON goes back in as a `SearchRequest` and through the
/// validator again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AcceptedSearch {
    pub departure_date: NaiveDate,
    pub departure_airport_code: AirportCode,
    pub emergency_row_seating: bool,
    pub return_date: NaiveDate,
    pub destination_airport_code: AirportCode,
    pub seating_class: SeatingClass,
    pub adult_count: u32,
    pub child_count: u32,
    pub infant_count: u32,
}

impl AcceptedSearch {
    pub fn passenger_count(&self) -> u64 {
        u64::from(self.adult_count) + u64::from(self.child_count) + u64::from(self.infant_count)
    }
}

impl TryFrom<&SearchRequest> for AcceptedSearch {
    type Error = CoreError;

    /// Field-level normalization only; cross-field rules live in the validator.
    fn try_from(request: &SearchRequest) -> CoreResult<Self> {
        let count = |n: i32| u32::try_from(n).map_err(|_| CoreError::InvalidPassengerCount(n));

        Ok(Self {
            departure_date: parse_date(&request.departure_date)?,
            departure_airport_code: AirportCode::parse(&request.departure_airport_code)?,
            emergency_row_seating: request.emergency_row_seating,
            return_date: parse_date(&request.return_date)?,
            destination_airport_code: AirportCode::parse(&request.destination_airport_code)?,
            seating_class: request.seating_class.parse()?,
            adult_count: count(request.adult_count)?,
            child_count: count(request.child_count)?,
            infant_count: count(request.infant_count)?,
        })
    }
}
