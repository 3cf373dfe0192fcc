use serde::Serialize;
use tracing::debug;

use crate::rules::{RuleViolation, SearchRules};
use crate::search::{parse_date, AcceptedSearch, AirportCode, SearchRequest, SeatingClass};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "search", rename_all = "snake_case")]
pub enum ValidationOutcome {
    Accepted(AcceptedSearch),
    Rejected,
}

impl ValidationOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationOutcome::Accepted(_))
    }

    pub fn accepted(&self) -> Option<&AcceptedSearch> {
        match self {
            ValidationOutcome::Accepted(search) => Some(search),
            ValidationOutcome::Rejected => None,
        }
    }

    pub fn into_accepted(self) -> Option<AcceptedSearch> {
        match self {
            ValidationOutcome::Accepted(search) => Some(search),
            ValidationOutcome::Rejected => None,
        }
    }
}

impl From<ValidationOutcome> for bool {
    fn from(outcome: ValidationOutcome) -> Self {
        outcome.is_accepted()
    }
}

/// Checks search requests against the booking rules.
///
/// Holds nothing but its limits, so one instance can be shared freely.
#[derive(Debug, Clone, Default)]
pub struct RequestValidator {
    rules: SearchRules,
}

impl RequestValidator {
    pub fn new(rules: SearchRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &SearchRules {
        &self.rules
    }

    pub fn validate(&self, request: &SearchRequest) -> ValidationOutcome {
        let violations = self.violations(request);
        if !violations.is_empty() {
            let codes: Vec<&str> = violations.iter().map(RuleViolation::as_str).collect();
            debug!(route = %request.route(), violations = ?codes, "Search request rejected");
            return ValidationOutcome::Rejected;
        }

        match AcceptedSearch::try_from(request) {
            Ok(search) => {
                debug!(
                    route = %request.route(),
                    class = %search.seating_class,
                    passengers = search.passenger_count(),
                    "Search request accepted"
                );
                ValidationOutcome::Accepted(search)
            }
            // The rules above already cover every field this can fail on
            Err(e) => {
                debug!(route = %request.route(), error = %e, "Search request failed normalization");
                ValidationOutcome::Rejected
            }
        }
    }

    /// Every rule the request breaks, in rule order. Empty means admissible.
    pub fn violations(&self, request: &SearchRequest) -> Vec<RuleViolation> {
        let rules = &self.rules;
        // Widened so no i32 input can overflow
        let adults = i64::from(request.adult_count);
        let children = i64::from(request.child_count);
        let infants = i64::from(request.infant_count);
        let total = adults + children + infants;
        let class = request.seating_class.parse::<SeatingClass>().ok();
        let emergency_row = request.emergency_row_seating;

        let mut violations = Vec::new();

        if total < i64::from(rules.min_passengers) || total > i64::from(rules.max_passengers) {
            violations.push(RuleViolation::PartySize);
        }

        if adults < 0 || children < 0 || infants < 0 {
            violations.push(RuleViolation::NegativeCount);
        }

        if !airport_codes_valid(request) {
            violations.push(RuleViolation::AirportCodes);
        }

        if !dates_valid(request) {
            violations.push(RuleViolation::Dates);
        }

        if class.is_none() {
            violations.push(RuleViolation::SeatingClass);
        }

        if emergency_row && class != Some(SeatingClass::Economy) {
            violations.push(RuleViolation::EmergencyRowClass);
        }

        if children > 0 && (emergency_row || class == Some(SeatingClass::First)) {
            violations.push(RuleViolation::ChildSeating);
        }

        if infants > 0 && (emergency_row || class == Some(SeatingClass::Business)) {
            violations.push(RuleViolation::InfantSeating);
        }

        if children > adults * i64::from(rules.max_children_per_adult) {
            violations.push(RuleViolation::ChildRatio);
        }

        if infants > adults * i64::from(rules.max_infants_per_adult) {
            violations.push(RuleViolation::InfantRatio);
        }

        violations
    }
}

fn airport_codes_valid(request: &SearchRequest) -> bool {
    match (
        AirportCode::parse(&request.departure_airport_code),
        AirportCode::parse(&request.destination_airport_code),
    ) {
        (Ok(origin), Ok(destination)) => origin != destination,
        _ => false,
    }
}

fn dates_valid(request: &SearchRequest) -> bool {
    match (parse_date(&request.departure_date), parse_date(&request.return_date)) {
        (Ok(departure), Ok(ret)) => ret > departure,
        _ => false,
    }
}

/// Validates with the default booking rules.
pub fn validate(request: &SearchRequest) -> ValidationOutcome {
    RequestValidator::default().validate(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn base_request() -> SearchRequest {
        SearchRequest::new("2025-10-20", "MAA", false, "2025-10-25", "DEL", "economy", 2, 2, 1)
    }

    #[test]
    fn test_accepts_valid_request() {
        let outcome = validate(&base_request());
        let search = outcome.accepted().expect("Expected acceptance");
        assert_eq!(search.departure_date, NaiveDate::from_ymd_opt(2025, 10, 20).unwrap());
        assert_eq!(search.return_date, NaiveDate::from_ymd_opt(2025, 10, 25).unwrap());
        assert_eq!(search.departure_airport_code.as_str(), "MAA");
        assert_eq!(search.destination_airport_code.as_str(), "DEL");
        assert_eq!(search.seating_class, SeatingClass::Economy);
        assert!(!search.emergency_row_seating);
        assert_eq!((search.adult_count, search.child_count, search.infant_count), (2, 2, 1));
    }

    #[test]
    fn test_violations_empty_for_valid_request() {
        assert!(RequestValidator::default().violations(&base_request()).is_empty());
    }

    #[test]
    fn test_all_rules_are_evaluated() {
        // Breaks several rules at once; none should be skipped
        let req = SearchRequest::new(
            "2025-10-25",
            "MAA",
            true,
            "2025-10-25",
            "MAA",
            "first",
            1,
            3,
            2,
        );
        let violations = RequestValidator::default().violations(&req);
        assert_eq!(
            violations,
            vec![
                RuleViolation::AirportCodes,
                RuleViolation::Dates,
                RuleViolation::EmergencyRowClass,
                RuleViolation::ChildSeating,
                RuleViolation::InfantSeating,
                RuleViolation::ChildRatio,
                RuleViolation::InfantRatio,
            ]
        );
        assert_eq!(validate(&req), ValidationOutcome::Rejected);
    }

    #[test]
    fn test_negative_count_rejected_even_when_total_in_range() {
        let req = SearchRequest { infant_count: -1, ..base_request() };
        let violations = RequestValidator::default().violations(&req);
        assert!(violations.contains(&RuleViolation::NegativeCount));
        assert!(!validate(&req).is_accepted());
    }

    #[test]
    fn test_extreme_counts_do_not_overflow() {
        let req = SearchRequest {
            adult_count: i32::MAX,
            child_count: i32::MAX,
            infant_count: i32::MAX,
            ..base_request()
        };
        assert!(RequestValidator::default().violations(&req).contains(&RuleViolation::PartySize));

        let req = SearchRequest {
            adult_count: i32::MIN,
            child_count: 0,
            infant_count: 0,
            ..base_request()
        };
        assert!(!validate(&req).is_accepted());
    }

    #[test]
    fn test_unknown_class_with_emergency_row() {
        let req = SearchRequest {
            seating_class: "Economy".to_string(),
            emergency_row_seating: true,
            child_count: 0,
            infant_count: 0,
            ..base_request()
        };
        let violations = RequestValidator::default().violations(&req);
        assert_eq!(
            violations,
            vec![RuleViolation::SeatingClass, RuleViolation::EmergencyRowClass]
        );
    }

    #[test]
    fn test_emergency_row_adults_in_economy_accepted() {
        let req = SearchRequest {
            emergency_row_seating: true,
            child_count: 0,
            infant_count: 0,
            ..base_request()
        };
        let search = validate(&req).into_accepted().expect("Expected acceptance");
        assert!(search.emergency_row_seating);
    }

    #[test]
    fn test_custom_rules() {
        let validator = RequestValidator::new(SearchRules {
            max_passengers: 4,
            ..SearchRules::default()
        });
        assert_eq!(validator.rules().max_passengers, 4);
        // 2 + 2 + 1 = 5 passes the defaults but not a limit of 4
        assert_eq!(validator.violations(&base_request()), vec![RuleViolation::PartySize]);
    }

    #[test]
    fn test_outcome_into_bool() {
        assert!(bool::from(validate(&base_request())));
        let rejected = SearchRequest { return_date: "2025-10-20".to_string(), ..base_request() };
        assert!(!bool::from(validate(&rejected)));
    }

    #[test]
    fn test_outcome_serialization() {
        let accepted = serde_json::to_value(validate(&base_request())).unwrap();
        assert_eq!(accepted["status"], "accepted");
        assert_eq!(accepted["search"]["seating_class"], "economy");
        assert_eq!(accepted["search"]["departure_date"], "2025-10-20");

        let rejected = serde_json::to_value(ValidationOutcome::Rejected).unwrap();
        assert_eq!(rejected["status"], "rejected");
    }
}
