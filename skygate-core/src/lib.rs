pub mod search;
pub mod rules;
pub mod validator;
pub mod app_config;
pub mod telemetry;

pub use search::{parse_date, AcceptedSearch, AirportCode, SearchRequest, SeatingClass};
pub use rules::{RuleViolation, SearchRules};
pub use validator::{validate, RequestValidator, ValidationOutcome};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid airport code: {0:?}")]
    InvalidAirportCode(String),
    #[error("Invalid seating class: {0:?}")]
    InvalidSeatingClass(String),
    #[error("Invalid passenger count: {0}")]
    InvalidPassengerCount(i32),
    #[error("Invalid search rules: {0}")]
    InvalidRules(String),
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type CoreResult<T> = Result<T, CoreError>;
