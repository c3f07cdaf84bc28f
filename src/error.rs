use std::{
    env::VarError, fmt, io::Error as IO_ERROR, num::ParseIntError,
};

use reqwest::header::{
    InvalidHeaderName as INVALID_HEADER_NAME,
    InvalidHeaderValue as INVALID_HEADER_VALUE,
};
use reqwest::Error as REQWEST_ERROR;
use serde::Serialize;
use serde_json::Error as JSON_ERROR;
use thiserror::Error;
use tracing::subscriber::SetGlobalDefaultError as TRACING_GLOBAL_DEFAULT_ERROR;

use crate::model::ViewInput;

/// Which of the two upstream calls an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    Quote,
    Trend,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Quote => write!(f, "quote"),
            Endpoint::Trend => write!(f, "trend"),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Fetch failure on {endpoint} endpoint (status {}): {message}", display_status(.status))]
    FetchFailure {
        endpoint: Endpoint,
        status: Option<u16>,
        message: String,
    },

    #[error("Quote response contains no assets")]
    EmptyResponse,

    #[error("Currency not requested: {0}")]
    UnknownCurrency(String),

    #[error("Cycle cancelled")]
    Cancelled,

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("{0}")]
    Io(#[from] IO_ERROR),

    #[error("{0}")]
    VAR(#[from] VarError),

    #[error("{0}")]
    INT(#[from] ParseIntError),

    #[error("{0}")]
    JsonError(#[from] JSON_ERROR),

    #[error("{0}")]
    ReqwestError(#[from] REQWEST_ERROR),

    #[error("{0}")]
    InvalidHeaderName(#[from] INVALID_HEADER_NAME),

    #[error("{0}")]
    InvalidHeaderValue(#[from] INVALID_HEADER_VALUE),

    #[error("Tracing error: {0}")]
    SetGlobalDefaultError(#[from] TRACING_GLOBAL_DEFAULT_ERROR),
}

fn display_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => code.to_string(),
        None => String::from("none"),
    }
}

impl Error {
    pub fn fetch(
        endpoint: Endpoint,
        status: Option<u16>,
        message: impl Into<String>,
    ) -> Self {
        Error::FetchFailure {
            endpoint,
            status,
            message: message.into(),
        }
    }

    /// Maps a transport error from `reqwest` onto the endpoint it came from.
    pub fn from_transport(endpoint: Endpoint, error: REQWEST_ERROR) -> Self {
        let status = error.status().map(|s| s.as_u16());
        Error::fetch(endpoint, status, error.to_string())
    }
}

/// A fatal failure of one fetch cycle, carrying the inputs that were tried.
#[derive(Error, Debug)]
#[error("{error} ({input})")]
pub struct CycleError {
    pub input: ViewInput,
    #[source]
    pub error: Error,
}

impl CycleError {
    pub fn new(input: &ViewInput, error: Error) -> Self {
        CycleError {
            input: input.clone(),
            error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_failure_message() {
        let err = Error::fetch(Endpoint::Trend, Some(429), "rate limited");
        assert_eq!(
            err.to_string(),
            "Fetch failure on trend endpoint (status 429): rate limited"
        );

        let err = Error::fetch(Endpoint::Quote, None, "connection reset");
        assert_eq!(
            err.to_string(),
            "Fetch failure on quote endpoint (status none): connection reset"
        );
    }

    #[test]
    fn test_cycle_error_carries_inputs() {
        let input = ViewInput::new("", "usd", "usd");
        let err = CycleError::new(
            &input,
            Error::InvalidInput(String::from("no assets")),
        );

        assert_eq!(err.input.currencies, "usd");
        assert!(err.to_string().starts_with("Invalid input: no assets"));
    }
}
