// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

/// Message shown when a request did not complete or its body was not JSON.
pub const NETWORK_FAILURE: &str = "network request failed.";

/// What went wrong, so that the action boundary can decide whether to show
/// the error or drop it.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ErrorKind {
    /// The request did not complete, or the response was not parseable.
    Network,
    /// The server answered with a non-success envelope.
    Protocol,
    /// Input was rejected before any request was made.
    Validation,
    /// The response refers to a card or session that is no longer current.
    Stale,
    /// Local filesystem or terminal failure.
    Io,
    /// The configuration file could not be parsed.
    Config,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ErrorReport {
    kind: ErrorKind,
    message: String,
}

impl ErrorReport {
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::Validation, message)
    }

    pub fn with_kind(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network() -> Self {
        Self::with_kind(ErrorKind::Network, NETWORK_FAILURE)
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::Protocol, message)
    }

    pub fn stale(message: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::Stale, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_stale(&self) -> bool {
        self.kind == ErrorKind::Stale
    }
}

impl Display for ErrorReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "error: {}", self.message)
    }
}

impl Error for ErrorReport {}

pub type Fallible<T> = Result<T, ErrorReport>;

pub fn fail<T>(msg: impl Into<String>) -> Fallible<T> {
    Err(ErrorReport::new(msg))
}

impl From<std::io::Error> for ErrorReport {
    fn from(value: std::io::Error) -> Self {
        ErrorReport::with_kind(ErrorKind::Io, format!("I/O error: {value}"))
    }
}

impl From<reqwest::Error> for ErrorReport {
    fn from(value: reqwest::Error) -> Self {
        log::debug!("request failed: {value}");
        ErrorReport::network()
    }
}

impl From<serde_json::Error> for ErrorReport {
    fn from(value: serde_json::Error) -> Self {
        log::debug!("unparseable response: {value}");
        ErrorReport::network()
    }
}

impl From<toml::de::Error> for ErrorReport {
    fn from(value: toml::de::Error) -> Self {
        ErrorReport::with_kind(ErrorKind::Config, format!("invalid configuration: {value}"))
    }
}

impl From<chrono::ParseError> for ErrorReport {
    fn from(value: chrono::ParseError) -> Self {
        ErrorReport::new(format!("invalid date: {value}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ErrorReport::new("directory does not exist.");
        assert_eq!(err.to_string(), "error: directory does not exist.");
    }

    #[test]
    fn test_fail_is_validation() {
        let result: Fallible<()> = fail("count out of range");
        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(!err.is_stale());
    }

    #[test]
    fn test_json_errors_are_generic_network_failures() {
        let err: ErrorReport = serde_json::from_str::<u32>("<html>").unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::Network);
        assert_eq!(err.message(), NETWORK_FAILURE);
    }
}
