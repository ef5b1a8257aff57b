use std::{io, time::Duration};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid server address: {0:?}")]
    InvalidAddress(String),
}

/// Failure of a single datagram round-trip.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),
    #[error("Network error: {0}")]
    Network(#[from] io::Error),
}

/// Reasons an A2S query falls back to its placeholder result.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Request failed: {0}")]
    RequestFailed(#[source] TransportError),
    #[error("Challenge round-trip failed: {0}")]
    ChallengeRoundTripFailed(#[source] TransportError),
    #[error("Invalid response header: expected {expected:?}, got {got:?}")]
    InvalidHeader {
        expected: char,
        got: Option<char>,
    },
}

pub type Result<T> = std::result::Result<T, anyhow::Error>;
