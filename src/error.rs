//! Error Types
//!
//! Failure taxonomy for the auth bridge and the pipeline board.

use thiserror::Error;

/// Transport-level failure of a REST call.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Network(String),
    /// Fixed per-request timeout elapsed; treated like any other failure
    #[error("request timed out")]
    Timeout,
    #[error("server rejected the request: {status} {message}")]
    Rejected { status: u16, message: String },
    #[error("malformed response: {0}")]
    Decode(String),
}

/// Auth bridge failures surfaced to the login caller.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthError {
    /// Bridge token invalid, expired or already used. Never retried.
    #[error("bridge token exchange failed: {0}")]
    Exchange(ApiError),
    /// Stored API token rejected on verify. Forces deauthentication.
    #[error("session verification failed: {0}")]
    Verification(ApiError),
    #[error("invalid credentials: {0}")]
    Credentials(ApiError),
}

/// A stage move that could not be committed remotely.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransitionError {
    /// Remote update rejected or timed out; the optimistic change was rolled back.
    #[error("stage update failed: {0}")]
    Remote(ApiError),
    /// A move for this lead is still pending; overlapping moves are rejected.
    #[error("lead {0} already has a move in flight")]
    MoveInFlight(u32),
    #[error("unknown lead {0}")]
    UnknownLead(u32),
}

/// Board load failure; the board shows an error state with manual retry.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LoadError {
    #[error("no pipeline selected")]
    MissingPipeline,
    #[error("failed to load stages: {0}")]
    Stages(ApiError),
    #[error("failed to load leads: {0}")]
    Leads(ApiError),
}
