//! Newtype wrapper for the job key identifier.
//!
//! A job key is an opaque string handed to us by the caller. It names a job
//! in the remote processing system and doubles as the marker filename in the
//! pending directory, so it must be filesystem-safe (see [`crate::pending`]).

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque identifier for one externally-processed job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobKey(pub String);

impl JobKey {
    pub fn new(s: impl Into<String>) -> Self {
        JobKey(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for JobKey {
    fn from(s: String) -> Self {
        JobKey(s)
    }
}

impl From<&str> for JobKey {
    fn from(s: &str) -> Self {
        JobKey(s.to_string())
    }
}
