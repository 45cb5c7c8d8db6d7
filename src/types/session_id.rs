use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Exclusive upper bound for generated session identifiers.
pub const SESSION_ID_LIMIT: u64 = 1_000_000_000;

/// Identifies one client instance to the chat server.
///
/// A session identifier is sampled once when a client starts and never
/// changes afterwards.  It is not persisted: a restarted client is a new
/// session as far as the server is concerned.  On the wire it is the decimal
/// path segment of `/api/chat/{id}`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(u64);

impl SessionId {
    /// Wraps an explicit identifier.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Samples a fresh identifier in `[0, SESSION_ID_LIMIT)`.
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::thread_rng())
    }

    /// Samples a fresh identifier from the provided generator.
    pub fn generate_with<R: Rng>(rng: &mut R) -> Self {
        Self(rng.gen_range(0..SESSION_ID_LIMIT))
    }

    /// Returns the raw identifier.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(Self)
    }
}

impl From<u64> for SessionId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}
