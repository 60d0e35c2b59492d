//! Server status and online-count values.

use core::fmt;
use core::str::FromStr;

use crate::{ModelError, UNAVAILABLE};

/// Custom Discord emoji shown next to a running server.
pub const ONLINE_EMOJI: &str = "<:online:741779665026547813>";

/// Custom Discord emoji shown next to a stopped server.
pub const OFFLINE_EMOJI: &str = "<:offline:741779665017897047>";

/// Status word for a running server.
pub const ONLINE_WORD: &str = "Онлайн";

/// Status word for a stopped server.
pub const OFFLINE_WORD: &str = "Выключен";

/// Reported state of a single game server.
///
/// Only `online` and `offline` exist upstream. Anything else is rejected at
/// parse time instead of falling back to one of the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ServerStatus {
    Online,
    Offline,
}

impl ServerStatus {
    /// Upstream string for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            ServerStatus::Online => "online",
            ServerStatus::Offline => "offline",
        }
    }

    /// Discord emoji markup for this status.
    pub fn emoji(&self) -> &'static str {
        match self {
            ServerStatus::Online => ONLINE_EMOJI,
            ServerStatus::Offline => OFFLINE_EMOJI,
        }
    }

    /// Human readable status word.
    pub fn word(&self) -> &'static str {
        match self {
            ServerStatus::Online => ONLINE_WORD,
            ServerStatus::Offline => OFFLINE_WORD,
        }
    }
}

impl FromStr for ServerStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "online" => Ok(ServerStatus::Online),
            "offline" => Ok(ServerStatus::Offline),
            other => Err(ModelError::InvalidStatus(other.to_string())),
        }
    }
}

impl fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Player count of a cluster or server.
///
/// A missing upstream value is `Unavailable`, never `Count(0)`: zero is a
/// real reading meaning the shard is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "Option<u64>", into = "Option<u64>"))]
pub enum Online {
    Count(u64),
    #[default]
    Unavailable,
}

impl Online {
    /// The count, if one was reported.
    pub fn count(&self) -> Option<u64> {
        match self {
            Online::Count(n) => Some(*n),
            Online::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Online::Count(_))
    }
}

impl From<Option<u64>> for Online {
    fn from(value: Option<u64>) -> Self {
        value.map_or(Online::Unavailable, Online::Count)
    }
}

impl From<u64> for Online {
    fn from(count: u64) -> Self {
        Online::Count(count)
    }
}

impl From<Online> for Option<u64> {
    fn from(value: Online) -> Self {
        value.count()
    }
}

impl fmt::Display for Online {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Online::Count(n) => write!(f, "{}", n),
            Online::Unavailable => f.write_str(UNAVAILABLE),
        }
    }
}
