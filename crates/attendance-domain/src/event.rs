//! Access event kinds and the per-employee IN/OUT state machine.
//!
//! Presence is never stored. It is derived from the kind of the most recent
//! access event, and the next event kind is the opposite of that one. There is
//! no timeout: an employee who checks IN and never checks OUT stays present
//! until their next successful recognition.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Direction of an access event.
///
/// Wire and storage format: `"in"` / `"out"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    In,
    Out,
}

impl EventKind {
    /// Next event for an employee whose latest recorded event is `last`.
    pub fn next_after(last: Option<EventKind>) -> EventKind {
        match last {
            Some(EventKind::In) => EventKind::Out,
            Some(EventKind::Out) | None => EventKind::In,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown event kind: {0}")]
pub struct UnknownEventKind(pub String);

impl FromStr for EventKind {
    type Err = UnknownEventKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in" => Ok(Self::In),
            "out" => Ok(Self::Out),
            other => Err(UnknownEventKind(other.to_owned())),
        }
    }
}

/// Derived presence of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    Present,
    Absent,
}

impl Presence {
    /// Presence given the kind of the employee's max-timestamp event.
    pub fn from_last(last: Option<EventKind>) -> Presence {
        match last {
            Some(EventKind::In) => Presence::Present,
            Some(EventKind::Out) | None => Presence::Absent,
        }
    }
}
