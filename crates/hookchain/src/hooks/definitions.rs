//! Registration records and introspection types.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::listener::Listener;

/// Execution slot of a listener within a hook.
///
/// Explicit priorities run in ascending order, then every default-priority
/// listener in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// An explicit numeric priority (lower = earlier).
    At(i64),
    /// No priority given.
    Default,
}

impl Priority {
    /// Returns whether this is an explicit priority.
    pub fn is_explicit(&self) -> bool {
        matches!(self, Self::At(_))
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::At(a), Self::At(b)) => a.cmp(b),
            (Self::At(_), Self::Default) => Ordering::Less,
            (Self::Default, Self::At(_)) => Ordering::Greater,
            (Self::Default, Self::Default) => Ordering::Equal,
        }
    }
}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<Option<i64>> for Priority {
    fn from(priority: Option<i64>) -> Self {
        priority.map_or(Self::Default, Self::At)
    }
}

impl From<i64> for Priority {
    fn from(priority: i64) -> Self {
        Self::At(priority)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::At(p) => write!(f, "{p}"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// Where a listener was registered from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerInfo {
    /// Label supplied by the registering component (module or type name).
    pub label: String,
    /// Source file of the `listen` call.
    pub file: String,
    /// Source line of the `listen` call.
    pub line: u32,
    /// When the listener was registered.
    pub registered_at: DateTime<Utc>,
}

/// Priority and origin of one registered listener.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventInfo {
    /// Execution slot.
    pub priority: Priority,
    /// Registration site.
    pub caller: CallerInfo,
}

/// A registered listener as exposed by introspection.
#[derive(Clone)]
pub struct RegisteredListener {
    /// Execution slot.
    pub priority: Priority,
    /// Registration site.
    pub caller: CallerInfo,
    /// The callable.
    pub listener: Arc<dyn Listener>,
}

impl fmt::Debug for RegisteredListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredListener")
            .field("priority", &self.priority)
            .field("caller", &self.caller)
            .finish_non_exhaustive()
    }
}

/// One line of a diagnostic listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRow {
    /// Hook name (or pattern) the listener is registered under.
    pub hook: String,
    /// Execution slot.
    pub priority: Priority,
    /// Label of the registering component.
    pub caller: String,
    /// `file:line` of the registration.
    pub location: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        let mut priorities = vec![
            Priority::Default,
            Priority::At(5),
            Priority::At(-2),
            Priority::At(1),
        ];
        priorities.sort();
        assert_eq!(
            priorities,
            vec![
                Priority::At(-2),
                Priority::At(1),
                Priority::At(5),
                Priority::Default
            ]
        );
    }

    #[test]
    fn test_priority_from_option() {
        assert_eq!(Priority::from(None), Priority::Default);
        assert_eq!(Priority::from(Some(3)), Priority::At(3));
    }

    #[test]
    fn test_priority_display() {
        assert_eq!(Priority::At(10).to_string(), "10");
        assert_eq!(Priority::Default.to_string(), "default");
    }
}
