//! Client-side view of API reachability

use crate::client::Reachability;
use chrono::{DateTime, Local};
use std::fmt;

pub const LABEL_NOT_CHECKED: &str = "API status not checked";
pub const LABEL_CHECKING: &str = "Checking API connectivity";
pub const LABEL_ONLINE: &str = "API online";
pub const LABEL_DEGRADED: &str = "API degraded";
pub const LABEL_OFFLINE: &str = "API offline";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusState {
    Idle,
    Loading,
    Ok,
    Error,
}

impl fmt::Display for StatusState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusState::Idle => write!(f, "idle"),
            StatusState::Loading => write!(f, "loading"),
            StatusState::Ok => write!(f, "ok"),
            StatusState::Error => write!(f, "error"),
        }
    }
}

/// Visual tone of the status indicator. Idle shares the loading tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Ok,
    Error,
    Loading,
}

impl StatusTone {
    pub fn class_name(self) -> &'static str {
        match self {
            StatusTone::Ok => "status status-ok",
            StatusTone::Error => "status status-error",
            StatusTone::Loading => "status status-loading",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HealthStatus {
    pub state: StatusState,
    pub label: String,
    pub checked_at: Option<DateTime<Local>>,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self::initial()
    }
}

impl HealthStatus {
    pub fn initial() -> Self {
        Self {
            state: StatusState::Idle,
            label: LABEL_NOT_CHECKED.to_string(),
            checked_at: None,
        }
    }

    pub fn loading() -> Self {
        Self {
            state: StatusState::Loading,
            label: LABEL_CHECKING.to_string(),
            checked_at: None,
        }
    }

    /// A degraded API is still reachable, so it stays in `Ok` and only the label differs.
    pub fn reachable(reachability: &Reachability) -> Self {
        let label = match reachability {
            Reachability::Online => LABEL_ONLINE,
            Reachability::Degraded(_) => LABEL_DEGRADED,
        };

        Self {
            state: StatusState::Ok,
            label: label.to_string(),
            checked_at: Some(Local::now()),
        }
    }

    pub fn offline() -> Self {
        Self {
            state: StatusState::Error,
            label: LABEL_OFFLINE.to_string(),
            checked_at: Some(Local::now()),
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(self.state, StatusState::Ok | StatusState::Error)
    }

    pub fn is_loading(&self) -> bool {
        self.state == StatusState::Loading
    }

    pub fn tone(&self) -> StatusTone {
        match self.state {
            StatusState::Ok => StatusTone::Ok,
            StatusState::Error => StatusTone::Error,
            StatusState::Idle | StatusState::Loading => StatusTone::Loading,
        }
    }

    pub fn checked_at_display(&self) -> Option<String> {
        self.checked_at
            .map(|at| at.format("%H:%M:%S").to_string())
    }
}
