//! State transitions returned to the host

use super::Diagnostics;

/// What the host must do with the stored state after an operation
#[derive(Debug, Clone, PartialEq)]
pub enum StateChange<T> {
    /// Leave stored state as it was
    Unchanged,
    /// Replace stored state
    Set(T),
    /// Drop the resource from state
    Removed,
}

/// Outcome of one resource operation
#[derive(Debug, Clone, PartialEq)]
pub struct Response<T> {
    pub state: StateChange<T>,
    pub diagnostics: Diagnostics,
}

impl<T> Response<T> {
    pub fn set(value: T) -> Self {
        Self {
            state: StateChange::Set(value),
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn removed() -> Self {
        Self {
            state: StateChange::Removed,
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn unchanged() -> Self {
        Self {
            state: StateChange::Unchanged,
            diagnostics: Diagnostics::new(),
        }
    }

    /// Leave state alone and report a single error
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        let mut diagnostics = Diagnostics::new();
        diagnostics.add_error(summary, detail);
        Self {
            state: StateChange::Unchanged,
            diagnostics,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Response<U> {
        let state = match self.state {
            StateChange::Set(v) => StateChange::Set(f(v)),
            StateChange::Removed => StateChange::Removed,
            StateChange::Unchanged => StateChange::Unchanged,
        };
        Response {
            state,
            diagnostics: self.diagnostics,
        }
    }

    /// The new state, if one was set
    pub fn new_state(&self) -> Option<&T> {
        match &self.state {
            StateChange::Set(v) => Some(v),
            _ => None,
        }
    }
}
