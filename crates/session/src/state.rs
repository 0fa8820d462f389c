//! The session state and its event transition function.
//!
//! ## Design Note
//! - State is a plain value; `apply` consumes it and returns the next state.
//!   Nothing mutates the cells in place, so every transition is testable on
//!   its own and the settle-ordering rules live in exactly one place.
//! - `RequestStarted` applies the loading/error/recommendations updates as a
//!   single transition, so no intermediate state is ever observable.
//! - Completions carry the `RequestId` they settle; a completion for anything
//!   other than the active request is ignored.

use tracing::debug;

use crate::types::{Recommendation, RequestId};
use crate::view::EMPTY_USERNAME_MESSAGE;

/// Everything the form knows about the current session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    /// Username of the last submitted query (used for the results heading).
    pub username: String,

    /// Recommendations from the last successful request, or `None` if no
    /// request has completed successfully yet.
    pub recommendations: Option<Vec<Recommendation>>,

    /// True strictly between request-started and request-settled.
    pub loading: bool,

    /// Last failure message; empty when there is no error to show.
    pub error: String,

    /// Id of the in-flight request allowed to settle into this state.
    pub active_request: Option<RequestId>,
}

/// Observable outcomes of a submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// The submitted username was empty; no request was issued.
    ValidationFailed,

    /// A request was issued for `username`.
    RequestStarted {
        request: RequestId,
        username: String,
    },

    /// The service answered with a recommendation list.
    RequestSucceeded {
        request: RequestId,
        recommendations: Vec<Recommendation>,
    },

    /// The request settled with an error; `message` is what the user sees.
    RequestFailed {
        request: RequestId,
        message: String,
    },
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the session by one event.
    ///
    /// # Returns
    /// The next state. Stale completions (a `request` id that does not match
    /// the active one) return the state unchanged.
    pub fn apply(self, event: SessionEvent) -> SessionState {
        match event {
            SessionEvent::ValidationFailed => SessionState {
                error: EMPTY_USERNAME_MESSAGE.to_string(),
                ..self
            },
            SessionEvent::RequestStarted { request, username } => SessionState {
                username,
                recommendations: None,
                loading: true,
                error: String::new(),
                active_request: Some(request),
            },
            SessionEvent::RequestSucceeded {
                request,
                recommendations,
            } => {
                if self.active_request != Some(request) {
                    debug!("Dropping stale success for request {}", request);
                    return self;
                }
                SessionState {
                    recommendations: Some(recommendations),
                    loading: false,
                    active_request: None,
                    ..self
                }
            }
            SessionEvent::RequestFailed { request, message } => {
                if self.active_request != Some(request) {
                    debug!("Dropping stale failure for request {}", request);
                    return self;
                }
                SessionState {
                    error: message,
                    loading: false,
                    active_request: None,
                    ..self
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(request: RequestId) -> SessionState {
        SessionState::new().apply(SessionEvent::RequestStarted {
            request,
            username: "octocat".to_string(),
        })
    }

    #[test]
    fn test_initial_state_defaults() {
        let state = SessionState::new();
        assert_eq!(state.username, "");
        assert_eq!(state.recommendations, None);
        assert!(!state.loading);
        assert_eq!(state.error, "");
        assert_eq!(state.active_request, None);
    }

    #[test]
    fn test_validation_failed_sets_fixed_message() {
        let state = SessionState::new().apply(SessionEvent::ValidationFailed);
        assert_eq!(state.error, EMPTY_USERNAME_MESSAGE);
        assert!(!state.loading, "Validation failure must not start loading");
        assert_eq!(state.active_request, None);
    }

    #[test]
    fn test_request_started_clears_previous_outcome() {
        let state = started(1).apply(SessionEvent::RequestFailed {
            request: 1,
            message: "User not found".to_string(),
        });
        assert_eq!(state.error, "User not found");

        let state = state.apply(SessionEvent::RequestStarted {
            request: 2,
            username: "torvalds".to_string(),
        });
        assert!(state.loading);
        assert_eq!(state.error, "", "New submission must clear the error");
        assert_eq!(state.recommendations, None);
        assert_eq!(state.username, "torvalds");
        assert_eq!(state.active_request, Some(2));
    }

    #[test]
    fn test_success_settles_loading_and_stores_recommendations() {
        let recs = vec![
            Recommendation::new("octocat/Hello-World"),
            Recommendation::new("torvalds/linux"),
        ];
        let state = started(1).apply(SessionEvent::RequestSucceeded {
            request: 1,
            recommendations: recs.clone(),
        });
        assert!(!state.loading);
        assert_eq!(state.error, "");
        assert_eq!(state.recommendations, Some(recs));
        assert_eq!(state.active_request, None);
    }

    #[test]
    fn test_failure_settles_loading_and_stores_message() {
        let state = started(1).apply(SessionEvent::RequestFailed {
            request: 1,
            message: "An error occurred on the server".to_string(),
        });
        assert!(!state.loading);
        assert_eq!(state.error, "An error occurred on the server");
        assert_eq!(state.recommendations, None);
    }

    #[test]
    fn test_stale_success_is_ignored() {
        // Request 1 is superseded by request 2 before it settles.
        let state = started(1).apply(SessionEvent::RequestStarted {
            request: 2,
            username: "ghost".to_string(),
        });

        let after_stale = state.clone().apply(SessionEvent::RequestSucceeded {
            request: 1,
            recommendations: vec![Recommendation::new("octocat/Hello-World")],
        });
        assert_eq!(after_stale, state, "Stale completion must not touch state");
        assert!(after_stale.loading, "Request 2 is still in flight");
    }

    #[test]
    fn test_stale_failure_is_ignored() {
        let state = started(1).apply(SessionEvent::RequestStarted {
            request: 2,
            username: "ghost".to_string(),
        });

        let after_stale = state.clone().apply(SessionEvent::RequestFailed {
            request: 1,
            message: "connection reset".to_string(),
        });
        assert_eq!(after_stale, state);
        assert_eq!(after_stale.error, "");
    }

    #[test]
    fn test_completion_after_settle_is_ignored() {
        let state = started(1).apply(SessionEvent::RequestSucceeded {
            request: 1,
            recommendations: vec![],
        });

        // The same request settling twice must be a no-op the second time.
        let again = state.clone().apply(SessionEvent::RequestFailed {
            request: 1,
            message: "late transport error".to_string(),
        });
        assert_eq!(again, state);
    }
}
